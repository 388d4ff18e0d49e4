//! `deckgen history` and `deckgen metrics` commands.

use anyhow::{Context, Result, bail};
use sqlx::PgPool;
use uuid::Uuid;

use deckgen_db::models::{MetricsSummary, Presentation};
use deckgen_db::queries::metrics;
use deckgen_db::queries::presentations;

use crate::HistoryCommands;

pub async fn run_history_command(command: HistoryCommands, pool: &PgPool) -> Result<()> {
    match command {
        HistoryCommands::List { limit } => {
            let rows = presentations::list_presentations(pool, limit).await?;
            let total = metrics::get_total_downloads(pool).await?;
            print!("{}", format_history(&rows, total));
        }
        HistoryCommands::Delete { id } => {
            let uuid = Uuid::parse_str(&id).with_context(|| format!("invalid presentation ID: {id}"))?;
            if !presentations::delete_presentation(pool, uuid).await? {
                bail!("presentation {uuid} not found");
            }
            println!("Presentation {uuid} deleted.");
        }
        HistoryCommands::Clear => {
            let removed = presentations::clear_presentations(pool).await?;
            println!("Cleared {removed} presentation(s); download counter reset.");
        }
    }
    Ok(())
}

pub async fn run_metrics(pool: &PgPool) -> Result<()> {
    let summary = metrics::get_metrics_summary(pool).await?;
    print!("{}", format_metrics(&summary));
    Ok(())
}

fn format_history(rows: &[Presentation], total_downloads: i64) -> String {
    if rows.is_empty() {
        return format!("No presentations yet.\nTotal downloads: {total_downloads}\n");
    }

    let mut out = String::new();
    for p in rows {
        let marker = if p.downloaded { "+" } else { "." };
        out.push_str(&format!(
            "[{marker}] {topic} ({slides} slides, {depth}, {style}, {bg}) {created} {id}\n",
            topic = p.topic,
            slides = p.slides,
            depth = p.content_depth,
            style = p.style,
            bg = p.background_color,
            created = p.created_at.format("%Y-%m-%d %H:%M"),
            id = p.id,
        ));
    }
    out.push_str(&format!(
        "{} presentation(s), total downloads: {total_downloads}\n",
        rows.len()
    ));
    out
}

fn format_metrics(summary: &MetricsSummary) -> String {
    let mut out = format!(
        "Presentations: {}\nDownloaded:    {}\nDownloads:     {}\n",
        summary.total_presentations, summary.downloaded_presentations, summary.total_downloads
    );
    if !summary.content_depth_distribution.is_empty() {
        out.push_str("By depth:\n");
        for (depth, count) in &summary.content_depth_distribution {
            out.push_str(&format!("  {depth}: {count}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use deckgen_db::models::ContentDepth;

    fn row(topic: &str, downloaded: bool) -> Presentation {
        Presentation {
            id: Uuid::nil(),
            topic: topic.to_string(),
            slides: 5,
            style: "Blue-Professional".to_string(),
            background_color: "#FFFFFF".to_string(),
            include_images: false,
            content_depth: ContentDepth::Basic,
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap(),
            downloaded,
            download_count: i32::from(downloaded),
        }
    }

    #[test]
    fn empty_history_message() {
        assert_eq!(
            format_history(&[], 4),
            "No presentations yet.\nTotal downloads: 4\n"
        );
    }

    #[test]
    fn history_lines_mark_downloads() {
        let text = format_history(&[row("Solar", true), row("Wind", false)], 1);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("[+] Solar (5 slides, basic"));
        assert!(lines[0].contains("2025-03-01 09:30"));
        assert!(lines[1].starts_with("[.] Wind"));
        assert_eq!(lines[2], "2 presentation(s), total downloads: 1");
    }

    #[test]
    fn metrics_include_distribution() {
        let mut summary = MetricsSummary {
            total_downloads: 3,
            total_presentations: 2,
            downloaded_presentations: 1,
            ..Default::default()
        };
        assert!(!format_metrics(&summary).contains("By depth"));

        summary
            .content_depth_distribution
            .insert("detailed".to_string(), 2);
        let text = format_metrics(&summary);
        assert!(text.contains("Downloads:     3"));
        assert!(text.contains("  detailed: 2"));
    }
}
