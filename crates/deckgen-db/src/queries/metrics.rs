//! Aggregate queries over `app_metrics` and `presentations`.

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::models::{ContentDepth, MetricsSummary};

/// Total successful downloads since the last history clear.
pub async fn get_total_downloads(pool: &PgPool) -> Result<i64> {
    let total: Option<i64> =
        sqlx::query_scalar("SELECT total_downloads FROM app_metrics WHERE id = 1")
            .fetch_optional(pool)
            .await
            .context("failed to fetch total downloads")?;

    Ok(total.unwrap_or(0))
}

/// Collect the counters served by the metrics endpoint.
pub async fn get_metrics_summary(pool: &PgPool) -> Result<MetricsSummary> {
    let total_downloads = get_total_downloads(pool).await?;

    let (total_presentations, downloaded_presentations): (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COUNT(*) FILTER (WHERE downloaded) FROM presentations",
    )
    .fetch_one(pool)
    .await
    .context("failed to count presentations")?;

    let rows: Vec<(ContentDepth, i64)> = sqlx::query_as(
        "SELECT content_depth, COUNT(*) FROM presentations GROUP BY content_depth",
    )
    .fetch_all(pool)
    .await
    .context("failed to fetch content depth distribution")?;

    Ok(MetricsSummary {
        total_downloads,
        total_presentations,
        downloaded_presentations,
        content_depth_distribution: rows
            .into_iter()
            .map(|(depth, count)| (depth.to_string(), count))
            .collect(),
    })
}
