//! Database query functions for the `presentations` table.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::{ContentDepth, Presentation};

/// Default cap on rows returned by [`list_presentations`].
pub const DEFAULT_LIST_LIMIT: i64 = 1000;

/// Fields recorded for one generation request.
#[derive(Debug, Clone)]
pub struct NewPresentation<'a> {
    pub topic: &'a str,
    /// Number of content slides actually produced.
    pub slides: i32,
    pub style: &'a str,
    pub background_color: &'a str,
    pub include_images: bool,
    pub content_depth: ContentDepth,
}

/// Insert a history row, or refresh the existing row for the same
/// (topic, style, background_color, content_depth) key.
///
/// A refresh overwrites `slides` and `include_images` and bumps
/// `created_at`; download counters are preserved.
pub async fn upsert_presentation(pool: &PgPool, new: &NewPresentation<'_>) -> Result<Presentation> {
    let presentation = sqlx::query_as::<_, Presentation>(
        "INSERT INTO presentations \
             (topic, slides, style, background_color, include_images, content_depth) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         ON CONFLICT (topic, style, background_color, content_depth) DO UPDATE \
         SET slides = EXCLUDED.slides, \
             include_images = EXCLUDED.include_images, \
             created_at = now() \
         RETURNING *",
    )
    .bind(new.topic)
    .bind(new.slides)
    .bind(new.style)
    .bind(new.background_color)
    .bind(new.include_images)
    .bind(new.content_depth)
    .fetch_one(pool)
    .await
    .context("failed to save presentation")?;

    info!(
        id = %presentation.id,
        topic = new.topic,
        slides = new.slides,
        "saved presentation history"
    );
    Ok(presentation)
}

/// Fetch a history row by its ID.
pub async fn get_presentation(pool: &PgPool, id: Uuid) -> Result<Option<Presentation>> {
    let presentation =
        sqlx::query_as::<_, Presentation>("SELECT * FROM presentations WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .context("failed to fetch presentation")?;

    Ok(presentation)
}

/// List history rows, newest first, at most `limit` of them.
pub async fn list_presentations(pool: &PgPool, limit: i64) -> Result<Vec<Presentation>> {
    let presentations = sqlx::query_as::<_, Presentation>(
        "SELECT * FROM presentations ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
    .context("failed to list presentations")?;

    Ok(presentations)
}

/// Mark a presentation as downloaded and bump the global download counter.
///
/// Both updates run in one transaction. Fails if the presentation does not
/// exist.
pub async fn record_download(pool: &PgPool, id: Uuid) -> Result<()> {
    let mut tx = pool.begin().await.context("failed to begin transaction")?;

    let result = sqlx::query(
        "UPDATE presentations \
         SET downloaded = TRUE, download_count = download_count + 1 \
         WHERE id = $1",
    )
    .bind(id)
    .execute(&mut *tx)
    .await
    .context("failed to update presentation download count")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("presentation {id} not found");
    }

    sqlx::query(
        "UPDATE app_metrics \
         SET total_downloads = total_downloads + 1, updated_at = now() \
         WHERE id = 1",
    )
    .execute(&mut *tx)
    .await
    .context("failed to update total downloads")?;

    tx.commit().await.context("failed to commit download")?;
    Ok(())
}

/// Delete one history row. Returns `false` if no such row existed.
pub async fn delete_presentation(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM presentations WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .context("failed to delete presentation")?;

    Ok(result.rows_affected() > 0)
}

/// Delete every history row and reset the download counter.
///
/// Returns the number of rows removed.
pub async fn clear_presentations(pool: &PgPool) -> Result<u64> {
    let mut tx = pool.begin().await.context("failed to begin transaction")?;

    let result = sqlx::query("DELETE FROM presentations")
        .execute(&mut *tx)
        .await
        .context("failed to clear presentations")?;

    sqlx::query("UPDATE app_metrics SET total_downloads = 0, updated_at = now()")
        .execute(&mut *tx)
        .await
        .context("failed to reset total downloads")?;

    tx.commit().await.context("failed to commit clear")?;
    Ok(result.rows_affected())
}
