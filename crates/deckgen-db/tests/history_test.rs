//! Integration tests for generation history and download counters.

use deckgen_db::models::ContentDepth;
use deckgen_db::queries::metrics;
use deckgen_db::queries::presentations::{self, DEFAULT_LIST_LIMIT, NewPresentation};
use deckgen_test_utils::TestDb;

fn sample(topic: &str, depth: ContentDepth) -> NewPresentation<'_> {
    NewPresentation {
        topic,
        slides: 6,
        style: "Blue-Professional",
        background_color: "#FFFFFF",
        include_images: false,
        content_depth: depth,
    }
}

#[tokio::test]
async fn upsert_inserts_new_row() {
    let db = TestDb::migrated().await;

    let saved = presentations::upsert_presentation(&db.pool, &sample("Solar", ContentDepth::Basic))
        .await
        .expect("upsert should succeed");

    assert_eq!(saved.topic, "Solar");
    assert_eq!(saved.slides, 6);
    assert_eq!(saved.content_depth, ContentDepth::Basic);
    assert!(!saved.downloaded);
    assert_eq!(saved.download_count, 0);

    let fetched = presentations::get_presentation(&db.pool, saved.id)
        .await
        .unwrap()
        .expect("row should exist");
    assert_eq!(fetched.id, saved.id);

    db.teardown().await;
}

#[tokio::test]
async fn upsert_same_key_updates_in_place() {
    let db = TestDb::migrated().await;

    let first = presentations::upsert_presentation(&db.pool, &sample("Wind", ContentDepth::Detailed))
        .await
        .unwrap();
    presentations::record_download(&db.pool, first.id).await.unwrap();

    let again = NewPresentation {
        slides: 3,
        include_images: true,
        ..sample("Wind", ContentDepth::Detailed)
    };
    let second = presentations::upsert_presentation(&db.pool, &again)
        .await
        .unwrap();

    assert_eq!(second.id, first.id, "same key must reuse the row");
    assert_eq!(second.slides, 3);
    assert!(second.include_images);
    assert_eq!(second.download_count, 1, "counters survive an upsert");

    let all = presentations::list_presentations(&db.pool, DEFAULT_LIST_LIMIT)
        .await
        .unwrap();
    assert_eq!(all.len(), 1);

    db.teardown().await;
}

#[tokio::test]
async fn different_depth_is_a_different_row() {
    let db = TestDb::migrated().await;

    presentations::upsert_presentation(&db.pool, &sample("Tides", ContentDepth::Basic))
        .await
        .unwrap();
    presentations::upsert_presentation(&db.pool, &sample("Tides", ContentDepth::Comprehensive))
        .await
        .unwrap();

    let all = presentations::list_presentations(&db.pool, DEFAULT_LIST_LIMIT)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    db.teardown().await;
}

#[tokio::test]
async fn list_is_newest_first_and_limited() {
    let db = TestDb::migrated().await;

    for topic in ["one", "two", "three"] {
        presentations::upsert_presentation(&db.pool, &sample(topic, ContentDepth::Basic))
            .await
            .unwrap();
    }

    let all = presentations::list_presentations(&db.pool, DEFAULT_LIST_LIMIT)
        .await
        .unwrap();
    let topics: Vec<&str> = all.iter().map(|p| p.topic.as_str()).collect();
    assert_eq!(topics, vec!["three", "two", "one"]);

    let limited = presentations::list_presentations(&db.pool, 2).await.unwrap();
    assert_eq!(limited.len(), 2);

    db.teardown().await;
}

#[tokio::test]
async fn record_download_bumps_both_counters() {
    let db = TestDb::migrated().await;

    let p = presentations::upsert_presentation(&db.pool, &sample("Hydro", ContentDepth::Detailed))
        .await
        .unwrap();
    presentations::record_download(&db.pool, p.id).await.unwrap();
    presentations::record_download(&db.pool, p.id).await.unwrap();

    let fetched = presentations::get_presentation(&db.pool, p.id)
        .await
        .unwrap()
        .unwrap();
    assert!(fetched.downloaded);
    assert_eq!(fetched.download_count, 2);
    assert_eq!(metrics::get_total_downloads(&db.pool).await.unwrap(), 2);

    db.teardown().await;
}

#[tokio::test]
async fn record_download_unknown_id_fails_without_counting() {
    let db = TestDb::migrated().await;

    let err = presentations::record_download(&db.pool, uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not found"), "got: {err}");
    assert_eq!(metrics::get_total_downloads(&db.pool).await.unwrap(), 0);

    db.teardown().await;
}

#[tokio::test]
async fn delete_reports_whether_row_existed() {
    let db = TestDb::migrated().await;

    let p = presentations::upsert_presentation(&db.pool, &sample("Geo", ContentDepth::Basic))
        .await
        .unwrap();

    assert!(presentations::delete_presentation(&db.pool, p.id).await.unwrap());
    assert!(!presentations::delete_presentation(&db.pool, p.id).await.unwrap());

    db.teardown().await;
}

#[tokio::test]
async fn clear_removes_rows_and_resets_counter() {
    let db = TestDb::migrated().await;

    let p = presentations::upsert_presentation(&db.pool, &sample("Coal", ContentDepth::Basic))
        .await
        .unwrap();
    presentations::upsert_presentation(&db.pool, &sample("Gas", ContentDepth::Basic))
        .await
        .unwrap();
    presentations::record_download(&db.pool, p.id).await.unwrap();

    let removed = presentations::clear_presentations(&db.pool).await.unwrap();
    assert_eq!(removed, 2);
    assert_eq!(metrics::get_total_downloads(&db.pool).await.unwrap(), 0);
    assert!(
        presentations::list_presentations(&db.pool, DEFAULT_LIST_LIMIT)
            .await
            .unwrap()
            .is_empty()
    );

    db.teardown().await;
}

#[tokio::test]
async fn metrics_summary_counts_by_depth() {
    let db = TestDb::migrated().await;

    let a = presentations::upsert_presentation(&db.pool, &sample("A", ContentDepth::Basic))
        .await
        .unwrap();
    presentations::upsert_presentation(&db.pool, &sample("B", ContentDepth::Basic))
        .await
        .unwrap();
    presentations::upsert_presentation(&db.pool, &sample("C", ContentDepth::Comprehensive))
        .await
        .unwrap();
    presentations::record_download(&db.pool, a.id).await.unwrap();

    let summary = metrics::get_metrics_summary(&db.pool).await.unwrap();
    assert_eq!(summary.total_downloads, 1);
    assert_eq!(summary.total_presentations, 3);
    assert_eq!(summary.downloaded_presentations, 1);
    assert_eq!(summary.content_depth_distribution.get("basic"), Some(&2));
    assert_eq!(summary.content_depth_distribution.get("comprehensive"), Some(&1));
    assert_eq!(summary.content_depth_distribution.get("detailed"), None);

    db.teardown().await;
}
