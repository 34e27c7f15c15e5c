//! Publish orchestration tests against the in-memory fake.

mod common;

use common::FakeApi;

use tubecat::core::{classify, publish};
use tubecat::domain::{CategoryRule, RuleSet, VideoRecord};
use tubecat::ApiError;

fn rules() -> RuleSet {
    RuleSet::new(vec![
        CategoryRule::new("Kubernetes", ["kubernetes"]),
        CategoryRule::new("Linux", ["linux"]),
    ])
    .unwrap()
}

fn video(title: &str, link: &str) -> VideoRecord {
    VideoRecord::new(title, link, title)
}

#[tokio::test]
async fn creates_playlists_in_rule_order_and_inserts_in_bucket_order() {
    let api = FakeApi::new();
    let rules = rules();
    let records = vec![
        video("Linux disk tuning", "https://youtu.be/watch?v=lin1"),
        video("Kubernetes intro", "https://youtu.be/watch?v=kub1&t=10s"),
        video("Kubernetes networking", "https://youtu.be/watch?v=kub2"),
    ];
    let buckets = classify(&records, &rules);

    let report = publish(&api, &rules, &buckets).await.unwrap();

    assert_eq!(report.playlists_created, 2);
    assert_eq!(report.items_inserted, 3);
    assert_eq!(report.items_skipped, 0);

    let playlists = api.playlists.lock().unwrap();
    assert_eq!(playlists[0].snippet.title, "Kubernetes Playlist");
    assert_eq!(
        playlists[0].snippet.description,
        "A playlist of Kubernetes videos"
    );
    assert_eq!(
        playlists[0].status.as_ref().unwrap().privacy_status,
        "private"
    );
    assert_eq!(playlists[1].snippet.title, "Linux Playlist");

    // Kubernetes inserts first (rule order), in scrape order, ids extracted
    let kubernetes_id = playlists[0].id.clone();
    let linux_id = playlists[1].id.clone();
    let inserted = api.inserted.lock().unwrap();
    assert_eq!(
        *inserted,
        vec![
            (kubernetes_id.clone(), "kub1".to_string()),
            (kubernetes_id, "kub2".to_string()),
            (linux_id, "lin1".to_string()),
        ]
    );
}

#[tokio::test]
async fn empty_categories_still_get_playlists() {
    let api = FakeApi::new();
    let rules = rules();
    let buckets = classify(&[], &rules);

    let report = publish(&api, &rules, &buckets).await.unwrap();

    assert_eq!(report.playlists_created, 2);
    assert_eq!(report.items_inserted, 0);
    assert_eq!(api.playlists.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn links_without_a_video_id_are_skipped() {
    let api = FakeApi::new();
    let rules = rules();
    let records = vec![
        video("Kubernetes intro", "https://example.com/no-id-here"),
        video("Kubernetes networking", "https://youtu.be/watch?v=kub2"),
    ];
    let buckets = classify(&records, &rules);

    let report = publish(&api, &rules, &buckets).await.unwrap();

    assert_eq!(report.items_inserted, 1);
    assert_eq!(report.items_skipped, 1);
    let inserted = api.inserted.lock().unwrap();
    assert_eq!(inserted.len(), 1);
    assert_eq!(inserted[0].1, "kub2");
}

#[tokio::test]
async fn first_api_failure_aborts_the_whole_publish() {
    let api = FakeApi {
        fail_insert_at: Some(1),
        ..Default::default()
    };
    let rules = rules();
    let records = vec![
        video("Kubernetes intro", "https://youtu.be/watch?v=kub1"),
        video("Kubernetes networking", "https://youtu.be/watch?v=kub2"),
        video("Linux disk tuning", "https://youtu.be/watch?v=lin1"),
    ];
    let buckets = classify(&records, &rules);

    let err = publish(&api, &rules, &buckets).await.unwrap_err();
    assert!(matches!(err, ApiError::Api { status: 400, .. }));

    // One insert landed before the failure; the Linux playlist was never
    // created and nothing was rolled back.
    assert_eq!(api.inserted.lock().unwrap().len(), 1);
    assert_eq!(api.playlists.lock().unwrap().len(), 1);
}
