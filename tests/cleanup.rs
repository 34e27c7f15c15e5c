//! Cleanup pass and polling-loop tests against the in-memory fake.

mod common;

use std::sync::atomic::AtomicUsize;
use std::time::Duration;

use common::FakeApi;

use tubecat::core::{delete_matching, run_cleanup, CleanupOptions};
use tubecat::ApiError;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn fast() -> CleanupOptions {
    CleanupOptions {
        pass_interval: Duration::from_millis(1),
        max_passes: 10,
    }
}

#[tokio::test]
async fn pass_deletes_exactly_the_matching_playlists() {
    let api = FakeApi::with_playlists(&[
        "Linux Playlist",
        "Holiday footage",
        "My Containers and Kubernetes Playlist",
        "music",
    ]);
    let names = names(&["Linux", "Containers and Kubernetes"]);

    let deleted = delete_matching(&api, &names).await.unwrap();

    assert!(deleted);
    assert_eq!(*api.deleted.lock().unwrap(), vec!["seed-0", "seed-2"]);
    assert_eq!(api.playlists.lock().unwrap().len(), 2);

    // A second pass over the survivors finds nothing
    let deleted = delete_matching(&api, &names).await.unwrap();
    assert!(!deleted);
}

#[tokio::test]
async fn title_matching_is_case_sensitive() {
    let api = FakeApi::with_playlists(&["linux playlist"]);

    let deleted = delete_matching(&api, &names(&["Linux"])).await.unwrap();

    assert!(!deleted);
    assert_eq!(api.playlists.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn loop_stops_after_a_pass_that_deletes_nothing() {
    let api = FakeApi::with_playlists(&["Linux Playlist", "music"]);

    let passes = run_cleanup(&api, &names(&["Linux"]), fast()).await.unwrap();

    // Pass 1 deletes, pass 2 finds nothing
    assert_eq!(passes, 2);
    assert_eq!(api.playlists.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn quota_errors_are_retried_on_the_next_pass() {
    let api = FakeApi {
        quota_failures: AtomicUsize::new(1),
        ..Default::default()
    };
    {
        let mut playlists = api.playlists.lock().unwrap();
        playlists.push(common::playlist("p1", "Linux Playlist"));
    }

    let passes = run_cleanup(&api, &names(&["Linux"]), fast()).await.unwrap();

    // Pass 1 hits the quota, pass 2 deletes, pass 3 finds nothing
    assert_eq!(passes, 3);
    assert!(api.playlists.lock().unwrap().is_empty());
}

#[tokio::test]
async fn non_quota_errors_are_fatal() {
    let api = FakeApi {
        fail_list: true,
        ..Default::default()
    };

    let err = run_cleanup(&api, &names(&["Linux"]), fast()).await.unwrap_err();
    assert!(matches!(err, ApiError::Api { status: 500, .. }));
}

#[tokio::test]
async fn loop_is_bounded_by_max_passes() {
    let api = FakeApi {
        respawn_title: Some("Linux Playlist".to_string()),
        ..Default::default()
    };
    {
        let mut playlists = api.playlists.lock().unwrap();
        playlists.push(common::playlist("p1", "Linux Playlist"));
    }

    let opts = CleanupOptions {
        pass_interval: Duration::from_millis(1),
        max_passes: 3,
    };
    let passes = run_cleanup(&api, &names(&["Linux"]), opts).await.unwrap();

    assert_eq!(passes, 3);
    // Every pass kept finding a respawned playlist
    assert_eq!(api.deleted.lock().unwrap().len(), 3);
}
