mod common;

use common::{MockApi, page, session, track};
use serde_json::json;
use spotdeck::{
    spotify::{FailurePolicy, FetchError, PaginationPolicy, pagination},
    types::Page,
};

/// Registers `pages.len()` pages at `/pages/{n}`, each pointing to the next.
fn register_pages(api: &MockApi, pages: &[Vec<u32>], total: u64) {
    for (n, items) in pages.iter().enumerate() {
        let next = (n + 1 < pages.len()).then(|| format!("{{base}}/pages/{}", n + 1));
        api.json(&format!("/pages/{n}"), page(json!(items), total, next.as_deref()));
    }
}

async fn first_page(api: &MockApi) -> Page<u32> {
    let session = session();
    api.client()
        .get(&format!("{}/pages/0", api.base_url), Some(&session))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_accumulates_every_page_in_order() {
    let api = MockApi::start().await;
    let pages = vec![vec![1, 2], vec![3, 4], vec![5]];
    register_pages(&api, &pages, 5);
    let client = api.client();
    let session = session();

    let first = first_page(&api).await;
    let collection = pagination::accumulate(&client, Some(&session), first, &PaginationPolicy::default())
        .await
        .unwrap();

    assert_eq!(collection.items, vec![1, 2, 3, 4, 5]);
    assert_eq!(collection.total, 5);
    assert!(collection.is_complete());
    assert_eq!(api.hits_for("/pages").len(), 3);
}

#[tokio::test]
async fn test_single_page_needs_no_follow_up() {
    let api = MockApi::start().await;
    register_pages(&api, &[vec![7, 8, 9]], 3);
    let client = api.client();
    let session = session();

    let first = first_page(&api).await;
    let collection = pagination::accumulate(&client, Some(&session), first, &PaginationPolicy::default())
        .await
        .unwrap();

    assert_eq!(collection.items, vec![7, 8, 9]);
    assert_eq!(api.hit_count(), 1);
}

#[tokio::test]
async fn test_total_comes_from_first_page() {
    let api = MockApi::start().await;
    api.json("/pages/0", page(json!([1]), 42, Some("{base}/pages/1")));
    api.json("/pages/1", page(json!([2]), 99, None));
    let client = api.client();
    let session = session();

    let first = first_page(&api).await;
    let collection = pagination::accumulate(&client, Some(&session), first, &PaginationPolicy::default())
        .await
        .unwrap();

    assert_eq!(collection.total, 42);
    assert_eq!(collection.items, vec![1, 2]);
}

#[tokio::test]
async fn test_page_ceiling_partial() {
    let api = MockApi::start().await;
    register_pages(&api, &[vec![1], vec![2], vec![3], vec![4]], 4);
    let client = api.client();
    let session = session();
    let policy = PaginationPolicy {
        max_pages: Some(2),
        on_failure: FailurePolicy::Partial,
    };

    let first = first_page(&api).await;
    let collection = pagination::accumulate(&client, Some(&session), first, &policy)
        .await
        .unwrap();

    assert_eq!(collection.items, vec![1, 2]);
    assert!(!collection.is_complete());
    assert_eq!(
        collection.next.as_deref(),
        Some(format!("{}/pages/2", api.base_url).as_str())
    );
    assert_eq!(api.hits_for("/pages").len(), 2);
}

#[tokio::test]
async fn test_page_ceiling_error() {
    let api = MockApi::start().await;
    register_pages(&api, &[vec![1], vec![2], vec![3]], 3);
    let client = api.client();
    let session = session();
    let policy = PaginationPolicy {
        max_pages: Some(2),
        on_failure: FailurePolicy::Error,
    };

    let first = first_page(&api).await;
    let err = pagination::accumulate(&client, Some(&session), first, &policy)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::PageLimit { max_pages: 2 }));
}

#[tokio::test]
async fn test_page_limit_reports_configured_ceiling() {
    let api = MockApi::start().await;
    register_pages(&api, &[vec![1], vec![2]], 2);
    let client = api.client();
    let session = session();
    let policy = PaginationPolicy {
        max_pages: Some(0),
        on_failure: FailurePolicy::Error,
    };

    let first = first_page(&api).await;
    let err = pagination::accumulate(&client, Some(&session), first, &policy)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::PageLimit { max_pages: 0 }));
    assert_eq!(api.hit_count(), 1);
}

#[tokio::test]
async fn test_unbounded_policy_reads_everything() {
    let api = MockApi::start().await;
    let pages: Vec<Vec<u32>> = (0..12).map(|n| vec![n]).collect();
    register_pages(&api, &pages, 12);
    let client = api.client();
    let session = session();
    let policy = PaginationPolicy {
        max_pages: None,
        on_failure: FailurePolicy::Error,
    };

    let first = first_page(&api).await;
    let collection = pagination::accumulate(&client, Some(&session), first, &policy)
        .await
        .unwrap();

    assert_eq!(collection.items, (0..12).collect::<Vec<u32>>());
}

#[tokio::test]
async fn test_failed_page_partial() {
    let api = MockApi::start().await;
    api.json("/pages/0", page(json!([1, 2]), 6, Some("{base}/pages/1")));
    api.route("/pages/1", 503, "");
    let client = api.client();
    let session = session();

    let first = first_page(&api).await;
    let collection = pagination::accumulate(&client, Some(&session), first, &PaginationPolicy::default())
        .await
        .unwrap();

    assert_eq!(collection.items, vec![1, 2]);
    assert_eq!(collection.total, 6);
    assert!(!collection.is_complete());
}

#[tokio::test]
async fn test_failed_page_error() {
    let api = MockApi::start().await;
    api.json("/pages/0", page(json!([1]), 3, Some("{base}/pages/1")));
    api.json("/pages/1", page(json!([2]), 3, Some("{base}/pages/2")));
    api.route("/pages/2", 500, "");
    let client = api.client();
    let session = session();
    let policy = PaginationPolicy {
        max_pages: None,
        on_failure: FailurePolicy::Error,
    };

    let first = first_page(&api).await;
    let err = pagination::accumulate(&client, Some(&session), first, &policy)
        .await
        .unwrap_err();

    match err {
        FetchError::Page { page, source } => {
            assert_eq!(page, 3);
            assert!(matches!(*source, FetchError::Status { status: 500, .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_liked_songs_returns_all_pages() {
    let api = MockApi::start().await;
    api.json(
        "/me/tracks?limit=50",
        page(
            json!([
                { "added_at": "2024-01-01T00:00:00Z", "track": track("t1", "One", "a1") },
                { "added_at": "2024-01-02T00:00:00Z", "track": track("t2", "Two", "a1") }
            ]),
            3,
            Some("{base}/me/tracks?offset=2&limit=50"),
        ),
    );
    api.json(
        "/me/tracks?offset=2&limit=50",
        page(
            json!([{ "added_at": "2024-01-03T00:00:00Z", "track": track("t3", "Three", "a2") }]),
            3,
            None,
        ),
    );
    let client = api.client();
    let session = session();

    let liked = client.liked_songs(Some(&session)).await.unwrap();

    assert_eq!(liked.total, 3);
    let ids: Vec<&str> = liked.items.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t1", "t2", "t3"]);
}

#[tokio::test]
async fn test_playlist_by_id_collects_tracks() {
    let api = MockApi::start().await;
    api.json(
        "/playlists/p1",
        json!({
            "id": "p1",
            "name": "Road Trip",
            "description": "",
            "followers": { "total": 10 },
            "images": [],
            "owner": { "id": "owner-1", "display_name": "Owner" },
            "type": "playlist",
            "tracks": page(
                json!([{ "added_at": "2024-01-01T00:00:00Z", "track": track("t1", "One", "a1") }]),
                2,
                Some("{base}/playlists/p1/tracks?offset=1&limit=100"),
            )
        }),
    );
    api.json(
        "/playlists/p1/tracks?offset=1&limit=100",
        page(
            json!([{ "added_at": "2024-01-02T00:00:00Z", "track": track("t2", "Two", "a1") }]),
            2,
            None,
        ),
    );
    let client = api.client();
    let session = session();

    let playlist = client.playlist_by_id(Some(&session), "p1").await.unwrap();

    assert_eq!(playlist.name, "Road Trip");
    assert_eq!(playlist.tracks.total, 2);
    assert_eq!(playlist.tracks.items.len(), 2);
    assert_eq!(playlist.tracks.next, None);
    let second = playlist.tracks.items[1].track.as_ref().unwrap();
    assert_eq!(second.id, "t2");
}

#[tokio::test]
async fn test_liked_songs_marks_partial_result() {
    let api = MockApi::start().await;
    api.json(
        "/me/tracks?limit=50",
        page(
            json!([{ "added_at": "2024-01-01T00:00:00Z", "track": track("t1", "One", "a1") }]),
            2,
            Some("{base}/me/tracks?offset=1&limit=50"),
        ),
    );
    api.route("/me/tracks?offset=1&limit=50", 502, "");
    let client = api.client();
    let session = session();

    let liked = client.liked_songs(Some(&session)).await.unwrap();

    assert_eq!(liked.total, 2);
    assert_eq!(liked.items.len(), 1);
    assert!(!liked.is_complete());
    assert_eq!(
        liked.next.as_deref(),
        Some(format!("{}/me/tracks?offset=1&limit=50", api.base_url).as_str())
    );
}

#[tokio::test]
async fn test_playlist_keeps_reading_past_local_files() {
    let api = MockApi::start().await;
    let local = json!({
        "id": null,
        "name": "Home Recording",
        "is_local": true,
        "duration_ms": 180000,
        "album": { "id": null, "name": "", "artists": [], "images": [] },
        "artists": [{ "id": null, "name": "Me" }]
    });
    api.json(
        "/playlists/p1",
        json!({
            "id": "p1",
            "name": "Mixed",
            "owner": { "id": "owner-1" },
            "tracks": page(
                json!([
                    { "added_at": "2024-01-01T00:00:00Z", "track": track("t1", "One", "a1") },
                    { "added_at": "2024-01-02T00:00:00Z", "track": local.clone() }
                ]),
                4,
                Some("{base}/playlists/p1/tracks?offset=2&limit=100"),
            )
        }),
    );
    api.json(
        "/playlists/p1/tracks?offset=2&limit=100",
        page(
            json!([
                { "added_at": "2024-01-03T00:00:00Z", "track": local },
                { "added_at": "2024-01-04T00:00:00Z", "track": track("t4", "Four", "a1") }
            ]),
            4,
            None,
        ),
    );
    let client = api.client();
    let session = session();

    let playlist = client.playlist_by_id(Some(&session), "p1").await.unwrap();

    assert_eq!(playlist.tracks.items.len(), 4);
    assert!(playlist.tracks.next.is_none());
    let ids: Vec<&str> = playlist
        .tracks
        .items
        .iter()
        .filter_map(|item| item.track.as_ref())
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(ids, vec!["t1", "t4"]);
}
