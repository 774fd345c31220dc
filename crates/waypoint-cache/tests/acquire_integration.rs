//! Integration tests for the read-through acquire path
//!
//! These drive CachedWaypointClient against a local mock server and a
//! tempdir-backed store, asserting remote call counts per path.

use std::time::{SystemTime, UNIX_EPOCH};

use tempfile::TempDir;
use waypoint_cache::{CachedWaypointClient, LocalBlobStore, LocalPlayerIndex, SeenPlayer};
use waypoint_client::{HttpClient, Title, VariantClass};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FRESH_RECORD: &str = r#"{"Status": 1, "Gamertag": "Noble Six", "TotalKills": 100}"#;
const UPDATED_RECORD: &str = r#"{"Status": 1, "Gamertag": "Noble Six", "TotalKills": 200}"#;

async fn cached_client(server: &MockServer, temp: &TempDir) -> CachedWaypointClient {
    let client = HttpClient::new(Title::Reach)
        .unwrap()
        .with_base_url(server.uri())
        .unwrap();
    let store = LocalBlobStore::with_root(temp.path().join("blobs"))
        .await
        .unwrap();
    let index = LocalPlayerIndex::with_root(temp.path().join("known-players"))
        .await
        .unwrap();
    CachedWaypointClient::with_parts(client, store, index)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Seed a stored entry whose sidecar says it was written `age_secs` ago
async fn seed_blob(temp: &TempDir, key: &str, body: &str, age_secs: u64) {
    let payload = temp.path().join("blobs").join(key);
    tokio::fs::create_dir_all(payload.parent().unwrap())
        .await
        .unwrap();
    tokio::fs::write(&payload, body).await.unwrap();

    let meta = serde_json::json!({
        "cached_at": unix_now() - age_secs,
        "size": body.len(),
    });
    tokio::fs::write(payload.with_extension("meta"), meta.to_string())
        .await
        .unwrap();
}

async fn read_blob(temp: &TempDir, key: &str) -> String {
    tokio::fs::read_to_string(temp.path().join("blobs").join(key))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_fresh_entry_served_without_fetch() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    // Service record TTL is 8 minutes; one minute old is fresh.
    seed_blob(
        &temp,
        "player-service-record/noble-six.json",
        FRESH_RECORD,
        60,
    )
    .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = cached_client(&server, &temp).await;
    let record = client.service_record("Noble Six").await.unwrap();

    assert_eq!(record.total_kills, Some(100));
    assert_eq!(client.stats().hits, 1);
    assert_eq!(client.stats().misses, 0);

    server.verify().await;
}

#[tokio::test]
async fn test_stale_entry_refreshes_exactly_once() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    // Nine minutes old is past the 8 minute TTL.
    seed_blob(
        &temp,
        "player-service-record/noblesix.json",
        FRESH_RECORD,
        9 * 60,
    )
    .await;

    Mock::given(method("GET"))
        .and(path(
            "/reach/reachapijson.svc/player/details/byplaylist/waypoint/NobleSix",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(UPDATED_RECORD))
        .expect(1)
        .mount(&server)
        .await;

    let client = cached_client(&server, &temp).await;
    let record = client.service_record("NobleSix").await.unwrap();

    assert_eq!(record.total_kills, Some(200));

    // The refresh was persisted with a new write timestamp.
    let stored = read_blob(&temp, "player-service-record/noblesix.json").await;
    assert_eq!(stored, UPDATED_RECORD);

    let meta: serde_json::Value = serde_json::from_str(
        &tokio::fs::read_to_string(
            temp.path()
                .join("blobs/player-service-record/noblesix.meta"),
        )
        .await
        .unwrap(),
    )
    .unwrap();
    assert!(meta["cached_at"].as_u64().unwrap() >= unix_now() - 5);

    server.verify().await;
}

#[tokio::test]
async fn test_miss_populates_cache_and_index() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(UPDATED_RECORD))
        .expect(1)
        .mount(&server)
        .await;

    let client = cached_client(&server, &temp).await;
    let record = client.service_record("Noble Six").await.unwrap();

    assert_eq!(record.gamertag, "Noble Six");

    // Payload landed under the normalized key.
    let stored = read_blob(&temp, "player-service-record/noble-six.json").await;
    assert_eq!(stored, UPDATED_RECORD);

    // The discovery index saw the player.
    let indexed: SeenPlayer = serde_json::from_str(
        &tokio::fs::read_to_string(temp.path().join("known-players/noble-six.json"))
            .await
            .unwrap(),
    )
    .unwrap();
    assert_eq!(indexed.gamertag, "noble-six");

    let stats = client.stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.refreshes, 1);
}

#[tokio::test]
async fn test_game_history_uses_its_own_key_and_ttl() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    // Six minutes old: stale for game history (5 min TTL) even though the
    // same age would be fresh for a service record.
    seed_blob(
        &temp,
        "player-game-history/noblesix.json",
        r#"{"Status": 1, "Games": [{"GameId": 1}]}"#,
        6 * 60,
    )
    .await;

    Mock::given(method("GET"))
        .and(path(
            "/reach/reachapijson.svc/player/gamehistory/waypoint/NobleSix/Arena/0",
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"Status": 1, "Games": [{"GameId": 2}]}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = cached_client(&server, &temp).await;
    let history = client
        .game_history("NobleSix", VariantClass::Arena, 0)
        .await
        .unwrap();

    assert_eq!(history.games[0].game_id, 2);
    server.verify().await;
}

#[tokio::test]
async fn test_global_singleton_lands_under_fixed_name() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/reach/reachapijson.svc/game/metadata/waypoint"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"Status": 0, "Maps": [{"MapId": 1, "Name": "Sword Base"}]}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = cached_client(&server, &temp).await;
    let metadata = client.metadata().await.unwrap();

    assert_eq!(metadata.maps[0].name, "Sword Base");
    assert!(temp.path().join("blobs/other/metadata.json").exists());

    // No player sighting for a global resource.
    let mut index_entries = tokio::fs::read_dir(temp.path().join("known-players"))
        .await
        .unwrap();
    assert!(index_entries.next_entry().await.unwrap().is_none());
}

#[tokio::test]
async fn test_force_refresh_ignores_freshness() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    // One minute old: comfortably fresh under the 14 minute global TTL.
    seed_blob(
        &temp,
        "other/playlists.json",
        r#"{"Status": 0, "Playlists": [{"PlaylistId": 1, "Name": "Old"}]}"#,
        60,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/reach/reachapijson.svc/game/playlists/waypoint"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(
                r#"{"Status": 0, "Playlists": [{"PlaylistId": 2, "Name": "New"}]}"#,
            ),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = cached_client(&server, &temp).await;
    let playlists = client.refresh_playlists().await.unwrap();

    assert_eq!(playlists.playlists[0].name, "New");

    // The follow-up read is a plain cache hit.
    let again = client.playlists().await.unwrap();
    assert_eq!(again.playlists[0].name, "New");
    assert_eq!(client.stats().hits, 1);

    server.verify().await;
}
