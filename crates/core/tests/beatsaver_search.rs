//! End-to-end searches through the HTTP catalog client against a stub server.
//!
//! The newest map has key `0`, so every draw lands on `/maps/detail/0` and
//! the request counts are deterministic.

use std::sync::Arc;

use mockito::Server;
use randomsong_core::{
    BeatSaverClient, BeatSaverConfig, FilterCriteria, KeySampler, MemoryLibrary, NoLibrary,
    RandomSelector, SearchOutcome, SelectorConfig,
};

fn map_json(key: &str, bpm: f64, expert_plus: bool) -> String {
    format!(
        r#"{{
            "metadata": {{
                "difficulties": {{"easy": false, "normal": true, "hard": true, "expert": true, "expertPlus": {expert_plus}}},
                "duration": 184.0,
                "songName": "Test Song",
                "songSubName": "",
                "songAuthorName": "Test Artist",
                "levelAuthorName": "Test Mapper",
                "bpm": {bpm}
            }},
            "stats": {{"downloads": 900, "plays": 50, "downVotes": 2, "upVotes": 40, "rating": 0.88}},
            "key": "{key}",
            "name": "Test Map",
            "hash": "0123456789ABCDEF0123456789ABCDEF01234567"
        }}"#
    )
}

fn selector(base_url: String, max_retries: u32) -> RandomSelector {
    let client = BeatSaverClient::new(BeatSaverConfig {
        base_url,
        rate_limit_ms: 0,
        ..Default::default()
    })
    .unwrap();

    RandomSelector::new(
        Arc::new(client),
        Arc::new(NoLibrary),
        SelectorConfig {
            max_retries,
            ..Default::default()
        },
    )
    .with_sampler(KeySampler::with_seed(1))
}

#[tokio::test]
async fn test_deleted_map_exhausts_budget() {
    let mut server = Server::new_async().await;
    let latest = server
        .mock("GET", "/maps/latest/0")
        .with_status(200)
        .with_body(format!(r#"{{"docs": [{}]}}"#, map_json("0", 128.0, true)))
        .expect(1)
        .create_async()
        .await;
    let detail = server
        .mock("GET", "/maps/detail/0")
        .with_status(404)
        .with_body("Not Found")
        .expect(3)
        .create_async()
        .await;

    let outcome = selector(server.url(), 3).find_with_defaults(None).await;

    assert!(matches!(outcome, SearchOutcome::Exhausted { attempts: 3 }));
    latest.assert_async().await;
    detail.assert_async().await;
}

#[tokio::test]
async fn test_first_acceptable_map_is_returned() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/maps/latest/0")
        .with_status(200)
        .with_body(format!(r#"{{"docs": [{}]}}"#, map_json("0", 128.0, true)))
        .create_async()
        .await;
    let detail = server
        .mock("GET", "/maps/detail/0")
        .with_status(200)
        .with_body(map_json("0", 128.0, true))
        .expect(1)
        .create_async()
        .await;

    let criteria = FilterCriteria {
        expert_plus: true,
        min_rating: 0.8,
        ..Default::default()
    };
    let outcome = selector(server.url(), 5)
        .find_random_acceptable_item(Some(&criteria), 5)
        .await;

    let item = outcome.into_item().expect("expected an accepted map");
    assert_eq!(item.id, "0");
    assert_eq!(item.metadata.duration, 184.0);
    assert_eq!(
        item.hash.as_deref(),
        Some("0123456789abcdef0123456789abcdef01234567")
    );
    detail.assert_async().await;
}

#[tokio::test]
async fn test_filtered_out_map_consumes_every_attempt() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/maps/latest/0")
        .with_status(200)
        .with_body(format!(r#"{{"docs": [{}]}}"#, map_json("0", 128.0, false)))
        .create_async()
        .await;
    let detail = server
        .mock("GET", "/maps/detail/0")
        .with_status(200)
        .with_body(map_json("0", 128.0, false))
        .expect(4)
        .create_async()
        .await;

    let criteria = FilterCriteria {
        expert_plus: true,
        ..Default::default()
    };
    let outcome = selector(server.url(), 4)
        .find_random_acceptable_item(Some(&criteria), 4)
        .await;

    assert!(matches!(outcome, SearchOutcome::Exhausted { attempts: 4 }));
    detail.assert_async().await;
}

#[tokio::test]
async fn test_owned_map_is_skipped() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/maps/latest/0")
        .with_status(200)
        .with_body(format!(r#"{{"docs": [{}]}}"#, map_json("0", 128.0, true)))
        .create_async()
        .await;
    server
        .mock("GET", "/maps/detail/0")
        .with_status(200)
        .with_body(map_json("0", 128.0, true))
        .expect(2)
        .create_async()
        .await;

    let client = BeatSaverClient::new(BeatSaverConfig {
        base_url: server.url(),
        rate_limit_ms: 0,
        ..Default::default()
    })
    .unwrap();
    let selector = RandomSelector::new(
        Arc::new(client),
        Arc::new(MemoryLibrary::with_ids(["0"])),
        SelectorConfig::default(),
    );

    let outcome = selector
        .find_random_acceptable_item(Some(&FilterCriteria::default()), 2)
        .await;

    assert!(matches!(outcome, SearchOutcome::Exhausted { attempts: 2 }));
}

#[tokio::test]
async fn test_server_error_on_latest_is_unreachable() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/maps/latest/0")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;
    let detail = server
        .mock("GET", "/maps/detail/0")
        .expect(0)
        .create_async()
        .await;

    let outcome = selector(server.url(), 20).find_with_defaults(None).await;

    match outcome {
        SearchOutcome::Unreachable { reason } => assert!(reason.contains("500")),
        other => panic!("expected unreachable, got {:?}", other),
    }
    detail.assert_async().await;
}

#[tokio::test]
async fn test_empty_catalog_is_unreachable() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/maps/latest/0")
        .with_status(200)
        .with_body(r#"{"docs": []}"#)
        .create_async()
        .await;

    let outcome = selector(server.url(), 20).find_with_defaults(None).await;

    assert_eq!(outcome.label(), "unreachable");
}
