// Integration tests for the ZeroTier API client against a mock server.

use anyhow::Result;
use chrono::{Local, TimeZone, Utc};
use tempfile::TempDir;

use my_zt::config::{Config, ConfigStore};
use my_zt::zerotier::{ApiError, ZeroTier};

const NETWORKS_BODY: &str = r#"[
    {
        "id": "net-123",
        "description": "home lab",
        "authorizedMemberCount": 2,
        "config": { "name": "lab", "creationTime": 1700000000000 }
    },
    {
        "id": "net-456",
        "description": "",
        "authorizedMemberCount": 0,
        "config": { "name": "spare", "creationTime": 1600000000000 }
    }
]"#;

const MEMBERS_BODY: &str = r#"[
    {
        "id": "net-123-aa11bb22cc",
        "name": "laptop",
        "description": "work laptop",
        "lastSeen": 1700000000000,
        "physicalAddress": "203.0.113.7/9993",
        "clientVersion": "1.12.2",
        "config": {
            "id": "aa11bb22cc",
            "ipAssignments": ["10.147.17.20", "10.147.17.5"]
        }
    },
    {
        "id": "net-123-dd33ee44ff",
        "name": "nas",
        "description": "",
        "lastSeen": 1699990000000,
        "physicalAddress": null,
        "clientVersion": "1.12.1",
        "config": {
            "id": "dd33ee44ff",
            "ipAssignments": ["10.147.17.30"]
        }
    }
]"#;

fn client_against(server: &mockito::Server, token: Option<&str>) -> (TempDir, ZeroTier) {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfigStore::at_path(dir.path().join(".my-zt.toml"));
    store
        .save(&Config {
            zerotier_token: token.map(str::to_string),
            preferred_network_id: None,
        })
        .unwrap();
    let zt = ZeroTier::with_base_url(store, server.url()).unwrap();
    (dir, zt)
}

#[tokio::test]
async fn test_list_networks_maps_fields_and_preserves_order() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/network")
        .match_header("authorization", "token tok-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(NETWORKS_BODY)
        .create_async()
        .await;

    let (_dir, zt) = client_against(&server, Some("tok-1"));
    let networks = zt.list_networks().await?;
    mock.assert_async().await;

    assert_eq!(networks.len(), 2);
    assert_eq!(networks[0].id, "net-123");
    assert_eq!(networks[0].name, "lab");
    assert_eq!(networks[0].description, "home lab");
    assert_eq!(networks[0].authorized_member_count, 2);

    // creationTime 1700000000000 → the calendar date of that instant in
    // this machine's local zone, at day granularity.
    let expected = Utc
        .timestamp_millis_opt(1_700_000_000_000)
        .unwrap()
        .with_timezone(&Local)
        .date_naive();
    assert_eq!(networks[0].created_date, expected);

    // Service order, no client-side sort.
    assert_eq!(networks[1].id, "net-456");
    Ok(())
}

#[tokio::test]
async fn test_list_members_maps_fields() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/network/net-123/member")
        .match_header("authorization", "token tok-1")
        .with_status(200)
        .with_body(MEMBERS_BODY)
        .create_async()
        .await;

    let (_dir, zt) = client_against(&server, Some("tok-1"));
    let members = zt.list_members("net-123").await?;

    assert_eq!(members.len(), 2);
    assert_eq!(members[0].id, "aa11bb22cc");
    assert_eq!(members[0].name, "laptop");
    assert_eq!(members[0].client_version, "1.12.2");
    assert_eq!(members[0].physical_address, "203.0.113.7/9993");
    assert_eq!(
        members[0].ip_assignments,
        vec!["10.147.17.20", "10.147.17.5"]
    );

    // lastSeen keeps its time component, unlike the network creation date.
    let expected = Utc
        .timestamp_millis_opt(1_700_000_000_000)
        .unwrap()
        .with_timezone(&Local);
    assert_eq!(members[0].last_seen, expected);

    // Null physicalAddress decodes to an empty string, not an error.
    assert_eq!(members[1].physical_address, "");
    Ok(())
}

#[tokio::test]
async fn test_non_success_status_surfaces_body_text() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/network")
        .with_status(401)
        .with_body("invalid token")
        .create_async()
        .await;

    let (_dir, zt) = client_against(&server, Some("tok-bad"));
    match zt.list_networks().await {
        Err(ApiError::RemoteService(text)) => {
            assert!(text.contains("invalid token"), "got: {text}");
        }
        other => panic!("expected RemoteService error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_member_endpoint_shares_failure_semantics() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/network/net-123/member")
        .with_status(401)
        .with_body("invalid token")
        .create_async()
        .await;

    let (_dir, zt) = client_against(&server, Some("tok-bad"));
    match zt.list_members("net-123").await {
        Err(ApiError::RemoteService(text)) => assert!(text.contains("invalid token")),
        other => panic!("expected RemoteService error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/network")
        .with_status(200)
        .with_body("{\"not\": \"an array\"}")
        .create_async()
        .await;

    let (_dir, zt) = client_against(&server, Some("tok-1"));
    assert!(matches!(
        zt.list_networks().await,
        Err(ApiError::Decode(_))
    ));
}

#[tokio::test]
async fn test_token_is_read_fresh_on_every_call() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let first = server
        .mock("GET", "/network")
        .match_header("authorization", "token tok-old")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    let second = server
        .mock("GET", "/network")
        .match_header("authorization", "token tok-new")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let (_dir, zt) = client_against(&server, Some("tok-old"));
    zt.list_networks().await?;

    // Update the token through the same surface the settings screen uses;
    // the next call must carry it without rebuilding the client.
    let mut config = zt.load_config()?;
    config.zerotier_token = Some("tok-new".to_string());
    zt.save_config(&config)?;
    zt.list_networks().await?;

    first.assert_async().await;
    second.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_missing_token_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/network")
        .expect(0)
        .create_async()
        .await;

    let (_dir, zt) = client_against(&server, None);
    assert!(matches!(
        zt.list_networks().await,
        Err(ApiError::TokenMissing)
    ));
    mock.assert_async().await;
}
