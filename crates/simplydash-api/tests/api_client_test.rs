// Integration tests for `ApiClient` using wiremock.
#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use simplydash_api::model::{Category, Config, Item};
use simplydash_api::{ApiClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Config ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_config() {
    let (server, client) = setup().await;

    let body = json!({
        "settings": {
            "name": "homelab",
            "enable_health_indicators": true,
            "theme": {
                "light": {
                    "background": "white",
                    "element_background": "snow",
                    "foreground": "black",
                    "foreground_secondary": "gray",
                    "accent_color": "blue",
                    "success_color": "green",
                    "warning_color": "orange",
                    "error_color": "red"
                },
                "dark": {
                    "background": "black",
                    "element_background": "#111",
                    "foreground": "white",
                    "foreground_secondary": "silver",
                    "accent_color": "skyblue",
                    "success_color": "lime",
                    "warning_color": "gold",
                    "error_color": "crimson"
                }
            }
        },
        "files": [{ "path": "/config/categories.yaml", "watch": true }]
    });

    Mock::given(method("GET"))
        .and(path("/api/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let config: Config = client.get_config().await.unwrap();

    assert_eq!(config.settings.name, "homelab");
    assert!(config.settings.enable_health_indicators);
    assert_eq!(config.settings.theme.light.background, "white");
    assert_eq!(config.settings.theme.dark.error_color, "crimson");
}

#[tokio::test]
async fn test_get_config_default_document() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Config::default()))
        .mount(&server)
        .await;

    assert_eq!(client.get_config().await.unwrap(), Config::default());
}

// ── Categories ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_categories_preserves_order() {
    let (server, client) = setup().await;

    let body = json!([
        {
            "name": "Media",
            "items": [
                { "name": "Plex", "url": "http://plex:32400", "icon": "plex", "description": "Movies" },
                { "name": "Audiobookshelf", "url": "http://abs", "icon": "audiobookshelf", "description": "Books" }
            ]
        },
        { "name": "Admin" },
        {
            "name": "Network",
            "items": [{ "name": "Router", "url": "http://192.168.1.1" }]
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let categories: Vec<Category> = client.get_categories().await.unwrap();

    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Media", "Admin", "Network"]);
    assert_eq!(
        categories[0].items,
        vec![
            Item::new("Plex", "http://plex:32400", "plex", "Movies"),
            Item::new("Audiobookshelf", "http://abs", "audiobookshelf", "Books"),
        ]
    );
    assert!(categories[1].items.is_empty());
    assert_eq!(categories[2].items[0].icon, "");
}

#[tokio::test]
async fn test_get_categories_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let categories = client.get_categories().await.unwrap();
    assert!(categories.is_empty());
}

// ── Healthcheck ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_healthcheck_returns_backend_status() {
    let (server, client) = setup().await;

    for status in [200_u16, 204, 401, 404, 500, 503] {
        let target = format!("http://svc-{status}.lan/");
        Mock::given(method("GET"))
            .and(path("/api/url/health"))
            .and(query_param("url", target.as_str()))
            .respond_with(ResponseTemplate::new(status).set_body_string("ignored"))
            .mount(&server)
            .await;

        assert_eq!(client.healthcheck(&target).await.unwrap(), status);
    }
}

#[tokio::test]
async fn test_healthcheck_encodes_target_once() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/url/health"))
        .and(query_param("url", "http://a b/c?d=e&f=g"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client.healthcheck("http://a b/c?d=e&f=g").await.unwrap(), 200);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some("url=http%3A%2F%2Fa%20b%2Fc%3Fd%3De%26f%3Dg")
    );
}

#[tokio::test]
async fn test_server_health() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert_eq!(client.server_health().await.unwrap(), 200);
}

// ── Error handling ──────────────────────────────────────────────────

#[tokio::test]
async fn test_non_json_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/config"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client.get_config().await.unwrap_err();
    match err {
        Error::Deserialization { message, body } => {
            assert!(message.contains("502"), "message should carry the status: {message}");
            assert_eq!(body, "<html>Bad Gateway</html>");
        }
        other => panic!("expected Deserialization, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_wrong_shape_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "not a list" })))
        .mount(&server)
        .await;

    let err = client.get_categories().await.unwrap_err();
    assert!(err.is_decode(), "expected decode error, got: {err:?}");
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let client = ApiClient::new("http://127.0.0.1:1").unwrap();

    let err = client.healthcheck("http://example.com").await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got: {err:?}");
    assert!(err.is_transient());
}
