// Dashboard backend HTTP client
//
// Wraps `reqwest::Client` with URL construction relative to the backend
// host and JSON decoding into the model types. Holds no state beyond the
// host and the HTTP connection pool; concurrent calls are independent
// round trips.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::model::{Category, Config};
use crate::transport::TransportConfig;

/// Characters escaped in query values: everything except ASCII
/// alphanumerics and the unreserved marks `- _ . ! ~ * ' ( )`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a value for use in a query string.
pub(crate) fn encode_query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Typed client for the dashboard backend's HTTP API.
///
/// The backend host (scheme + authority, optionally a path prefix) is fixed
/// at construction. Every request method maps to one endpoint:
///
/// | Method | Endpoint |
/// |---|---|
/// | [`get_config`](Self::get_config) | `GET /api/config` |
/// | [`get_categories`](Self::get_categories) | `GET /api/categories` |
/// | [`healthcheck`](Self::healthcheck) | `GET /api/url/health?url=...` |
/// | [`server_health`](Self::server_health) | `GET /health` |
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client with the default transport (system TLS, no timeout).
    pub fn new(host: &str) -> Result<Self, Error> {
        Self::with_transport(host, &TransportConfig::default())
    }

    /// Create a client from a `TransportConfig`.
    pub fn with_transport(host: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(host, http)
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn from_reqwest(host: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(host)?;
        Ok(Self { http, base_url })
    }

    /// The backend host this client was bound to.
    pub fn host(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{host}/{path}`, keeping any path prefix on the host.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let full = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&full)?)
    }

    /// URL of the backend's cached copy of an icon.
    ///
    /// `GET /api/icon?url=...` -- no request is made here; the result is
    /// meant to be handed to whatever renders the icon.
    pub fn icon_url(&self, icon: &str) -> Result<Url, Error> {
        self.endpoint(&format!("api/icon?url={}", encode_query_value(icon)))
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Fetch the configuration document.
    ///
    /// `GET /api/config`
    pub async fn get_config(&self) -> Result<Config, Error> {
        let url = self.endpoint("api/config")?;
        self.get_json(url).await
    }

    /// Fetch all shortcut categories, in the order the backend sent them.
    ///
    /// `GET /api/categories`
    pub async fn get_categories(&self) -> Result<Vec<Category>, Error> {
        let url = self.endpoint("api/categories")?;
        self.get_json(url).await
    }

    /// Probe `target` through the backend and return the status it reports.
    ///
    /// `GET /api/url/health?url=<target>`
    ///
    /// An unreachable target shows up as a non-2xx status, not an error;
    /// only failing to reach the backend itself is an `Err`. The body is
    /// discarded.
    pub async fn healthcheck(&self, target: &str) -> Result<u16, Error> {
        let url = self.endpoint(&format!("api/url/health?url={}", encode_query_value(target)))?;
        self.get_status(url).await
    }

    /// Liveness of the backend itself.
    ///
    /// `GET /health`
    pub async fn server_health(&self) -> Result<u16, Error> {
        let url = self.endpoint("health")?;
        self.get_status(url).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the body as JSON, whatever the status.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (HTTP {status})"),
            body,
        })
    }

    /// Send a GET request and return only the status code.
    async fn get_status(&self, url: Url) -> Result<u16, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        let status = resp.status().as_u16();
        debug!(status, "healthcheck answered");
        Ok(status)
    }
}
