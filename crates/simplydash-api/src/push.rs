//! Push channel for server-sent invalidation notices.
//!
//! The backend keeps one WebSocket open per dashboard and sends a plain
//! text frame whenever stored data changes: `update-config` or
//! `update-categories`. The client does not receive the new data over the
//! socket -- a notice is a hint to call [`ApiClient::get_config`] or
//! [`ApiClient::get_categories`] again.
//!
//! There is no reconnect. When the socket drops the subscription moves to
//! [`ConnectionState::Closed`] and stays there; callers that care watch
//! [`Subscription::state_changes`] and resubscribe.
//!
//! # Example
//!
//! ```rust,ignore
//! use simplydash_api::ApiClient;
//!
//! let client = ApiClient::new("http://192.168.1.90:8080")?;
//! let subscription = client.websocket(
//!     || println!("config changed"),
//!     || println!("categories changed"),
//! )?;
//!
//! subscription.closed().await;
//! ```

use futures_util::{SinkExt, StreamExt};
use strum::{AsRefStr, Display, EnumString};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};
use url::Url;

use crate::client::ApiClient;
use crate::error::Error;

const PUSH_PATH: &str = "api/ws";

// ── PushMessage ──────────────────────────────────────────────────────

/// A recognised notice from the push channel.
///
/// Matching is exact and case-sensitive: `"UPDATE-CONFIG"` or
/// `"update-config "` are not notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
pub enum PushMessage {
    #[strum(serialize = "update-config")]
    UpdateConfig,
    #[strum(serialize = "update-categories")]
    UpdateCategories,
}

impl PushMessage {
    /// Parse a text frame, returning `None` for anything unrecognised.
    pub fn parse(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

// ── ConnectionState ──────────────────────────────────────────────────

/// Lifecycle of a push subscription.
///
/// `Connecting -> Open -> Closed`, or `Connecting -> Closed` when the
/// handshake fails. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

// ── PushListener ─────────────────────────────────────────────────────

/// Receiver of push notices.
///
/// Methods run on the subscription's background task, one frame at a
/// time and in arrival order. Keep them short -- a slow listener delays
/// every later notice.
pub trait PushListener: Send + 'static {
    fn on_update_config(&mut self);
    fn on_update_categories(&mut self);
}

/// Pair of closures, as taken by [`ApiClient::websocket`].
struct Callbacks<C, G> {
    on_update_config: C,
    on_update_categories: G,
}

impl<C, G> PushListener for Callbacks<C, G>
where
    C: FnMut() + Send + 'static,
    G: FnMut() + Send + 'static,
{
    fn on_update_config(&mut self) {
        (self.on_update_config)();
    }

    fn on_update_categories(&mut self) {
        (self.on_update_categories)();
    }
}

/// Forward notices into a channel so an async consumer can refetch.
impl PushListener for mpsc::UnboundedSender<PushMessage> {
    fn on_update_config(&mut self) {
        let _ = self.send(PushMessage::UpdateConfig);
    }

    fn on_update_categories(&mut self) {
        let _ = self.send(PushMessage::UpdateCategories);
    }
}

// ── Subscription ─────────────────────────────────────────────────────

/// Handle to an open push channel.
///
/// Dropping the handle (or calling [`unsubscribe`](Self::unsubscribe))
/// closes the socket and stops the background task.
#[must_use = "dropping a Subscription closes the push channel"]
#[derive(Debug)]
pub struct Subscription {
    state_rx: watch::Receiver<ConnectionState>,
    cancel: CancellationToken,
}

impl Subscription {
    /// Open a push channel at an explicit WebSocket URL.
    ///
    /// Returns immediately; the handshake happens on a task spawned onto
    /// the current Tokio runtime. Fails with [`Error::WebSocketConnect`]
    /// when called outside one.
    pub fn open(url: Url, listener: impl PushListener) -> Result<Self, Error> {
        let runtime = Handle::try_current()
            .map_err(|e| Error::WebSocketConnect(format!("no async runtime for {url}: {e}")))?;

        let (state_tx, state_rx) = watch::channel(ConnectionState::Connecting);
        let cancel = CancellationToken::new();

        let task_cancel = cancel.clone();
        runtime.spawn(async move {
            run_channel(url, listener, state_tx, task_cancel).await;
        });

        Ok(Self { state_rx, cancel })
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        *self.state_rx.borrow()
    }

    /// A receiver that observes every state transition.
    pub fn state_changes(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    /// Wait until the channel has closed, for whatever reason.
    pub async fn closed(&self) {
        let mut rx = self.state_rx.clone();
        let _ = rx.wait_for(|state| *state == ConnectionState::Closed).await;
    }

    /// Close the channel. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// ── ApiClient entry points ───────────────────────────────────────────

impl ApiClient {
    /// WebSocket URL of the push channel: the backend host with `http`
    /// swapped for `ws` (`https` for `wss`) and path `/api/ws`.
    pub fn push_url(&self) -> Result<Url, Error> {
        let mut url = self.endpoint(PUSH_PATH)?;
        let scheme = match url.scheme() {
            "http" => "ws",
            "https" => "wss",
            other => other,
        }
        .to_owned();

        url.set_scheme(&scheme).map_err(|()| {
            Error::WebSocketConnect(format!("cannot use scheme '{scheme}' for {url}"))
        })?;
        Ok(url)
    }

    /// Open the push channel with one callback per notice type.
    ///
    /// Returns without waiting for the handshake. Frames that match
    /// neither notice are ignored. Must be called from within a Tokio
    /// runtime; otherwise this returns [`Error::WebSocketConnect`].
    pub fn websocket<C, G>(
        &self,
        on_update_config: C,
        on_update_categories: G,
    ) -> Result<Subscription, Error>
    where
        C: FnMut() + Send + 'static,
        G: FnMut() + Send + 'static,
    {
        self.subscribe(Callbacks {
            on_update_config,
            on_update_categories,
        })
    }

    /// Open the push channel with an arbitrary listener.
    pub fn subscribe(&self, listener: impl PushListener) -> Result<Subscription, Error> {
        Subscription::open(self.push_url()?, listener)
    }
}

// ── Background task ──────────────────────────────────────────────────

async fn run_channel(
    url: Url,
    mut listener: impl PushListener,
    state_tx: watch::Sender<ConnectionState>,
    cancel: CancellationToken,
) {
    match connect_and_read(&url, &mut listener, &state_tx, &cancel).await {
        Ok(()) => info!(url = %url, "push channel closed"),
        Err(e) => warn!(url = %url, error = %e, "push channel failed"),
    }
    state_tx.send_replace(ConnectionState::Closed);
}

/// Connect, then dispatch frames until the socket drops or we are cancelled.
async fn connect_and_read(
    url: &Url,
    listener: &mut impl PushListener,
    state_tx: &watch::Sender<ConnectionState>,
    cancel: &CancellationToken,
) -> Result<(), Error> {
    debug!(url = %url, "connecting push channel");

    let (ws_stream, _response) = tokio::select! {
        biased;
        () = cancel.cancelled() => return Ok(()),
        result = tokio_tungstenite::connect_async(url.as_str()) => {
            result.map_err(|e| Error::WebSocketConnect(e.to_string()))?
        }
    };

    state_tx.send_replace(ConnectionState::Open);
    info!(url = %url, "push channel open");

    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                let _ = write.send(Message::Close(None)).await;
                return Ok(());
            }
            frame = read.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        dispatch(&text, listener);
                    }
                    Some(Ok(Message::Close(frame))) => {
                        if let Some(cf) = frame {
                            debug!(code = %cf.code, reason = %cf.reason, "close frame received");
                        }
                        return Ok(());
                    }
                    Some(Ok(_)) => {
                        // Ping/Pong/Binary -- pongs are answered by tungstenite
                    }
                    Some(Err(e)) => return Err(Error::WebSocketConnect(e.to_string())),
                    None => return Ok(()),
                }
            }
        }
    }
}

/// Invoke the listener method matching `text`, if any.
fn dispatch(text: &str, listener: &mut impl PushListener) -> Option<PushMessage> {
    let message = PushMessage::parse(text);
    match message {
        Some(PushMessage::UpdateConfig) => listener.on_update_config(),
        Some(PushMessage::UpdateCategories) => listener.on_update_categories(),
        None => trace!(len = text.len(), "ignoring unrecognised push frame"),
    }
    message
}
