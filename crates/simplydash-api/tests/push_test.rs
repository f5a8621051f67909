// Integration tests for the push channel against an in-process
// WebSocket server.
#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;

use simplydash_api::{ApiClient, ConnectionState, PushMessage};

// ── Helpers ─────────────────────────────────────────────────────────

/// Accept one WebSocket connection and send `frames`, then close.
///
/// The server waits on `go` before sending so the test can observe the
/// `Open` state first. Returns the backend host for the client.
async fn serve_frames(frames: Vec<&'static str>, go: oneshot::Receiver<()>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        let _ = go.await;
        for frame in frames {
            ws.send(Message::text(frame)).await.unwrap();
        }
        ws.close(None).await.unwrap();
        // Drain until the client acknowledges the close.
        while let Some(Ok(_)) = ws.next().await {}
    });

    format!("http://{addr}")
}

fn counters() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
    (Arc::new(AtomicUsize::new(0)), Arc::new(AtomicUsize::new(0)))
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_notices_invoke_matching_callbacks_once() {
    let (go_tx, go_rx) = oneshot::channel();
    let host = serve_frames(
        vec![
            "update-config",
            "",
            "update-config ",
            "UPDATE-CONFIG",
            "update-categories",
            "hello",
        ],
        go_rx,
    )
    .await;

    let client = ApiClient::new(&host).unwrap();
    let (config_hits, category_hits) = counters();
    let (c, g) = (Arc::clone(&config_hits), Arc::clone(&category_hits));

    let subscription = client
        .websocket(
            move || {
                c.fetch_add(1, Ordering::SeqCst);
            },
            move || {
                g.fetch_add(1, Ordering::SeqCst);
            },
        )
        .unwrap();

    let mut states = subscription.state_changes();
    states
        .wait_for(|s| *s == ConnectionState::Open)
        .await
        .unwrap();
    go_tx.send(()).unwrap();

    tokio::time::timeout(Duration::from_secs(5), subscription.closed())
        .await
        .unwrap();

    assert_eq!(config_hits.load(Ordering::SeqCst), 1);
    assert_eq!(category_hits.load(Ordering::SeqCst), 1);
    assert_eq!(subscription.state(), ConnectionState::Closed);
}

#[tokio::test]
async fn test_notices_arrive_in_order() {
    let (go_tx, go_rx) = oneshot::channel();
    let host = serve_frames(
        vec!["update-categories", "update-config", "update-categories"],
        go_rx,
    )
    .await;
    go_tx.send(()).unwrap();

    let client = ApiClient::new(&host).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel::<PushMessage>();
    let subscription = client.subscribe(tx).unwrap();

    tokio::time::timeout(Duration::from_secs(5), subscription.closed())
        .await
        .unwrap();

    let mut received = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        received.push(msg);
    }
    assert_eq!(
        received,
        [
            PushMessage::UpdateCategories,
            PushMessage::UpdateConfig,
            PushMessage::UpdateCategories,
        ]
    );
}

#[tokio::test]
async fn test_unsubscribe_closes_channel() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (closed_tx, closed_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        let mut saw_close = false;
        while let Some(Ok(frame)) = ws.next().await {
            if frame.is_close() {
                saw_close = true;
                break;
            }
        }
        let _ = closed_tx.send(saw_close);
    });

    let client = ApiClient::new(&format!("http://{addr}")).unwrap();
    let subscription = client.websocket(|| {}, || {}).unwrap();
    let mut states = subscription.state_changes();
    states
        .wait_for(|s| *s == ConnectionState::Open)
        .await
        .unwrap();

    subscription.unsubscribe();

    let saw_close = tokio::time::timeout(Duration::from_secs(5), closed_rx)
        .await
        .unwrap()
        .unwrap();
    assert!(saw_close, "server should receive a close frame");
    states
        .wait_for(|s| *s == ConnectionState::Closed)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_websocket_returns_before_handshake() {
    // Bound but never accepting: the handshake cannot complete.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let client = ApiClient::new(&format!("http://{addr}")).unwrap();
    let subscription = client.websocket(|| {}, || {}).unwrap();

    assert_eq!(subscription.state(), ConnectionState::Connecting);
    drop(listener);
}
