//! WebSocket endpoint that relays every hub event to connected clients.
//!
//! Clients never send application messages; anything received other than a
//! close frame is ignored.

use axum::{
    Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
    routing::get,
};
use futures::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::sync::{broadcast::error::RecvError, mpsc};
use util::ws::Hub;

use crate::state::AppState;

/// Interval between server ping frames.
pub const PING_INTERVAL: Duration = Duration::from_secs(30);

/// - `GET /ws` → upgrade and subscribe to the hub
pub fn ws_routes() -> Router<AppState> {
    Router::new().route("/ws", get(ws_handler))
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let hub = state.hub().clone();
    ws.on_upgrade(move |socket| serve_socket(socket, hub))
}

async fn serve_socket(socket: WebSocket, hub: Hub) {
    let mut rx = hub.subscribe();
    let (mut sink, mut stream) = socket.split();

    // Single writer so the forwarder and the pinger never interleave sends.
    let (out_tx, mut out_rx) = mpsc::channel::<Message>(64);
    let mut writer_task = tokio::spawn(async move {
        while let Some(frame) = out_rx.recv().await {
            if sink.send(frame).await.is_err() {
                break;
            }
        }
    });

    let forward_task = {
        let out_tx = out_tx.clone();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(msg) => {
                        if out_tx.send(Message::Text(msg.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("WebSocket client lagged, skipped {skipped} messages");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    };

    let ping_task = {
        let out_tx = out_tx.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(PING_INTERVAL);
            interval.tick().await;
            loop {
                interval.tick().await;
                if out_tx.send(Message::Ping(Vec::new().into())).await.is_err() {
                    break;
                }
            }
        })
    };
    drop(out_tx);

    tracing::debug!("WebSocket client connected ({} subscribers)", hub.subscriber_count());

    loop {
        tokio::select! {
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!("WebSocket receive error: {e}");
                    break;
                }
            },
            _ = &mut writer_task => break,
        }
    }

    forward_task.abort();
    ping_task.abort();
    writer_task.abort();
    tracing::debug!("WebSocket client disconnected");
}
