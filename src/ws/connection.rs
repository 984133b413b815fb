//! WebSocket connection loops.
//!
//! Each upgraded socket gets a writer task draining its outbound queue and
//! a read loop feeding decoded events into its [`Session`].

use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{Sink, SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::domain::{ConnectionHandle, DisplayName, InboundEvent, RoomId};
use crate::service::{Broadcaster, Session};

/// How long a closing connection waits for queued frames to flush.
const WRITER_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Runs one connection from join to termination.
///
/// - Spawns a writer forwarding queued frames to the socket.
/// - Joins `room` as `name`.
/// - Reads client frames until the socket closes or errors.
/// - Closes the session, lets the writer flush and send a Close frame,
///   and aborts it only if that stalls.
pub async fn run_connection(
    socket: WebSocket,
    room: RoomId,
    name: DisplayName,
    broadcaster: Broadcaster,
    outbound_capacity: usize,
) {
    let (ws_tx, mut ws_rx) = socket.split();
    let (handle, outbound_rx) = ConnectionHandle::channel(outbound_capacity);
    let conn = handle.id();

    let mut writer = tokio::spawn(forward_frames(ws_tx, outbound_rx));

    let mut session = Session::new(handle, broadcaster);
    if let Err(e) = session.join(room, name).await {
        tracing::warn!(%conn, error = %e, "join failed");
    }

    while let Some(msg) = ws_rx.next().await {
        let frame = match msg {
            Ok(Message::Text(text)) => InboundEvent::decode(text.as_str()),
            Ok(Message::Binary(bytes)) => std::str::from_utf8(&bytes)
                .ok()
                .and_then(InboundEvent::decode),
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!(%conn, error = %e, "ws read failed");
                break;
            }
        };
        match frame {
            Some(event) => session.handle_event(event).await,
            None => tracing::debug!(%conn, "undecodable frame dropped"),
        }
    }

    session.close().await;
    // Last owned sender; once in-flight broadcast snapshots drop theirs the
    // outbound queue ends and the writer closes the socket.
    drop(session);
    if tokio::time::timeout(WRITER_DRAIN_TIMEOUT, &mut writer)
        .await
        .is_err()
    {
        tracing::debug!(%conn, "writer did not drain in time; aborting");
        writer.abort();
    }
    tracing::debug!(%conn, "ws connection closed");
}

/// Forwards queued frames into `sink` until the queue ends or a send
/// fails, then closes the sink and hands it back.
async fn forward_frames<S>(mut sink: S, mut outbound_rx: mpsc::Receiver<String>) -> S
where
    S: Sink<Message> + Unpin,
{
    while let Some(frame) = outbound_rx.recv().await {
        if sink.send(Message::text(frame)).await.is_err() {
            break;
        }
    }
    let _ = sink.close().await;
    sink
}
