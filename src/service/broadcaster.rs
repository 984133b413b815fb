//! Room fan-out: deliver one message to every current member.

use std::sync::Arc;

use crate::domain::{RoomId, RoomMessage, RoomRegistry, presence};

/// Outcome of a single [`Broadcaster::broadcast`] call.
///
/// Purely informational; failed deliveries are never retried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Members whose outbound queue accepted the frame.
    pub delivered: usize,
    /// Members whose connection was closed or saturated.
    pub failed: usize,
}

/// Best-effort fan-out over the [`RoomRegistry`].
///
/// Every call takes a membership snapshot under the registry lock, then
/// delivers to each member after the lock is released. A failure for one
/// member is logged and skipped; that member's own read loop is left to
/// notice the dead connection and leave the room.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    registry: Arc<RoomRegistry>,
}

impl Broadcaster {
    /// Creates a broadcaster over the given registry.
    #[must_use]
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Returns a reference to the inner [`RoomRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }

    /// Delivers `message` to every member of `room`.
    ///
    /// A room with no members is a silent no-op.
    pub async fn broadcast(&self, room: &RoomId, message: &RoomMessage) -> DeliveryReport {
        let members = self.registry.snapshot_members(room).await;
        if members.is_empty() {
            return DeliveryReport::default();
        }

        let frame = match message.encode() {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!(%room, kind = message.kind(), error = %e, "failed to encode message");
                return DeliveryReport::default();
            }
        };

        let mut report = DeliveryReport::default();
        for member in &members {
            match member.handle.send(frame.clone()) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::debug!(
                        %room,
                        conn = %member.handle.id(),
                        error = %e,
                        "delivery failed; skipping member"
                    );
                }
            }
        }

        tracing::trace!(
            %room,
            kind = message.kind(),
            delivered = report.delivered,
            failed = report.failed,
            "broadcast complete"
        );
        report
    }

    /// Broadcasts the current roster of `room` as a presence message.
    pub async fn broadcast_presence(&self, room: &RoomId) -> DeliveryReport {
        let users = presence::presence(&self.registry, room).await;
        self.broadcast(room, &RoomMessage::Presence { users }).await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionHandle, DisplayName};

    fn room(raw: &str) -> RoomId {
        let Ok(id) = RoomId::parse(raw) else {
            panic!("valid room id");
        };
        id
    }

    fn name(raw: &str) -> DisplayName {
        let Ok(n) = DisplayName::parse(raw) else {
            panic!("valid name");
        };
        n
    }

    fn system(text: &str) -> RoomMessage {
        RoomMessage::System {
            message: text.to_string(),
        }
    }

    #[tokio::test]
    async fn empty_room_is_a_no_op() {
        let broadcaster = Broadcaster::new(Arc::new(RoomRegistry::new()));
        let report = broadcaster.broadcast(&room("ghost"), &system("hello")).await;
        assert_eq!(report, DeliveryReport::default());
    }

    #[tokio::test]
    async fn delivers_to_every_member_once() {
        let registry = Arc::new(RoomRegistry::new());
        let broadcaster = Broadcaster::new(Arc::clone(&registry));
        let r1 = room("r1");
        let (a, mut rx_a) = ConnectionHandle::channel(8);
        let (b, mut rx_b) = ConnectionHandle::channel(8);
        registry.join(&r1, a, name("Alice")).await;
        registry.join(&r1, b, name("Bob")).await;

        let report = broadcaster.broadcast(&r1, &system("hello")).await;
        assert_eq!(report.delivered, 2);
        assert_eq!(report.failed, 0);

        let expected = r#"{"type":"system","message":"hello"}"#;
        assert_eq!(rx_a.recv().await.as_deref(), Some(expected));
        assert_eq!(rx_b.recv().await.as_deref(), Some(expected));
        assert!(rx_a.try_recv().is_err());
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn one_dead_member_does_not_block_the_rest() {
        let registry = Arc::new(RoomRegistry::new());
        let broadcaster = Broadcaster::new(Arc::clone(&registry));
        let r1 = room("r1");

        let mut receivers = Vec::new();
        for i in 0..5 {
            let (handle, rx) = ConnectionHandle::channel(8);
            registry.join(&r1, handle, name(&format!("user{i}"))).await;
            receivers.push(rx);
        }
        let (dead, dead_rx) = ConnectionHandle::channel(8);
        registry.join(&r1, dead, name("ghost")).await;
        drop(dead_rx);

        let report = broadcaster.broadcast(&r1, &system("hello")).await;
        assert_eq!(report.delivered, 5);
        assert_eq!(report.failed, 1);

        for rx in &mut receivers {
            assert!(rx.recv().await.is_some());
        }
        // Dead members stay registered until their own session leaves.
        assert_eq!(registry.snapshot_members(&r1).await.len(), 6);
    }

    #[tokio::test]
    async fn saturated_member_is_skipped() {
        let registry = Arc::new(RoomRegistry::new());
        let broadcaster = Broadcaster::new(Arc::clone(&registry));
        let r1 = room("r1");
        let (slow, _slow_rx) = ConnectionHandle::channel(1);
        let (fast, mut fast_rx) = ConnectionHandle::channel(8);
        registry.join(&r1, slow, name("slow")).await;
        registry.join(&r1, fast, name("fast")).await;

        let _ = broadcaster.broadcast(&r1, &system("one")).await;
        let report = broadcaster.broadcast(&r1, &system("two")).await;
        assert_eq!(report.delivered, 1);
        assert_eq!(report.failed, 1);

        assert!(fast_rx.recv().await.is_some_and(|f| f.contains("one")));
        assert!(fast_rx.recv().await.is_some_and(|f| f.contains("two")));
    }

    #[tokio::test]
    async fn presence_broadcast_lists_members() {
        let registry = Arc::new(RoomRegistry::new());
        let broadcaster = Broadcaster::new(Arc::clone(&registry));
        let r1 = room("r1");
        let (a, mut rx_a) = ConnectionHandle::channel(8);
        registry.join(&r1, a, name("Alice")).await;

        let report = broadcaster.broadcast_presence(&r1).await;
        assert_eq!(report.delivered, 1);
        assert_eq!(
            rx_a.recv().await.as_deref(),
            Some(r#"{"type":"presence","users":["Alice"]}"#)
        );
    }
}
