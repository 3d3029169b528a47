//! Delivery of page events to the host program.

use mapview_common::ViewId;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::event::BridgeEvent;

/// Receives events forwarded out of a bridge.
pub trait HostSink {
    fn emit(&self, view_id: ViewId, event: &BridgeEvent);
}

/// One record on the host event channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostEvent {
    pub view_id: ViewId,
    pub event: BridgeEvent,
}

/// Broadcast event channel shared by every view.
pub struct HostChannel {
    sender: broadcast::Sender<HostEvent>,
}

impl HostChannel {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HostEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of subscribers that received the event.
    pub fn publish(&self, event: HostEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl HostSink for HostChannel {
    fn emit(&self, view_id: ViewId, event: &BridgeEvent) {
        let delivered = self.publish(HostEvent {
            view_id,
            event: event.clone(),
        });
        if delivered == 0 {
            tracing::trace!(view_id = %view_id, event_type = event.event_type(), "No host subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(raw: &str) -> BridgeEvent {
        BridgeEvent::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn emit_and_receive() {
        let channel = HostChannel::new(16);
        let mut rx = channel.subscribe();

        channel.emit(ViewId(3), &event(r#"{"type":"cameraIdle"}"#));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.view_id, ViewId(3));
        assert_eq!(received.event.event_type(), "cameraIdle");
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let channel = HostChannel::new(16);
        let mut rx1 = channel.subscribe();
        let mut rx2 = channel.subscribe();

        channel.emit(ViewId(1), &event(r#"{"type":"tap","lat":1,"lng":2}"#));

        assert_eq!(rx1.recv().await.unwrap().event.get_f64("lat"), Some(1.0));
        assert_eq!(rx2.recv().await.unwrap().event.get_f64("lng"), Some(2.0));
    }

    #[tokio::test]
    async fn events_arrive_in_order() {
        let channel = HostChannel::new(16);
        let mut rx = channel.subscribe();

        for kind in ["cameraMoveStarted", "cameraMove", "cameraIdle"] {
            channel.emit(ViewId(1), &event(&format!(r#"{{"type":"{kind}"}}"#)));
        }

        assert_eq!(rx.recv().await.unwrap().event.event_type(), "cameraMoveStarted");
        assert_eq!(rx.recv().await.unwrap().event.event_type(), "cameraMove");
        assert_eq!(rx.recv().await.unwrap().event.event_type(), "cameraIdle");
    }

    #[test]
    fn publish_without_subscribers_returns_zero() {
        let channel = HostChannel::new(4);
        let count = channel.publish(HostEvent {
            view_id: ViewId(0),
            event: event(r#"{"type":"mapReady"}"#),
        });
        assert_eq!(count, 0);
    }

    #[test]
    fn host_event_wire_form() {
        let record = HostEvent {
            view_id: ViewId(7),
            event: event(r#"{"type":"markerTap","markerId":"m1"}"#),
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({ "viewId": 7, "event": { "type": "markerTap", "markerId": "m1" } })
        );
    }
}
