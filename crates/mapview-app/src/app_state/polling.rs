//! Periodic pumping of webview events and host event delivery.

use std::time::Instant;

use tokio::sync::broadcast::error::TryRecvError;
use winit::event_loop::{ActiveEventLoop, ControlFlow};

use super::core::MapViewApp;
use super::types::POLL_INTERVAL;

impl MapViewApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_webview_events();
            self.poll_host_events();
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }

    fn poll_webview_events(&mut self) {
        if let Some(registry) = self.registry.as_mut() {
            registry.pump(&self.host);
        }
    }

    /// Stand-in host: log every event forwarded out of the bridge.
    fn poll_host_events(&mut self) {
        loop {
            match self.host_rx.try_recv() {
                Ok(record) => {
                    let payload = serde_json::to_string(&record.event).unwrap_or_default();
                    tracing::info!(
                        view_id = %record.view_id,
                        event_type = record.event.event_type(),
                        payload = %payload,
                        "Map event"
                    );
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Host event receiver lagged");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }
}
