use std::sync::Arc;
use std::time::Instant;

use mapview_bridge::{HostChannel, HostEvent};
use mapview_config::MapViewConfig;
use mapview_webview::MapViewRegistry;
use tokio::sync::broadcast;
use winit::window::Window;

use crate::cli::Args;

use super::types::HOST_CHANNEL_CAPACITY;

pub struct MapViewApp {
    pub(super) config: MapViewConfig,
    pub(super) args: Args,
    pub(super) window: Option<Arc<Window>>,
    pub(super) registry: Option<MapViewRegistry>,
    pub(super) host: HostChannel,
    pub(super) host_rx: broadcast::Receiver<HostEvent>,
    pub(super) last_poll: Instant,
    pub(super) should_exit: bool,
}

impl MapViewApp {
    pub fn new(config: MapViewConfig, args: Args) -> Self {
        let host = HostChannel::new(HOST_CHANNEL_CAPACITY);
        let host_rx = host.subscribe();
        Self {
            config,
            args,
            window: None,
            registry: None,
            host,
            host_rx,
            last_poll: Instant::now(),
            should_exit: false,
        }
    }

    pub(super) fn shutdown(&mut self) {
        if let Some(registry) = self.registry.as_mut() {
            tracing::info!(views = registry.count(), "Destroying map views");
            registry.destroy_all();
        }
        self.should_exit = true;
    }
}
