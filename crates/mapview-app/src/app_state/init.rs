//! Window creation and map view setup.

use std::sync::Arc;

use mapview_webview::{MapViewRegistry, WebViewManager};
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use super::bounds::window_rect_to_wry;
use super::core::MapViewApp;
use super::types::PRIMARY_VIEW;

impl MapViewApp {
    /// Create the window and its map view.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let settings = &self.config.webview;
        let attrs = WindowAttributes::default()
            .with_title(settings.title.clone())
            .with_transparent(settings.transparent)
            .with_inner_size(winit::dpi::LogicalSize::new(
                f64::from(settings.width),
                f64::from(settings.height),
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        let mut registry = MapViewRegistry::new(WebViewManager::new(), self.config.clone());
        let bounds = window_rect_to_wry(window.inner_size(), window.scale_factor());
        let creation_args = self.args.creation_args();

        if let Err(e) = registry.create(PRIMARY_VIEW, window.as_ref(), bounds, creation_args.as_ref())
        {
            tracing::error!("Failed to create map view: {e}");
            return false;
        }
        tracing::info!(view_id = %PRIMARY_VIEW, "Map view created");

        self.window = Some(window);
        self.registry = Some(registry);
        true
    }

    pub(super) fn sync_view_bounds(&self) {
        let (Some(window), Some(registry)) = (&self.window, &self.registry) else {
            return;
        };
        let bounds = window_rect_to_wry(window.inner_size(), window.scale_factor());
        if let Err(e) = registry.set_bounds(PRIMARY_VIEW, bounds) {
            tracing::warn!("Failed to resize map view: {e}");
        }
    }
}
