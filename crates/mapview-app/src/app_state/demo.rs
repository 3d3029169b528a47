//! `--demo`: exercise the bridge before the page is ready.

use mapview_bridge::{MethodCall, MethodResponse};
use serde_json::json;

use super::core::MapViewApp;
use super::types::PRIMARY_VIEW;

impl MapViewApp {
    /// Submit a marker, a camera move and a zoom query. All three are issued
    /// before readiness, so they are queued and flushed together.
    pub(super) fn submit_demo_commands(&mut self) {
        let Some(registry) = self.registry.as_mut() else {
            return;
        };
        let map = &self.config.map;
        let center = registry
            .view(PRIMARY_VIEW)
            .map(|v| (v.options().lat, v.options().lng))
            .unwrap_or((map.lat, map.lng));

        let calls = [
            MethodCall::new(
                "addMarker",
                json!({
                    "markerId": "demo-center",
                    "lat": center.0,
                    "lng": center.1,
                    "options": { "title": "Center", "iwTitle": "mapview", "iwSnippet": "demo marker" }
                }),
            ),
            MethodCall::new("moveCamera", json!({ "zoom": 15.0 })),
            MethodCall::new("getZoomLevel", json!(null)),
        ];

        for call in &calls {
            let method = call.method.clone();
            registry.call(
                PRIMARY_VIEW,
                call,
                Box::new(move |response: MethodResponse| {
                    tracing::info!(method = %method, response = %response.to_json(), "Demo call answered");
                }),
            );
        }
        let pending = registry.view(PRIMARY_VIEW).map_or(0, |v| v.pending_len());
        tracing::info!(pending, "Demo commands submitted");
    }
}
