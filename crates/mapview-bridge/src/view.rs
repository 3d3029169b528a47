//! One embedded map view: its bridge channel plus its content controller.

use mapview_common::ViewId;
use mapview_config::{MapOptions, MapViewConfig};
use serde_json::Value;

use crate::channel::{BridgeChannel, Submission};
use crate::command::{Command, MethodCall, MethodResponse};
use crate::controller::{ContentController, ContentState, PageLoad, ProbeOutcome};
use crate::event::BridgeEvent;
use crate::host::HostSink;
use crate::script::ScriptEvaluator;

/// Receives the reply to one host method call.
pub type ResultHandle = Box<dyn FnOnce(MethodResponse) + Send + 'static>;

pub struct MapView {
    view_id: ViewId,
    options: MapOptions,
    channel: BridgeChannel,
    controller: ContentController,
}

impl MapView {
    /// Build a view from config, overlaid with host creation arguments.
    pub fn new(view_id: ViewId, config: &MapViewConfig, creation_args: Option<&Value>) -> Self {
        let options = match creation_args {
            Some(args) => config.map.clone().with_creation_args(args),
            None => config.map.clone(),
        };
        if options.api_key.is_empty() {
            tracing::warn!(view_id = %view_id, "No Google Maps API key configured");
        }

        Self {
            view_id,
            channel: BridgeChannel::new(view_id, &config.bridge),
            controller: ContentController::new(view_id, &options),
            options,
        }
    }

    pub fn view_id(&self) -> ViewId {
        self.view_id
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn state(&self) -> &ContentState {
        self.controller.state()
    }

    pub fn is_ready(&self) -> bool {
        self.channel.is_ready()
    }

    pub fn pending_len(&self) -> usize {
        self.channel.pending_len()
    }

    pub fn page_html(&self) -> &str {
        self.controller.html()
    }

    /// Decode and submit a host call. Decoding errors are answered
    /// synchronously and affect only this call.
    pub fn handle_method_call(
        &mut self,
        evaluator: &dyn ScriptEvaluator,
        call: &MethodCall,
        result: ResultHandle,
    ) {
        match Command::from_call(call) {
            Ok(command) => {
                self.submit(evaluator, command, result);
            }
            Err(e) => {
                tracing::warn!(
                    view_id = %self.view_id,
                    method = %call.method,
                    error = %e,
                    "Rejected method call"
                );
                result(MethodResponse::from_error(&e));
            }
        }
    }

    pub fn submit(
        &mut self,
        evaluator: &dyn ScriptEvaluator,
        command: Command,
        result: ResultHandle,
    ) -> Submission {
        self.channel.submit(
            evaluator,
            command,
            Some(Box::new(move |outcome| {
                result(MethodResponse::from_outcome(outcome))
            })),
        )
    }

    /// Submit without observing the result.
    pub fn execute(&mut self, evaluator: &dyn ScriptEvaluator, command: Command) -> Submission {
        self.channel.submit(evaluator, command, None)
    }

    pub fn on_page_load(&mut self, evaluator: &dyn ScriptEvaluator, load: PageLoad) {
        self.controller.on_page_load(evaluator, load);
    }

    /// Feed a raw IPC message from the page.
    ///
    /// Once the content has failed, events are still forwarded but a
    /// readiness event no longer flushes the queue.
    pub fn on_message(
        &mut self,
        evaluator: &dyn ScriptEvaluator,
        sink: &dyn HostSink,
        raw: &str,
    ) -> Option<BridgeEvent> {
        if matches!(self.controller.state(), ContentState::Failed(_)) {
            return self.channel.forward(sink, raw);
        }
        let was_ready = self.channel.is_ready();
        let event = self.channel.on_event(evaluator, sink, raw)?;
        self.controller.on_event(&event);
        if !was_ready && self.channel.is_ready() {
            self.controller.on_bridge_ready();
        }
        Some(event)
    }

    /// Apply deferred probe results. Call from the UI loop.
    pub fn pump(&mut self) -> Vec<ProbeOutcome> {
        self.controller.drain_probes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{wrap_for_result, ScriptCallback, ScriptOutcome};
    use serde_json::json;
    use std::cell::RefCell;
    use std::sync::{Arc, Mutex};

    /// Answers probes with `true` and everything else with `reply`.
    struct PageStub {
        scripts: RefCell<Vec<String>>,
        reply: ScriptOutcome,
    }

    impl PageStub {
        fn new(reply: ScriptOutcome) -> Self {
            Self {
                scripts: RefCell::new(Vec::new()),
                reply,
            }
        }
    }

    impl ScriptEvaluator for PageStub {
        fn evaluate(&self, script: &str, callback: ScriptCallback) {
            self.scripts.borrow_mut().push(script.to_string());
            if script.contains("typeof loadGoogleMapsAPI") {
                callback(Ok(json!(true)));
            } else {
                callback(self.reply.clone());
            }
        }
    }

    #[derive(Default)]
    struct Sink(RefCell<Vec<String>>);

    impl HostSink for Sink {
        fn emit(&self, _view_id: ViewId, event: &BridgeEvent) {
            self.0.borrow_mut().push(event.event_type().to_string());
        }
    }

    fn responder() -> (Arc<Mutex<Vec<MethodResponse>>>, ResultHandle) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let inner = Arc::clone(&seen);
        (seen, Box::new(move |r| inner.lock().unwrap().push(r)))
    }

    fn view() -> MapView {
        MapView::new(ViewId(9), &MapViewConfig::default(), None)
    }

    #[test]
    fn creation_args_override_config() {
        let args = json!({ "apiKey": "abc", "zoom": 3, "mapType": "hybrid", "lat": "bad" });
        let v = MapView::new(ViewId(1), &MapViewConfig::default(), Some(&args));
        assert_eq!(v.options().api_key, "abc");
        assert_eq!(v.options().zoom, 3.0);
        assert_eq!(v.options().lat, 0.0);
        assert!(v.page_html().contains(r#""mapType":"hybrid""#));
    }

    #[test]
    fn full_lifecycle() {
        let mut v = view();
        let page = PageStub::new(Ok(json!(12)));
        let sink = Sink::default();

        let (seen, result) = responder();
        v.handle_method_call(&page, &MethodCall::new("getZoomLevel", Value::Null), result);
        assert_eq!(*seen.lock().unwrap(), vec![MethodResponse::null()]);
        assert_eq!(v.pending_len(), 1);

        v.on_page_load(&page, PageLoad::Started);
        assert_eq!(*v.state(), ContentState::Loading);
        v.on_page_load(&page, PageLoad::Finished);
        assert_eq!(*v.state(), ContentState::Loaded);
        assert_eq!(v.pump(), vec![ProbeOutcome::LoaderStarted]);
        assert!(!v.is_ready());

        v.on_message(&page, &sink, r#"{"type":"mapReady"}"#);
        assert!(v.is_ready());
        assert_eq!(*v.state(), ContentState::Ready);
        assert_eq!(v.pending_len(), 0);
        assert_eq!(
            page.scripts.borrow().last().cloned(),
            Some(wrap_for_result("getZoomLevel();"))
        );

        let (seen, result) = responder();
        v.handle_method_call(&page, &MethodCall::new("getZoomLevel", Value::Null), result);
        assert_eq!(*seen.lock().unwrap(), vec![MethodResponse::Value(json!(12))]);
        assert_eq!(*sink.0.borrow(), vec!["mapReady"]);
    }

    #[test]
    fn invalid_call_is_answered_synchronously() {
        let mut v = view();
        let page = PageStub::new(Ok(Value::Null));

        let (seen, result) = responder();
        v.handle_method_call(
            &page,
            &MethodCall::new("addCircle", json!({ "circleId": "c" })),
            result,
        );
        let responses = seen.lock().unwrap();
        assert!(matches!(
            responses.as_slice(),
            [MethodResponse::Error { code, .. }] if code == "INVALID_ARGS"
        ));
        assert_eq!(v.pending_len(), 0);
    }

    #[test]
    fn unknown_method_is_not_implemented() {
        let mut v = view();
        let page = PageStub::new(Ok(Value::Null));
        let (seen, result) = responder();
        v.handle_method_call(&page, &MethodCall::new("snapshot", Value::Null), result);
        assert_eq!(*seen.lock().unwrap(), vec![MethodResponse::NotImplemented]);
    }

    #[test]
    fn ready_event_without_probe_flushes() {
        let mut v = view();
        let page = PageStub::new(Ok(Value::Null));
        let sink = Sink::default();

        v.execute(&page, Command::evaluate("A"));
        v.execute(&page, Command::evaluate("B"));
        v.on_message(&page, &sink, r#"{"type":"ready"}"#);
        v.execute(&page, Command::evaluate("C"));

        assert_eq!(
            *page.scripts.borrow(),
            vec![wrap_for_result("A"), wrap_for_result("B"), wrap_for_result("C")]
        );
        assert_eq!(*v.state(), ContentState::Ready);
    }

    #[test]
    fn script_error_after_ready_maps_to_js_error() {
        let mut v = view();
        let page = PageStub::new(Err(mapview_common::BridgeError::Script("x is undefined".into())));
        let sink = Sink::default();
        v.on_message(&page, &sink, r#"{"type":"mapReady"}"#);

        let (seen, result) = responder();
        v.handle_method_call(&page, &MethodCall::new("evaluateJavaScript", json!("x.y")), result);
        assert!(matches!(
            seen.lock().unwrap().as_slice(),
            [MethodResponse::Error { code, .. }] if code == "JS_ERROR"
        ));
    }

    #[test]
    fn auth_failure_is_forwarded_and_fails_view() {
        let mut v = view();
        let page = PageStub::new(Ok(Value::Null));
        let sink = Sink::default();

        let event = v
            .on_message(&page, &sink, r#"{"type":"authFailure","message":"bad key"}"#)
            .unwrap();
        assert_eq!(event.event_type(), "authFailure");
        assert_eq!(*sink.0.borrow(), vec!["authFailure"]);
        assert_eq!(*v.state(), ContentState::Failed("bad key".into()));
        assert!(!v.is_ready());
    }

    #[test]
    fn ready_after_auth_failure_keeps_queue() {
        let mut v = view();
        let page = PageStub::new(Ok(Value::Null));
        let sink = Sink::default();

        v.execute(&page, Command::evaluate("A"));
        v.on_message(&page, &sink, r#"{"type":"authFailure"}"#);
        v.on_message(&page, &sink, r#"{"type":"mapReady"}"#);

        assert_eq!(*v.state(), ContentState::Failed("authentication failure".into()));
        assert!(!v.is_ready());
        assert_eq!(v.pending_len(), 1);
        assert!(page.scripts.borrow().is_empty());
        assert_eq!(*sink.0.borrow(), vec!["authFailure", "mapReady"]);
    }

    #[test]
    fn rejected_call_does_not_block_later_calls() {
        let mut v = view();
        let page = PageStub::new(Ok(Value::Null));
        let sink = Sink::default();

        let (bad, result) = responder();
        v.handle_method_call(
            &page,
            &MethodCall::new("addMarker", json!({ "markerId": "", "lat": 1.0, "lng": 2.0 })),
            result,
        );
        let (good, result) = responder();
        v.handle_method_call(&page, &MethodCall::new("zoomTo", json!({ "zoom": 5 })), result);

        assert!(matches!(
            bad.lock().unwrap().as_slice(),
            [MethodResponse::Error { code, .. }] if code == "INVALID_ARGS"
        ));
        assert_eq!(*good.lock().unwrap(), vec![MethodResponse::null()]);
        assert_eq!(v.pending_len(), 1);

        v.on_message(&page, &sink, r#"{"type":"mapReady"}"#);
        let scripts = page.scripts.borrow();
        assert_eq!(scripts.len(), 1);
        assert!(scripts[0].contains("zoomTo(5"));
    }
}
