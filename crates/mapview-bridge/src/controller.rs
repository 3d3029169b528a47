//! Lifecycle of one embedded map page.

use std::sync::{Arc, Mutex};

use mapview_common::ViewId;
use mapview_config::MapOptions;
use serde_json::Value;

use crate::event::{BridgeEvent, EventKind};
use crate::page;
use crate::script::{wrap_for_result, ScriptEvaluator};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentState {
    Created,
    Loading,
    Loaded,
    Ready,
    Failed(String),
}

impl ContentState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Failed(_))
    }
}

/// Navigation progress reported by the webview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLoad {
    Started,
    Finished,
}

/// Result of the loader probe run after navigation finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The loader existed and was invoked.
    LoaderStarted,
    /// The page has no loader function.
    LoaderMissing,
    /// The probe itself could not be evaluated.
    Failed(String),
}

pub struct ContentController {
    view_id: ViewId,
    state: ContentState,
    html: String,
    probes: Arc<Mutex<Vec<ProbeOutcome>>>,
}

impl ContentController {
    pub fn new(view_id: ViewId, options: &MapOptions) -> Self {
        Self {
            view_id,
            state: ContentState::Created,
            html: page::render(options),
            probes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn state(&self) -> &ContentState {
        &self.state
    }

    /// Page document the webview should load.
    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn on_page_load(&mut self, evaluator: &dyn ScriptEvaluator, load: PageLoad) {
        if self.state.is_terminal() {
            tracing::debug!(view_id = %self.view_id, ?load, state = ?self.state, "Ignoring page load");
            return;
        }

        match (load, &self.state) {
            (PageLoad::Started, ContentState::Created) => {
                self.transition(ContentState::Loading);
            }
            (PageLoad::Finished, ContentState::Created | ContentState::Loading) => {
                self.transition(ContentState::Loaded);
                self.probe(evaluator);
            }
            _ => {
                tracing::trace!(view_id = %self.view_id, ?load, state = ?self.state, "No transition");
            }
        }
    }

    /// Apply outcomes of probes that completed since the last call.
    ///
    /// A failed or missing probe leaves the controller `Loaded`; there is no
    /// retry.
    pub fn drain_probes(&mut self) -> Vec<ProbeOutcome> {
        let outcomes: Vec<ProbeOutcome> = match self.probes.lock() {
            Ok(mut inbox) => inbox.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        };

        for outcome in &outcomes {
            match outcome {
                ProbeOutcome::LoaderStarted => {
                    tracing::info!(view_id = %self.view_id, "Map script load started");
                }
                ProbeOutcome::LoaderMissing => {
                    tracing::warn!(
                        view_id = %self.view_id,
                        "Page has no {} function; map will not become ready",
                        page::LOADER_FUNCTION
                    );
                }
                ProbeOutcome::Failed(e) => {
                    tracing::warn!(view_id = %self.view_id, error = %e, "Loader probe failed");
                }
            }
        }
        outcomes
    }

    /// The bridge saw a readiness event.
    pub fn on_bridge_ready(&mut self) {
        if !self.state.is_terminal() {
            self.transition(ContentState::Ready);
        }
    }

    /// Observe a page event.
    ///
    /// An authentication failure before readiness fails the content.
    pub fn on_event(&mut self, event: &BridgeEvent) {
        if event.kind() != EventKind::AuthFailure || self.state.is_terminal() {
            return;
        }
        let reason = event
            .get_str("message")
            .unwrap_or("authentication failure")
            .to_string();
        tracing::error!(view_id = %self.view_id, reason = %reason, "Map page failed to authenticate");
        self.transition(ContentState::Failed(reason));
    }

    fn probe(&self, evaluator: &dyn ScriptEvaluator) {
        tracing::debug!(view_id = %self.view_id, "Probing for map loader");
        let inbox = Arc::clone(&self.probes);
        evaluator.evaluate(
            &wrap_for_result(&page::loader_probe_script()),
            Box::new(move |outcome| {
                let probe = match outcome {
                    Ok(Value::Bool(true)) => ProbeOutcome::LoaderStarted,
                    Ok(_) => ProbeOutcome::LoaderMissing,
                    Err(e) => ProbeOutcome::Failed(e.to_string()),
                };
                match inbox.lock() {
                    Ok(mut pending) => pending.push(probe),
                    Err(poisoned) => poisoned.into_inner().push(probe),
                }
            }),
        );
    }

    fn transition(&mut self, next: ContentState) {
        tracing::debug!(view_id = %self.view_id, from = ?self.state, to = ?next, "Content state change");
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{ScriptCallback, ScriptOutcome};
    use mapview_common::BridgeError;
    use serde_json::json;
    use std::cell::RefCell;

    struct FakeEvaluator {
        scripts: RefCell<Vec<String>>,
        reply: ScriptOutcome,
    }

    impl FakeEvaluator {
        fn replying(reply: ScriptOutcome) -> Self {
            Self {
                scripts: RefCell::new(Vec::new()),
                reply,
            }
        }
    }

    impl ScriptEvaluator for FakeEvaluator {
        fn evaluate(&self, script: &str, callback: ScriptCallback) {
            self.scripts.borrow_mut().push(script.to_string());
            callback(self.reply.clone());
        }
    }

    fn controller() -> ContentController {
        ContentController::new(ViewId(1), &MapOptions::default())
    }

    #[test]
    fn starts_created_with_rendered_page() {
        let c = controller();
        assert_eq!(*c.state(), ContentState::Created);
        assert!(c.html().contains("loadGoogleMapsAPI"));
    }

    #[test]
    fn load_lifecycle_runs_probe_once() {
        let mut c = controller();
        let eval = FakeEvaluator::replying(Ok(json!(true)));

        c.on_page_load(&eval, PageLoad::Started);
        assert_eq!(*c.state(), ContentState::Loading);
        assert!(eval.scripts.borrow().is_empty());

        c.on_page_load(&eval, PageLoad::Finished);
        assert_eq!(*c.state(), ContentState::Loaded);
        assert_eq!(eval.scripts.borrow().len(), 1);
        assert!(eval.scripts.borrow()[0].contains("typeof loadGoogleMapsAPI"));

        // A duplicate finish does not probe again.
        c.on_page_load(&eval, PageLoad::Finished);
        assert_eq!(eval.scripts.borrow().len(), 1);

        assert_eq!(c.drain_probes(), vec![ProbeOutcome::LoaderStarted]);
        assert!(c.drain_probes().is_empty());
    }

    #[test]
    fn missing_loader_stays_loaded() {
        let mut c = controller();
        let eval = FakeEvaluator::replying(Ok(json!(false)));
        c.on_page_load(&eval, PageLoad::Finished);

        assert_eq!(c.drain_probes(), vec![ProbeOutcome::LoaderMissing]);
        assert_eq!(*c.state(), ContentState::Loaded);
    }

    #[test]
    fn probe_failure_stays_loaded_without_retry() {
        let mut c = controller();
        let eval = FakeEvaluator::replying(Err(BridgeError::Script("boom".into())));
        c.on_page_load(&eval, PageLoad::Finished);

        let outcomes = c.drain_probes();
        assert!(matches!(outcomes.as_slice(), [ProbeOutcome::Failed(msg)] if msg.contains("boom")));
        assert_eq!(*c.state(), ContentState::Loaded);
        assert_eq!(eval.scripts.borrow().len(), 1);
    }

    #[test]
    fn ready_is_terminal() {
        let mut c = controller();
        let eval = FakeEvaluator::replying(Ok(json!(true)));
        c.on_page_load(&eval, PageLoad::Finished);
        c.on_bridge_ready();
        assert_eq!(*c.state(), ContentState::Ready);

        c.on_page_load(&eval, PageLoad::Started);
        assert_eq!(*c.state(), ContentState::Ready);

        let auth = BridgeEvent::parse(r#"{"type":"authFailure"}"#).unwrap();
        c.on_event(&auth);
        assert_eq!(*c.state(), ContentState::Ready);
    }

    #[test]
    fn ready_before_any_load_is_accepted() {
        let mut c = controller();
        c.on_bridge_ready();
        assert_eq!(*c.state(), ContentState::Ready);
    }

    #[test]
    fn auth_failure_before_ready_fails() {
        let mut c = controller();
        let eval = FakeEvaluator::replying(Ok(json!(true)));
        c.on_page_load(&eval, PageLoad::Finished);

        let auth = BridgeEvent::parse(r#"{"type":"authFailure","message":"bad key"}"#).unwrap();
        c.on_event(&auth);
        assert_eq!(*c.state(), ContentState::Failed("bad key".into()));

        c.on_bridge_ready();
        assert!(matches!(c.state(), ContentState::Failed(_)));
    }

    #[test]
    fn other_events_do_not_change_state() {
        let mut c = controller();
        let tap = BridgeEvent::parse(r#"{"type":"tap"}"#).unwrap();
        c.on_event(&tap);
        assert_eq!(*c.state(), ContentState::Created);
    }
}
