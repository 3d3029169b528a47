//! Per-view command/event bridge with queue-until-ready semantics.

use mapview_common::ViewId;
use mapview_config::BridgeConfig;
use serde_json::Value;

use crate::command::Command;
use crate::event::BridgeEvent;
use crate::host::HostSink;
use crate::readiness::{Admission, Readiness};
use crate::script::{wrap_for_result, ScriptCallback, ScriptEvaluator};

/// What happened to a submitted command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Sent to the page; the callback will see the real result.
    Dispatched,
    /// Buffered until readiness; the callback already saw `null`.
    Queued { pending: usize },
}

pub struct BridgeChannel {
    view_id: ViewId,
    readiness: Readiness,
    ready_events: Vec<String>,
    warn_threshold: usize,
}

impl BridgeChannel {
    pub fn new(view_id: ViewId, config: &BridgeConfig) -> Self {
        Self {
            view_id,
            readiness: Readiness::default(),
            ready_events: config.ready_events.clone(),
            warn_threshold: config.pending_warn_threshold.max(1),
        }
    }

    pub fn view_id(&self) -> ViewId {
        self.view_id
    }

    pub fn is_ready(&self) -> bool {
        self.readiness.is_ready()
    }

    pub fn pending_len(&self) -> usize {
        self.readiness.pending_len()
    }

    pub fn is_ready_event(&self, event_type: &str) -> bool {
        self.ready_events.iter().any(|t| t == event_type)
    }

    /// Dispatch `command` now if the page is ready, otherwise buffer it.
    ///
    /// A buffered command is fire-and-forget: `callback` receives `null`
    /// immediately and the eventual page result is only logged.
    pub fn submit(
        &mut self,
        evaluator: &dyn ScriptEvaluator,
        command: Command,
        callback: Option<ScriptCallback>,
    ) -> Submission {
        match self.readiness.admit(command) {
            Admission::Dispatch(command) => {
                tracing::debug!(
                    view_id = %self.view_id,
                    method = command.method(),
                    command_id = command.id(),
                    "Dispatching command"
                );
                match callback {
                    Some(callback) => {
                        evaluator.evaluate(&wrap_for_result(command.script()), callback)
                    }
                    None => self.dispatch_detached(evaluator, &command),
                }
                Submission::Dispatched
            }
            Admission::Queued(pending) => {
                tracing::debug!(view_id = %self.view_id, pending, "Page not ready, command queued");
                if pending % self.warn_threshold == 0 {
                    tracing::warn!(
                        view_id = %self.view_id,
                        pending,
                        "Pending command queue keeps growing; page has not signaled readiness"
                    );
                }
                if let Some(callback) = callback {
                    callback(Ok(Value::Null));
                }
                Submission::Queued { pending }
            }
        }
    }

    /// Mark the page ready and flush buffered commands in submission order.
    ///
    /// Returns the number of commands flushed; zero on every call after the
    /// first.
    pub fn on_ready(&mut self, evaluator: &dyn ScriptEvaluator) -> usize {
        if self.readiness.is_ready() {
            tracing::trace!(view_id = %self.view_id, "Readiness already signaled");
            return 0;
        }

        let pending = self.readiness.mark_ready();
        tracing::info!(view_id = %self.view_id, flushed = pending.len(), "Map page ready");
        for command in &pending {
            self.dispatch_detached(evaluator, command);
        }
        pending.len()
    }

    /// Handle a raw message from the page.
    ///
    /// Malformed payloads are dropped. A readiness event flushes the queue
    /// before it is forwarded; every parsed event reaches `sink`.
    pub fn on_event(
        &mut self,
        evaluator: &dyn ScriptEvaluator,
        sink: &dyn HostSink,
        raw: &str,
    ) -> Option<BridgeEvent> {
        let event = self.parse_event(raw)?;
        if self.is_ready_event(event.event_type()) {
            self.on_ready(evaluator);
        }
        sink.emit(self.view_id, &event);
        Some(event)
    }

    /// Forward a page event to `sink` without acting on readiness.
    pub fn forward(&self, sink: &dyn HostSink, raw: &str) -> Option<BridgeEvent> {
        let event = self.parse_event(raw)?;
        sink.emit(self.view_id, &event);
        Some(event)
    }

    fn parse_event(&self, raw: &str) -> Option<BridgeEvent> {
        let event = BridgeEvent::parse(raw);
        if event.is_none() {
            tracing::debug!(view_id = %self.view_id, len = raw.len(), "Dropping malformed page event");
        }
        event
    }

    fn dispatch_detached(&self, evaluator: &dyn ScriptEvaluator, command: &Command) {
        let view_id = self.view_id;
        let method = command.method().to_string();
        let command_id = command.id().to_string();
        evaluator.evaluate(
            &wrap_for_result(command.script()),
            Box::new(move |outcome| {
                if let Err(e) = outcome {
                    tracing::warn!(
                        view_id = %view_id,
                        method = %method,
                        command_id = %command_id,
                        error = %e,
                        "Command failed in page"
                    );
                }
            }),
        );
    }
}
