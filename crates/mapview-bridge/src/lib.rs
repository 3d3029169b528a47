//! Command/event bridge between a host program and an embedded map page.
//!
//! - [`BridgeChannel`] dispatches commands to the page, buffering them until
//!   the page reports readiness, and forwards page events to the host.
//! - [`ContentController`] tracks the page lifecycle and triggers the map
//!   script load once navigation finishes.
//! - [`MapView`] pairs one of each for a single view identity.
//!
//! Nothing here touches a real webview: the page is reached through the
//! [`ScriptEvaluator`] trait and the host through [`HostSink`].

pub mod channel;
pub mod command;
pub mod controller;
pub mod event;
pub mod host;
pub mod page;
pub mod readiness;
pub mod script;
pub mod view;

pub use channel::{BridgeChannel, Submission};
pub use command::{Command, MapCommand, MethodCall, MethodResponse};
pub use controller::{ContentController, ContentState, PageLoad, ProbeOutcome};
pub use event::{BridgeEvent, EventKind};
pub use host::{HostChannel, HostEvent, HostSink};
pub use readiness::{Admission, Readiness};
pub use script::{ScriptCallback, ScriptEvaluator, ScriptOutcome};
pub use view::{MapView, ResultHandle};
