//! Collector Client
//!
//! Structured log events and a one-shot forwarder for an HTTP event
//! collector (Splunk HEC wire format).
//!
//! ## Flow
//!
//! 1. [`Credentials`] are validated once at startup
//! 2. [`Event::new`] builds the payload
//! 3. [`EventForwarder::forward`] POSTs it to `https://{tenant}/services/collector/event`
//! 4. [`EventDispatcher`] runs step 3 on a detached task

pub mod credentials;
pub mod dispatch;
pub mod event;
pub mod forwarder;

pub use credentials::{ConfigError, Credentials};
pub use dispatch::EventDispatcher;
pub use event::{Event, Severity, SourceIdentifiers};
pub use forwarder::{CollectorScheme, EventForwarder, ForwardError, ForwardOutcome};
