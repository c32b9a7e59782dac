//! Detached event dispatch
//!
//! Logs an event locally and forwards it on its own task, so collector
//! latency never reaches the caller.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, info_span, warn, Instrument};

use crate::event::{Event, Severity, SourceIdentifiers};
use crate::forwarder::{EventForwarder, ForwardOutcome};

/// Hands events to the forwarder on detached tasks
#[derive(Debug, Clone)]
pub struct EventDispatcher {
    forwarder: Arc<EventForwarder>,
    sources: Arc<SourceIdentifiers>,
}

impl EventDispatcher {
    pub fn new(forwarder: Arc<EventForwarder>, sources: SourceIdentifiers) -> Self {
        Self {
            forwarder,
            sources: Arc::new(sources),
        }
    }

    pub fn sources(&self) -> &SourceIdentifiers {
        &self.sources
    }

    /// Log `message` locally at `severity`, then forward it in the background.
    ///
    /// Callers may await the handle; dropping it leaves the task running.
    pub fn report(
        &self,
        severity: Severity,
        message: impl Into<String>,
    ) -> JoinHandle<ForwardOutcome> {
        let message = message.into();

        match severity {
            Severity::Info => info!(app_name = %self.sources.app_name, "{}", message),
            Severity::Warn => warn!(app_name = %self.sources.app_name, "{}", message),
            Severity::Error => error!(app_name = %self.sources.app_name, "{}", message),
        }

        self.dispatch(Event::new(message, severity, &self.sources))
    }

    /// Forward an already-built event in the background
    pub fn dispatch(&self, event: Event) -> JoinHandle<ForwardOutcome> {
        let forwarder = Arc::clone(&self.forwarder);
        let span = info_span!("forward_event", severity = %event.severity());

        tokio::spawn(
            async move {
                let outcome = forwarder.forward(&event).await;
                if outcome.is_sent() {
                    info!(outcome = %outcome, "Event forwarded");
                }
                outcome
            }
            .instrument(span),
        )
    }
}
