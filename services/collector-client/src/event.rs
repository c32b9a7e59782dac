//! Collector Event Types
//!
//! The JSON payload accepted by a collector's `/services/collector/event`
//! endpoint. Every field goes through serde, so message text with quotes or
//! control characters always produces a valid body.

use serde::{Deserialize, Serialize};

/// Source type attached to every event
pub const SOURCETYPE: &str = "httpevent";

/// Event severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who emitted an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceIdentifiers {
    /// Application name, reported as `host` and `fields.app_name`
    pub app_name: String,
    /// Logical source tag, reported as `source`
    pub source: String,
}

impl SourceIdentifiers {
    pub fn new(app_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            source: source.into(),
        }
    }
}

/// Indexed fields carried alongside the event text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFields {
    pub log_level: Severity,
    pub app_name: String,
}

/// A single collector event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Free-text message
    pub event: String,
    pub fields: EventFields,
    pub sourcetype: String,
    pub host: String,
    pub source: String,
}

impl Event {
    /// Build an event for `message` at `severity`
    pub fn new(message: impl Into<String>, severity: Severity, ids: &SourceIdentifiers) -> Self {
        Self {
            event: message.into(),
            fields: EventFields {
                log_level: severity,
                app_name: ids.app_name.clone(),
            },
            sourcetype: SOURCETYPE.to_string(),
            host: ids.app_name.clone(),
            source: ids.source.clone(),
        }
    }

    pub fn message(&self) -> &str {
        &self.event
    }

    pub fn severity(&self) -> Severity {
        self.fields.log_level
    }

    pub fn source_identifiers(&self) -> SourceIdentifiers {
        SourceIdentifiers::new(self.fields.app_name.clone(), self.source.clone())
    }

    /// Serialize to the collector wire format
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn decode(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }
}
