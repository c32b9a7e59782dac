//! Event Forwarder
//!
//! One-shot HTTP POST of a single event to the collector. Each call makes at
//! most one network attempt: no retry, no batching, no queueing.
//!
//! The forwarder owns its HTTP client. TLS certificate verification stays on,
//! and nothing here touches process-wide transport settings.

use std::str::FromStr;
use std::time::Duration;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::credentials::Credentials;
use crate::event::Event;

/// Collector ingestion path
pub const COLLECTOR_PATH: &str = "/services/collector/event";

/// Client-side timeout for a collector request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Scheme used to reach the collector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectorScheme {
    #[default]
    Https,
    /// Plain HTTP, for local collectors only
    Http,
}

impl std::fmt::Display for CollectorScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectorScheme::Https => write!(f, "https"),
            CollectorScheme::Http => write!(f, "http"),
        }
    }
}

impl FromStr for CollectorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "https" => Ok(CollectorScheme::Https),
            "http" => Ok(CollectorScheme::Http),
            other => Err(format!("unsupported collector scheme: {other}")),
        }
    }
}

/// Errors from a single forwarding attempt
#[derive(Debug, Error)]
pub enum ForwardError {
    /// URL or headers could not be built; nothing was sent
    #[error("client: could not create request: {0}")]
    RequestConstruction(String),

    /// Network, TLS or timeout failure
    #[error("client: error making http request: {0}")]
    Transport(#[source] reqwest::Error),
}

/// What happened to a forwarded event
#[derive(Debug)]
pub enum ForwardOutcome {
    /// The request completed. The remote status is recorded, not judged.
    Sent { status: StatusCode },
    RequestConstructionFailed(String),
    TransportFailed(String),
}

impl ForwardOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, ForwardOutcome::Sent { .. })
    }
}

impl std::fmt::Display for ForwardOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForwardOutcome::Sent { status } => {
                write!(f, "wrote to collector (HTTP {})", status.as_u16())
            }
            ForwardOutcome::RequestConstructionFailed(reason) => {
                write!(f, "client: could not create request: {reason}")
            }
            ForwardOutcome::TransportFailed(reason) => {
                write!(f, "client: error making http request: {reason}")
            }
        }
    }
}

/// Sends events to the collector
#[derive(Debug)]
pub struct EventForwarder {
    client: Client,
    credentials: Credentials,
    scheme: CollectorScheme,
}

impl EventForwarder {
    /// HTTPS forwarder with the default timeout
    pub fn new(credentials: Credentials) -> reqwest::Result<Self> {
        Self::with_options(credentials, CollectorScheme::Https, DEFAULT_TIMEOUT)
    }

    pub fn with_options(
        credentials: Credentials,
        scheme: CollectorScheme,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("collector-client/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            credentials,
            scheme,
        })
    }

    /// Collector URL for the configured tenant
    pub fn endpoint(&self) -> Result<Url, ForwardError> {
        let raw = format!(
            "{}://{}{}",
            self.scheme,
            self.credentials.tenant_host(),
            COLLECTOR_PATH
        );

        let url = Url::parse(&raw)
            .map_err(|e| ForwardError::RequestConstruction(format!("{raw}: {e}")))?;

        // A tenant carrying its own path or query would redirect the event elsewhere
        if url.path() != COLLECTOR_PATH || url.query().is_some() || url.fragment().is_some() {
            return Err(ForwardError::RequestConstruction(format!(
                "{raw}: tenant must be a bare host[:port]"
            )));
        }

        Ok(url)
    }

    fn build_request(&self, event: &Event) -> Result<reqwest::Request, ForwardError> {
        let url = self.endpoint()?;

        let auth = HeaderValue::from_str(&format!("Splunk {}", self.credentials.auth_token()))
            .map_err(|e| ForwardError::RequestConstruction(format!("invalid auth token: {e}")))?;

        self.client
            .post(url)
            .header(AUTHORIZATION, auth)
            .json(event)
            .build()
            .map_err(|e| ForwardError::RequestConstruction(e.to_string()))
    }

    /// Send one event, surfacing failures as errors
    pub async fn try_forward(&self, event: &Event) -> Result<StatusCode, ForwardError> {
        let request = self.build_request(event)?;

        debug!(
            collector_host = self.credentials.tenant_host(),
            severity = %event.severity(),
            "Forwarding event to collector"
        );

        let response = self
            .client
            .execute(request)
            .await
            .map_err(ForwardError::Transport)?;

        Ok(response.status())
    }

    /// Send one event. Failures are logged and returned as an outcome, never raised.
    pub async fn forward(&self, event: &Event) -> ForwardOutcome {
        let collector_host = self.credentials.tenant_host();

        match self.try_forward(event).await {
            Ok(status) => {
                if status.is_success() {
                    debug!(collector_host, %status, "Collector accepted event");
                } else {
                    warn!(collector_host, %status, "Collector answered with non-success status");
                }
                ForwardOutcome::Sent { status }
            }
            Err(ForwardError::RequestConstruction(reason)) => {
                error!(collector_host, error = %reason, "Could not build collector request");
                ForwardOutcome::RequestConstructionFailed(reason)
            }
            Err(ForwardError::Transport(e)) => {
                error!(
                    collector_host,
                    error = %e,
                    timeout = e.is_timeout(),
                    "Collector request failed"
                );
                ForwardOutcome::TransportFailed(e.to_string())
            }
        }
    }
}
