//! Startup delay and announcement events

use std::time::Duration;

use collector_client::{EventDispatcher, Severity};

pub const SLEEP_PARSE_FAILURE: &str =
    "failed to set sleep time from env var STARTUP_SLEEP. Setting to 0";

/// Parse `STARTUP_SLEEP` seconds. Missing or invalid values yield `None`.
pub fn parse_startup_sleep(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse().ok())
}

/// Forward the startup events and wait out the configured delay.
pub async fn run(dispatcher: &EventDispatcher, raw_sleep: Option<&str>, listen_label: &str) {
    let secs = match parse_startup_sleep(raw_sleep) {
        Some(secs) => secs,
        None => {
            let _ = dispatcher.report(Severity::Warn, SLEEP_PARSE_FAILURE);
            0
        }
    };

    let _ = dispatcher.report(Severity::Info, format!("sleeping for {} seconds", secs));
    tokio::time::sleep(Duration::from_secs(secs)).await;

    let _ = dispatcher.report(
        Severity::Info,
        format!("logging the start of this app on {}", listen_label),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_startup_sleep() {
        assert_eq!(parse_startup_sleep(Some("5")), Some(5));
        assert_eq!(parse_startup_sleep(Some(" 3 ")), Some(3));
        assert_eq!(parse_startup_sleep(Some("0")), Some(0));
        assert_eq!(parse_startup_sleep(Some("soon")), None);
        assert_eq!(parse_startup_sleep(Some("-2")), None);
        assert_eq!(parse_startup_sleep(None), None);
    }
}
