//! Platform Environment Discovery
//!
//! Reads the Cloud Foundry style `VCAP_APPLICATION` and `VCAP_SERVICES`
//! variables into the model shown on the status page.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const VCAP_APPLICATION: &str = "VCAP_APPLICATION";
pub const VCAP_SERVICES: &str = "VCAP_SERVICES";

/// Prefix of environment variables listed on the status page
pub const ENVAR_PREFIX: &str = "TRAINING_";

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("{var} is not valid JSON: {source}")]
    InvalidJson {
        var: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// A bound service instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    pub name: String,
    pub label: String,
}

/// Everything the status page displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusIndex {
    pub app_name: String,
    pub instance_index: i64,
    pub instance_guid: String,
    pub envars: Vec<String>,
    pub services: Vec<Service>,
    pub space_name: String,
}

impl Default for StatusIndex {
    fn default() -> Self {
        Self {
            app_name: UNKNOWN.to_string(),
            instance_index: -1,
            instance_guid: UNKNOWN.to_string(),
            envars: Vec::new(),
            services: Vec::new(),
            space_name: UNKNOWN.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct VcapApplication {
    name: Option<String>,
    application_name: Option<String>,
    instance_index: Option<i64>,
    instance_id: Option<String>,
    space_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VcapService {
    name: String,
    label: Option<String>,
}

impl StatusIndex {
    /// Build from the process environment
    pub fn from_env() -> Result<Self, PlatformError> {
        Self::from_vars(
            std::env::var(VCAP_APPLICATION).ok().as_deref(),
            std::env::var(VCAP_SERVICES).ok().as_deref(),
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    /// Build from explicit values.
    ///
    /// Without `VCAP_APPLICATION` the app is not on the platform and every field
    /// keeps its default.
    pub fn from_vars<I>(
        vcap_application: Option<&str>,
        vcap_services: Option<&str>,
        vars: I,
    ) -> Result<Self, PlatformError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut index = Self::default();

        let Some(raw_app) = vcap_application else {
            return Ok(index);
        };

        let app: VcapApplication =
            serde_json::from_str(raw_app).map_err(|source| PlatformError::InvalidJson {
                var: VCAP_APPLICATION,
                source,
            })?;

        if let Some(name) = non_empty(app.name).or_else(|| non_empty(app.application_name)) {
            index.app_name = name;
        }
        if let Some(i) = app.instance_index.filter(|i| *i > -1) {
            index.instance_index = i;
        }
        if let Some(guid) = non_empty(app.instance_id) {
            index.instance_guid = guid;
        }
        if let Some(space) = non_empty(app.space_name) {
            index.space_name = space;
        }

        if let Some(raw_services) = vcap_services.filter(|s| !s.trim().is_empty()) {
            let bound: BTreeMap<String, Vec<VcapService>> = serde_json::from_str(raw_services)
                .map_err(|source| PlatformError::InvalidJson {
                    var: VCAP_SERVICES,
                    source,
                })?;

            index.services = bound
                .into_iter()
                .flat_map(|(key, instances)| {
                    instances.into_iter().map(move |svc| Service {
                        name: svc.name,
                        label: non_empty(svc.label).unwrap_or_else(|| key.clone()),
                    })
                })
                .collect();
            index.services.sort_by(|a, b| (&a.label, &a.name).cmp(&(&b.label, &b.name)));
        }

        index.envars = vars
            .into_iter()
            .filter(|(k, _)| k.starts_with(ENVAR_PREFIX))
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        index.envars.sort();

        Ok(index)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP: &str = r#"{
        "application_name": "pcf-sample",
        "name": "pcf-sample",
        "instance_index": 2,
        "instance_id": "5a2c-guid",
        "space_name": "dev",
        "limits": {"mem": 256}
    }"#;

    const SERVICES: &str = r#"{
        "p.mysql": [{"name": "orders-db", "label": "p.mysql", "credentials": {}}],
        "user-provided": [
            {"name": "splunk-hec", "label": "user-provided"},
            {"name": "audit"}
        ]
    }"#;

    fn vars() -> Vec<(String, String)> {
        vec![
            ("TRAINING_KEY_2".to_string(), "b".to_string()),
            ("PATH".to_string(), "/usr/bin".to_string()),
            ("TRAINING_KEY_1".to_string(), "a".to_string()),
        ]
    }

    #[test]
    fn test_off_platform_defaults() {
        let index = StatusIndex::from_vars(None, Some(SERVICES), vars()).unwrap();
        assert_eq!(index, StatusIndex::default());
        assert_eq!(index.app_name, "Unknown");
        assert_eq!(index.instance_index, -1);
    }

    #[test]
    fn test_reads_application_metadata() {
        let index = StatusIndex::from_vars(Some(APP), None, vars()).unwrap();
        assert_eq!(index.app_name, "pcf-sample");
        assert_eq!(index.instance_index, 2);
        assert_eq!(index.instance_guid, "5a2c-guid");
        assert_eq!(index.space_name, "dev");
        assert!(index.services.is_empty());
    }

    #[test]
    fn test_services_sorted_with_label_fallback() {
        let index = StatusIndex::from_vars(Some(APP), Some(SERVICES), vars()).unwrap();
        let names: Vec<_> = index
            .services
            .iter()
            .map(|s| (s.label.as_str(), s.name.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("p.mysql", "orders-db"),
                ("user-provided", "audit"),
                ("user-provided", "splunk-hec"),
            ]
        );
    }

    #[test]
    fn test_only_prefixed_envars_listed() {
        let index = StatusIndex::from_vars(Some(APP), None, vars()).unwrap();
        assert_eq!(index.envars, vec!["TRAINING_KEY_1=a", "TRAINING_KEY_2=b"]);
    }

    #[test]
    fn test_blank_fields_keep_defaults() {
        let app = r#"{"name": "", "instance_index": -1, "space_name": ""}"#;
        let index = StatusIndex::from_vars(Some(app), None, Vec::new()).unwrap();
        assert_eq!(index.app_name, "Unknown");
        assert_eq!(index.instance_index, -1);
        assert_eq!(index.space_name, "Unknown");
    }

    #[test]
    fn test_malformed_json_is_error() {
        let err = StatusIndex::from_vars(Some("{not json"), None, Vec::new()).unwrap_err();
        assert!(err.to_string().starts_with("VCAP_APPLICATION is not valid JSON"));

        let err = StatusIndex::from_vars(Some(APP), Some("[]"), Vec::new()).unwrap_err();
        assert!(matches!(err, PlatformError::InvalidJson { var: VCAP_SERVICES, .. }));
    }
}
