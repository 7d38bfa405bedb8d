//! Inbound incident alert types.
//!
//! A Stackdriver-style incident webhook body looks like:
//!
//! ```json
//! {
//!   "incident": {
//!     "incident_id": "f2e08c333dc64cb09f75eaab355393bz",
//!     "resource_id": "i-4a266a2d",
//!     "resource_name": "webserver-85",
//!     "state": "open",
//!     "started_at": 1385085727,
//!     "ended_at": null,
//!     "policy_name": "Webserver Health",
//!     "condition_name": "CPU usage",
//!     "url": "https://app.google.stackdriver.com/incidents/f333dc64z",
//!     "summary": "CPU for webserver-85 is above the threshold of 1% with a value of 28.5%"
//!   },
//!   "version": 1.1
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RelayError;

/// Incident state reported once the condition has cleared.
pub const STATE_CLOSED: &str = "closed";

/// A monitoring incident. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Incident {
    #[serde(deserialize_with = "null_as_default")]
    pub incident_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resource_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resource_name: String,
    /// Lifecycle state, `open` or `closed` in practice
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    /// Unix seconds
    pub started_at: Option<i64>,
    /// Unix seconds, `null` while the incident is open
    pub ended_at: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub policy_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub condition_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
}

impl Incident {
    /// Whether the incident has been resolved.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state == STATE_CLOSED
    }
}

/// Envelope wrapping one incident plus the payload schema version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alert {
    #[serde(deserialize_with = "null_as_default")]
    pub incident: Incident,
    #[serde(deserialize_with = "null_as_default")]
    pub version: f64,
}

/// Decode `null` as the type's default, like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Alert {
    /// Decode an alert from a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, RelayError> {
        serde_json::from_slice(body).map_err(RelayError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "incident": {
            "incident_id": "f2e08c333dc64cb09f75eaab355393bz",
            "resource_id": "i-4a266a2d",
            "resource_name": "webserver-85",
            "state": "open",
            "started_at": 1385085727,
            "ended_at": null,
            "policy_name": "Webserver Health",
            "condition_name": "CPU usage",
            "url": "https://app.google.stackdriver.com/incidents/f333dc64z",
            "summary": "CPU for webserver-85 is above the threshold"
        },
        "version": 1.1
    }"#;

    #[test]
    fn test_decode_full_alert() {
        let alert = Alert::from_slice(SAMPLE.as_bytes()).unwrap();
        assert!((alert.version - 1.1).abs() < f64::EPSILON);
        assert_eq!(alert.incident.resource_name, "webserver-85");
        assert_eq!(alert.incident.started_at, Some(1_385_085_727));
        assert_eq!(alert.incident.ended_at, None);
        assert!(!alert.incident.is_closed());
    }

    #[test]
    fn test_missing_fields_default() {
        let alert = Alert::from_slice(br#"{"incident": {"state": "closed"}}"#).unwrap();
        assert!(alert.incident.is_closed());
        assert_eq!(alert.incident.summary, "");
        assert!(alert.version.abs() < f64::EPSILON);
    }

    #[test]
    fn test_null_fields_default() {
        let alert = Alert::from_slice(
            br#"{"incident":{"state":"open","summary":null,"resource_name":null,"ended_at":null},"version":null}"#,
        )
        .unwrap();
        assert_eq!(alert.incident.state, "open");
        assert_eq!(alert.incident.summary, "");
        assert_eq!(alert.incident.resource_name, "");
        assert_eq!(alert.incident.ended_at, None);
        assert!(alert.version.abs() < f64::EPSILON);

        let alert = Alert::from_slice(br#"{"incident":null,"version":1.1}"#).unwrap();
        assert_eq!(alert.incident, Incident::default());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let alert =
            Alert::from_slice(br#"{"incident": {"summary": "x", "extra": 1}, "other": []}"#)
                .unwrap();
        assert_eq!(alert.incident.summary, "x");
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        for body in [&b""[..], b"not json", b"{\"incident\": ", b"{\"version\": \"1\"}"] {
            let err = Alert::from_slice(body).unwrap_err();
            assert!(matches!(err, RelayError::Decode(_)), "body {body:?}");
        }
    }

    #[test]
    fn test_state_must_match_exactly() {
        let incident = Incident {
            state: "Closed".to_string(),
            ..Incident::default()
        };
        assert!(!incident.is_closed());
    }
}
