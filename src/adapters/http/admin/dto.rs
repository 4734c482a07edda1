//! HTTP DTOs for the admin publish endpoint.

use serde::Deserialize;

use crate::domain::{Payload, ZoneName};

/// Body of a publish request.
///
/// Missing fields default to the empty string and unknown fields are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublishRequest {
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub message: String,
}

impl PublishRequest {
    pub fn into_parts(self) -> (ZoneName, Payload) {
        (ZoneName::new(self.zone), Payload::from(self.message))
    }
}

/// Plain-text confirmation returned after dispatch.
pub fn confirmation(zone: &ZoneName) -> String {
    format!("Message sent to zone {}", zone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn publish_request_deserializes() {
        let req: PublishRequest =
            serde_json::from_value(json!({"zone": "lobby", "message": "hi"})).unwrap();
        let (zone, payload) = req.into_parts();

        assert_eq!(zone, ZoneName::from("lobby"));
        assert_eq!(payload.as_str(), "hi");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let req: PublishRequest = serde_json::from_value(json!({"message": "hi"})).unwrap();

        assert_eq!(req.zone, "");
        assert_eq!(req.message, "hi");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let req: PublishRequest =
            serde_json::from_value(json!({"zone": "a", "message": "b", "priority": 9})).unwrap();

        assert_eq!(req.zone, "a");
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        let result: Result<PublishRequest, _> =
            serde_json::from_value(json!({"zone": 1, "message": "b"}));

        assert!(result.is_err());
    }

    #[test]
    fn confirmation_names_the_zone() {
        assert_eq!(confirmation(&"lobby".into()), "Message sent to zone lobby");
        assert_eq!(confirmation(&"".into()), "Message sent to zone ");
    }
}
