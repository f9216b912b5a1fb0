use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{macros::str_opt_ref, maybe_de_datetime};

/// A decoy profile attached to an account.
///
/// Every field is optional on the wire, including the id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fake {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    /// Paid access ends at this moment.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "maybe_de_datetime"
    )]
    subscribe_date: Option<DateTime<Utc>>,

    /// Kept as sent; the service does not restrict it to a closed set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,

    #[serde(default)]
    data: HashMap<String, String>,
}

impl Fake {
    /// Returns the service-assigned id, if the reply carried one.
    pub fn id(&self) -> Option<&str> {
        str_opt_ref!(self.id)
    }

    /// Returns the Instagram username, if set.
    pub fn username(&self) -> Option<&str> {
        str_opt_ref!(self.username)
    }

    /// Returns the description, if set.
    pub fn description(&self) -> Option<&str> {
        str_opt_ref!(self.description)
    }

    /// Returns when paid access ends, if the profile was ever paid for.
    pub fn subscribe_date(&self) -> Option<DateTime<Utc>> {
        self.subscribe_date
    }

    /// Returns the status of the profile, if reported.
    pub fn status(&self) -> Option<&str> {
        str_opt_ref!(self.status)
    }

    /// Returns the free-form data map.
    pub fn data(&self) -> &HashMap<String, String> {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn empty_object_decodes() {
        let fake: Fake = serde_json::from_str("{}").unwrap();
        assert!(fake.id().is_none());
        assert!(fake.username().is_none());
        assert!(fake.subscribe_date().is_none());
        assert!(fake.data().is_empty());
    }

    #[test]
    fn null_subscribe_date_is_absent() {
        let fake: Fake =
            serde_json::from_str(r#"{"username":"decoy","subscribe_date":null}"#).unwrap();
        assert_eq!(fake.username(), Some("decoy"));
        assert!(fake.subscribe_date().is_none());
    }

    #[test]
    fn subscribe_date_parses() {
        let fake: Fake =
            serde_json::from_str(r#"{"id":"f1","subscribe_date":"2024-05-20T10:00:00"}"#).unwrap();
        assert_eq!(fake.subscribe_date().unwrap().month(), 5);
    }

    #[test]
    fn any_status_string_decodes() {
        let fake: Fake = serde_json::from_str(r#"{"id":"f1","status":"BANNED"}"#).unwrap();
        assert_eq!(fake.status(), Some("BANNED"));

        let fake: Fake = serde_json::from_str(r#"{"id":"f2","status":"PAUSE"}"#).unwrap();
        assert_eq!(fake.status(), Some("PAUSE"));
    }
}
