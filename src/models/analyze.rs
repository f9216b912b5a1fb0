use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Payload for starting an analysis of an Instagram account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewAnalyze {
    /// Instagram username to analyze.
    pub username: String,
}

/// An analysis job scanning a target account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analyze {
    id: String,
    username: String,
    /// Collected values, grouped by key.
    #[serde(default)]
    data: HashMap<String, Vec<String>>,
    user_id: String,
    is_subscribe: bool,
}

impl Analyze {
    /// Returns the service-assigned id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the analyzed username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the collected values, grouped by key.
    pub fn data(&self) -> &HashMap<String, Vec<String>> {
        &self.data
    }

    /// Returns the values collected under `key`.
    pub fn values(&self, key: &str) -> &[String] {
        self.data.get(key).map_or(&[][..], Vec::as_slice)
    }

    /// Returns the id of the owning user.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns true if the analysis is paid for.
    pub fn is_subscribe(&self) -> bool {
        self.is_subscribe
    }
}
