use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Payload for registering a worker node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewSubServer {
    /// Worker host.
    pub host: String,
    /// Worker port.
    pub port: u16,
}

/// A worker node that runs automation for a group of accounts.
///
/// Two sub-servers are equal when their ids are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubServer {
    id: String,
    host: String,
    port: u16,
    #[serde(default)]
    accounts_ids: Vec<String>,
}

impl SubServer {
    /// Returns the service-assigned id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the worker host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the worker port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns ids of the accounts assigned to this worker.
    pub fn accounts_ids(&self) -> &[String] {
        &self.accounts_ids
    }
}

impl PartialEq for SubServer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SubServer {}

impl Hash for SubServer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
