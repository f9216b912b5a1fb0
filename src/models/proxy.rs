use serde::{Deserialize, Serialize};

/// Payload for registering a proxy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewProxy {
    /// Proxy host.
    pub host: String,
    /// Proxy port.
    pub port: u16,
    /// Proxy login.
    pub username: String,
    /// Proxy password.
    pub password: String,
}

/// A proxy an account connects through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proxy {
    id: String,
    host: String,
    port: u16,
    username: String,
    password: String,
}

impl Proxy {
    /// Returns the service-assigned id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the proxy host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the proxy port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the proxy login.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the proxy password.
    pub fn password(&self) -> &str {
        &self.password
    }
}
