use std::{fmt, sync::Arc};

use crate::{
    client::{ClientBuilder, Connection},
    notify::Notifier,
    result::Result,
};

mod accounts;
mod actions;
mod analyze;
mod fakes;
mod proxies;
mod sub_servers;
mod users;
mod worker;

pub use worker::WorkerReply;

/// Client for the main automation service.
///
/// Covers accounts, actions, analyses, decoy profiles, proxies, sub-servers and
/// users. Every call goes through the connection's retry policy.
///
/// The pool is released when the client is dropped, or explicitly through
/// [`InstaproApi::stop`].
pub struct InstaproApi {
    conn: Connection,
    notifier: Option<Arc<dyn Notifier>>,
}

impl InstaproApi {
    /// Starts a client for `host:port` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn start(host: impl Into<String>, port: u16) -> Result<Self> {
        ClientBuilder::new(host, port).start()
    }

    pub(crate) fn from_parts(conn: Connection, notifier: Option<Arc<dyn Notifier>>) -> Self {
        Self { conn, notifier }
    }

    /// Closes the connection and releases the pool. Same as dropping the client,
    /// plus a debug log line.
    pub fn stop(self) {
        self.conn.stop();
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn notifier(&self) -> Option<&dyn Notifier> {
        self.notifier.as_deref()
    }
}

impl fmt::Debug for InstaproApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstaproApi")
            .field("conn", &self.conn)
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}

/// Client for the decoy-profile worker service.
#[derive(Debug)]
pub struct FakeApi {
    conn: Connection,
}

impl FakeApi {
    /// Starts a client for `host:port` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn start(host: impl Into<String>, port: u16) -> Result<Self> {
        ClientBuilder::new(host, port).start_fake()
    }

    pub(crate) fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Closes the connection and releases the pool. Same as dropping the client,
    /// plus a debug log line.
    pub fn stop(self) {
        self.conn.stop();
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
