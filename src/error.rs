use thiserror::Error;

/// Every failure the client can surface.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure: connection refused, timeout, broken body.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not match the expected schema.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The connection ceiling was closed under a waiting request.
    #[error("connection is closed")]
    Closed(#[from] tokio::sync::AcquireError),

    /// A string did not name any variant of a closed enum.
    #[error("unknown {kind} value `{value}`")]
    UnknownVariant {
        /// Name of the enum.
        kind: &'static str,
        /// The rejected string.
        value: String,
    },

    /// A lookup inside a composite helper came back empty.
    #[error("{kind} {id} was not found")]
    NotFound {
        /// Entity family.
        kind: &'static str,
        /// The id that was looked up.
        id: String,
    },

    /// A notification helper was called but no notifier was configured.
    #[error("no notifier configured")]
    NoNotifier,

    /// The notifier rejected the message.
    #[error("notification failed: {0}")]
    Notify(String),
}

impl Error {
    /// Returns true for failures that may go away on their own.
    ///
    /// Decode errors, enum mismatches and notifier errors are not transient.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Http(e) => {
                e.is_timeout() || e.is_connect() || e.is_request() || e.is_body()
            }
            _ => false,
        }
    }

    /// Returns true if the response body failed to decode.
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_))
    }
}
