use crate::error::Error as ApiErr;

/// Result alias used by every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, ApiErr>;
