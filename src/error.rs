//! Unified error type.

use thiserror::Error as ThisError;

/// The error type returned by herald's fallible operations.
///
/// Application-level errors (400, 404, 406, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// infrastructure failures: binding to a port, accepting a connection, or
/// reading configuration.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {key}: {reason}")]
    Config { key: &'static str, reason: String },
}
