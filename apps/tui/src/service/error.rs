use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Connection refused, DNS failure, or the transport giving up
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("server returned status {status}")]
    Server { status: u16 },

    /// A 2xx response without a usable `answer` field
    #[error("malformed response: {0}")]
    Schema(String),
}
