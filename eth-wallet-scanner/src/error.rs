use thiserror::Error;

/// Scanner-specific error types
///
/// This enum defines all possible errors that can occur while scanning blocks,
/// looking up balances and writing reports. Each variant carries the details
/// needed to tell transport failures apart from node-side failures.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Error reaching the Ethereum RPC node (connection refused, timeout, HTTP failure)
    #[error("RPC connection error: {0}")]
    RPCConnectionError(String),

    /// The node answered with a JSON-RPC error object
    #[error("RPC error {code}: {message}")]
    RpcError {
        /// JSON-RPC error code
        code: i64,

        /// Error message reported by the node
        message: String,
    },

    /// The response body or result payload could not be decoded
    #[error("Failed to decode RPC response: {0}")]
    DecodeError(String),

    /// The node has no block at the requested height
    #[error("Block {0} not found")]
    BlockNotFound(u64),

    /// Error producing a CSV report
    #[error("Report error: {0}")]
    ReportError(#[from] csv::Error),

    /// Filesystem error while writing a report
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ServiceError::DecodeError(err.to_string())
        } else {
            ServiceError::RPCConnectionError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::DecodeError(err.to_string())
    }
}

/// Result alias used throughout the library
pub type ServiceResult<T> = Result<T, ServiceError>;
