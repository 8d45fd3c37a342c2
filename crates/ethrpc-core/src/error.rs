use crate::rpc::{HexError, TransportError};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("RPC communication failure: {0}")]
    Rpc(#[from] RpcError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unparseable transaction count `{raw}`: {source}")]
    UnparseableCount {
        raw: String,
        #[source]
        source: HexError,
    },
}

impl CoreError {
    /// Code and message of a node-side JSON-RPC error, if this is one.
    pub fn server_error(&self) -> Option<(i64, &str)> {
        match self {
            CoreError::Rpc(RpcError::ServerError { code, message, .. }) => {
                Some((*code, message.as_str()))
            }
            _ => None,
        }
    }
}

/// Failures of a single JSON-RPC round trip.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("HTTP transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("encode JSON-RPC request: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("decode JSON-RPC response: {source}; body={body}")]
    Decoding {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// The node answered with a JSON-RPC error object. `message` is the
    /// node's own text, unaltered.
    #[error("JSON-RPC error {code}: {message}")]
    ServerError {
        code: i64,
        message: String,
        data: Option<serde_json::Value>,
    },

    #[error("invalid JSON-RPC response: {0}")]
    InvalidResponse(String),

    /// The envelope decoded but `result` has the wrong JSON type for the
    /// method. Counts as a decoding failure.
    #[error("decode {method} result: {message}")]
    InvalidResult {
        method: &'static str,
        message: String,
    },
}

impl From<TransportError> for CoreError {
    fn from(err: TransportError) -> Self {
        CoreError::Rpc(RpcError::Transport(err))
    }
}
