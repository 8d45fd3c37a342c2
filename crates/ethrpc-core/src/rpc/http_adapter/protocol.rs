use crate::error::{CoreError, RpcError};

pub(super) const JSONRPC_VERSION: &str = "2.0";

#[derive(serde::Serialize)]
pub(super) struct JsonRpcRequest<'a, P: ?Sized> {
    pub(super) id: u64,
    pub(super) jsonrpc: &'static str,
    pub(super) method: &'a str,
    pub(super) params: &'a P,
}

/// Response envelope. Every field is optional so that a bare `{}` still
/// decodes; anything that is not a JSON object does not.
#[derive(serde::Deserialize)]
pub(super) struct JsonRpcResponse {
    #[serde(default)]
    pub(super) id: serde_json::Value,
    #[serde(default)]
    pub(super) jsonrpc: Option<String>,
    #[serde(default)]
    pub(super) result: Option<serde_json::Value>,
    #[serde(default)]
    pub(super) error: Option<serde_json::Value>,
}

/// Parse a JSON-RPC error value into a structured `CoreError`.
///
/// The JSON-RPC spec defines errors as `{"code": <int>, "message": <string>}`
/// with an optional `data` member. If the error value matches that shape, we
/// produce a `ServerError`; otherwise we fall back to `InvalidResponse` with
/// the raw JSON.
pub(super) fn parse_jsonrpc_error(err: serde_json::Value) -> CoreError {
    #[derive(serde::Deserialize)]
    struct JsonRpcError {
        code: i64,
        message: String,
        #[serde(default)]
        data: Option<serde_json::Value>,
    }

    match serde_json::from_value::<JsonRpcError>(err.clone()) {
        Ok(parsed) => CoreError::Rpc(RpcError::ServerError {
            code: parsed.code,
            message: parsed.message,
            data: parsed.data,
        }),
        Err(_) => CoreError::Rpc(RpcError::InvalidResponse(format!(
            "non-standard JSON-RPC error: {err}"
        ))),
    }
}

/// Best-effort check that the echoed id matches the one we sent. Only used
/// for logging; mismatches are not treated as errors.
pub(super) fn id_matches(sent: u64, echoed: &serde_json::Value) -> bool {
    match echoed {
        serde_json::Value::Number(n) => n.as_u64() == Some(sent),
        serde_json::Value::String(s) => s.parse::<u64>().ok() == Some(sent),
        _ => false,
    }
}
