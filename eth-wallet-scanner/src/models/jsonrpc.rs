use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC protocol version sent with every request
pub const JSONRPC_VERSION: &str = "2.0";

/// Identifier used for every request; calls are strictly sequential
pub const REQUEST_ID: u64 = 1;

/// JSON-RPC 2.0 request structure
///
/// Built fresh for each call with a heterogeneous parameter list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC protocol version (always "2.0")
    pub jsonrpc: String,

    /// Method name to call
    pub method: String,

    /// Method parameters
    pub params: Vec<Value>,

    /// Request identifier
    pub id: u64,
}

impl JsonRpcRequest {
    /// Create a new request for `method` with the given parameters
    pub fn new(method: &str, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.to_string(),
            params,
            id: REQUEST_ID,
        }
    }
}

/// JSON-RPC 2.0 response structure
///
/// The result is kept untyped and decoded by each call site. Nodes omit
/// `result` on failure and `error` on success, so both are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    /// Method result
    #[serde(default)]
    pub result: Option<Value>,

    /// Error details, present when the call failed on the node
    #[serde(default)]
    pub error: Option<JsonRpcErrorDetail>,

    /// Request identifier echoed by the node
    #[serde(default)]
    pub id: Value,
}

/// JSON-RPC 2.0 error detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorDetail {
    /// Error code
    pub code: i64,

    /// Error message
    pub message: String,

    /// Additional error data (optional)
    #[serde(default)]
    pub data: Option<Value>,
}

/// Parse a hexadecimal string into a `U256` value.
///
/// Expects a string starting with "0x".
pub fn parse_hex_u256(hex: &str) -> Result<U256, String> {
    let hex = hex
        .strip_prefix("0x")
        .ok_or_else(|| "Hex value must start with 0x".to_string())?;
    if hex.is_empty() {
        return Err("Hex value has no digits".to_string());
    }
    U256::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
}

/// Format a block number as the "0x"-prefixed quantity the node expects.
pub fn format_hex_u64(value: u64) -> String {
    format!("0x{:x}", value)
}
