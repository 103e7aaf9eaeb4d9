use alloy::primitives::U256;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::{
    error::{ServiceError, ServiceResult},
    models::jsonrpc::{format_hex_u64, parse_hex_u256, JsonRpcRequest, JsonRpcResponse},
};

/// Ethereum RPC client for blockchain interactions
///
/// Speaks plain JSON-RPC 2.0 over HTTP POST. Every call is a single request
/// with no retry; results come back untyped and are decoded by the caller.
#[derive(Clone, Debug)]
pub struct EthereumClient {
    /// Shared HTTP client
    http: reqwest::Client,
    /// Node endpoint
    rpc_url: String,
}

impl EthereumClient {
    /// Create a new Ethereum client for the node at `rpc_url`
    ///
    /// No request is issued here; an unreachable node is reported by the first call.
    pub fn new(rpc_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            rpc_url: rpc_url.to_string(),
        }
    }

    /// Endpoint this client talks to
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Send a JSON-RPC request and return its raw result payload
    ///
    /// # Arguments
    ///
    /// * `method` - RPC method name, e.g. `eth_getBalance`
    /// * `params` - Positional parameters
    ///
    /// # Returns
    ///
    /// * `ServiceResult<Value>` - The `result` field (`Value::Null` when absent), or
    ///   `ServiceError::RpcError` when the node answered with an error object
    #[instrument(skip(self, params), err)]
    pub async fn request(&self, method: &str, params: Vec<Value>) -> ServiceResult<Value> {
        let request = JsonRpcRequest::new(method, params);
        debug!("Sending {} with params {:?}", request.method, request.params);

        let response = self
            .http
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await?;

        let body = response.bytes().await?;
        let response: JsonRpcResponse = serde_json::from_slice(&body)?;

        if let Some(error) = response.error {
            return Err(ServiceError::RpcError {
                code: error.code,
                message: error.message,
            });
        }

        Ok(response.result.unwrap_or(Value::Null))
    }

    /// Fetch a block with full transaction objects
    ///
    /// # Returns
    ///
    /// * `ServiceResult<Value>` - Raw block payload; `ServiceError::BlockNotFound`
    ///   when the node has no block at that height
    pub async fn get_block_by_number(&self, block_number: u64) -> ServiceResult<Value> {
        let block = self
            .request(
                "eth_getBlockByNumber",
                vec![json!(format_hex_u64(block_number)), json!(true)],
            )
            .await?;

        if block.is_null() {
            return Err(ServiceError::BlockNotFound(block_number));
        }
        Ok(block)
    }

    /// Fetch the latest balance of `address` in wei
    pub async fn get_balance(&self, address: &str) -> ServiceResult<U256> {
        let result = self
            .request("eth_getBalance", vec![json!(address), json!("latest")])
            .await?;

        let balance_hex = result
            .as_str()
            .ok_or_else(|| ServiceError::DecodeError(format!("Balance is not a string: {}", result)))?;
        parse_hex_u256(balance_hex).map_err(ServiceError::DecodeError)
    }

    /// Fetch the latest code deployed at `address` as a "0x"-prefixed hex string
    pub async fn get_code(&self, address: &str) -> ServiceResult<String> {
        let result = self
            .request("eth_getCode", vec![json!(address), json!("latest")])
            .await?;

        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ServiceError::DecodeError(format!("Code is not a string: {}", result)))
    }

    /// Trace a transaction with the call tracer and return the call frame
    pub async fn trace_transaction(&self, tx_hash: &str) -> ServiceResult<Value> {
        self.request(
            "debug_traceTransaction",
            vec![json!(tx_hash), json!({ "tracer": "callTracer" })],
        )
        .await
    }
}
