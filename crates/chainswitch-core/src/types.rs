//! JSON-RPC 2.0 wire types.
//!
//! - [`JsonRpcRequest`], [`JsonRpcResponse`], [`JsonRpcError`]: protocol conformance
//! - [`error_codes`]: the numeric codes this wallet answers with, including the EIP-1193
//!   provider codes (`4001`, `4902`)

use serde::{Deserialize, Serialize};
use std::{borrow::Cow, sync::Arc};

/// JSON-RPC protocol version constant.
pub const JSONRPC_VERSION: &str = "2.0";

/// Pre-allocated `Cow` for the JSON-RPC version.
pub const JSONRPC_VERSION_COW: Cow<'static, str> = Cow::Borrowed(JSONRPC_VERSION);

/// Methods answered by [`crate::rpc::RpcDispatcher`].
pub const SUPPORTED_METHODS: &[&str] = &["wallet_switchEthereumChain", "eth_chainId"];

/// Error codes used in [`JsonRpcError::code`].
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    /// EIP-1193: the user rejected the request.
    pub const USER_REJECTED: i32 = 4001;
    /// EIP-3326: the requested chain has not been added to the wallet.
    pub const UNRECOGNIZED_CHAIN: i32 = 4902;
}

#[inline]
#[must_use]
pub fn is_method_supported(method: &str) -> bool {
    SUPPORTED_METHODS.contains(&method)
}

/// JSON-RPC 2.0 request.
///
/// `id` is behind an `Arc` so responses can echo it without deep-copying the value.
///
/// # Example
///
/// ```
/// use chainswitch_core::types::JsonRpcRequest;
/// use serde_json::json;
///
/// let request = JsonRpcRequest::new(
///     "wallet_switchEthereumChain",
///     Some(json!([{ "chainId": "0x1" }])),
///     json!(1),
/// );
///
/// assert_eq!(request.method, "wallet_switchEthereumChain");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: Cow<'static, str>,
    pub method: String,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
    #[serde(default = "null_id")]
    pub id: Arc<serde_json::Value>,
}

fn null_id() -> Arc<serde_json::Value> {
    Arc::new(serde_json::Value::Null)
}

/// JSON-RPC 2.0 response. Carries either `result` or `error`, never both.
///
/// # Example
///
/// ```
/// use chainswitch_core::types::JsonRpcResponse;
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let response = JsonRpcResponse::success(json!(null), Arc::new(json!(1)));
/// assert!(response.error.is_none());
///
/// let response = JsonRpcResponse::error(4001, "User rejected the request.", Arc::new(json!(1)));
/// assert_eq!(response.error.unwrap().code, 4001);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Arc<serde_json::Value>,
}

impl JsonRpcRequest {
    #[must_use]
    pub fn new(
        method: impl Into<String>,
        params: Option<serde_json::Value>,
        id: serde_json::Value,
    ) -> Self {
        Self { jsonrpc: JSONRPC_VERSION_COW, method: method.into(), params, id: Arc::new(id) }
    }
}

impl JsonRpcResponse {
    /// Successful response. A `null` result is still serialized as `"result": null`.
    #[must_use]
    pub fn success(result: serde_json::Value, id: Arc<serde_json::Value>) -> Self {
        Self { jsonrpc: JSONRPC_VERSION_COW, result: Some(result), error: None, id }
    }

    #[must_use]
    pub fn error(code: i32, message: impl Into<String>, id: Arc<serde_json::Value>) -> Self {
        Self::from_error(JsonRpcError::new(code, message), id)
    }

    #[must_use]
    pub fn from_error(error: JsonRpcError, id: Arc<serde_json::Value>) -> Self {
        Self { jsonrpc: JSONRPC_VERSION_COW, result: None, error: Some(error), id }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// JSON-RPC 2.0 error object.
///
/// Standard codes are listed in [`error_codes`]. `data` carries structured context, for
/// example the chain id that could not be found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    #[must_use]
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), data: None }
    }

    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}
