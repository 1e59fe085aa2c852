use super::SwitchChainParams;
use crate::{
    switch::{ChainSwitchCoordinator, SwitchError},
    types::{JsonRpcError, JsonRpcRequest, JsonRpcResponse},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// Answers the wallet JSON-RPC methods on behalf of one origin at a time.
///
/// # Example
///
/// ```no_run
/// # use chainswitch_core::{
/// #     rpc::RpcDispatcher, switch::ChainSwitchCoordinator, types::JsonRpcRequest,
/// # };
/// # use std::sync::Arc;
/// # async fn example(coordinator: Arc<ChainSwitchCoordinator>) {
/// let dispatcher = RpcDispatcher::new(coordinator);
/// let request = JsonRpcRequest::new(
///     "wallet_switchEthereumChain",
///     Some(serde_json::json!([{ "chainId": "0xe708" }])),
///     serde_json::json!(1),
/// );
///
/// let response = dispatcher.handle("https://dapp.example", request).await;
/// assert!(response.error.is_none());
/// # }
/// ```
#[derive(Clone)]
pub struct RpcDispatcher {
    coordinator: Arc<ChainSwitchCoordinator>,
}

impl RpcDispatcher {
    pub fn new(coordinator: Arc<ChainSwitchCoordinator>) -> Self {
        Self { coordinator }
    }

    #[must_use]
    pub fn coordinator(&self) -> &Arc<ChainSwitchCoordinator> {
        &self.coordinator
    }

    /// Handles a single request from `origin`. Failures are returned as error responses.
    pub async fn handle(&self, origin: &str, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = Arc::clone(&request.id);

        if let Err(e) = request.validate() {
            debug!(origin, method = %request.method, error = %e, "request rejected");
            return JsonRpcResponse::from_error(e.into(), id);
        }

        debug!(origin, method = %request.method, "dispatching request");
        let result = match request.method.as_str() {
            "wallet_switchEthereumChain" => {
                self.switch_ethereum_chain(origin, request.params.as_ref()).await
            }
            "eth_chainId" => Ok(json!(self.coordinator.current_chain_id(origin))),
            other => {
                return JsonRpcResponse::from_error(
                    super::ValidationError::MethodNotFound(other.to_string()).into(),
                    id,
                )
            }
        };

        match result {
            Ok(value) => JsonRpcResponse::success(value, id),
            Err(e) => JsonRpcResponse::from_error(e.into(), id),
        }
    }

    async fn switch_ethereum_chain(
        &self,
        origin: &str,
        params: Option<&Value>,
    ) -> Result<Value, SwitchError> {
        let params = SwitchChainParams::try_from(params.unwrap_or(&Value::Null))?;
        self.coordinator.switch_chain(origin, params.chain_id).await?;
        Ok(Value::Null)
    }
}

impl From<SwitchError> for JsonRpcError {
    fn from(err: SwitchError) -> Self {
        let error = JsonRpcError::new(err.code(), err.to_string());
        match err {
            SwitchError::UnrecognizedChain(chain_id) => {
                error.with_data(json!({ "chainId": chain_id }))
            }
            _ => error,
        }
    }
}
