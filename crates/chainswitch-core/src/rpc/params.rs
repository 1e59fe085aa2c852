use crate::{
    chain::{ChainId, ChainIdError},
    switch::SwitchError,
};
use serde_json::Value;

/// Parameters of `wallet_switchEthereumChain`: `[{ "chainId": "0x..." }]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchChainParams {
    pub chain_id: ChainId,
}

impl TryFrom<&Value> for SwitchChainParams {
    type Error = SwitchError;

    fn try_from(params: &Value) -> Result<Self, Self::Error> {
        let object = params
            .as_array()
            .and_then(|array| array.first())
            .and_then(Value::as_object)
            .ok_or_else(|| {
                SwitchError::InvalidParams(format!(
                    "Expected single, object parameter. Received:\n{params}"
                ))
            })?;

        let unexpected: Vec<&str> =
            object.keys().map(String::as_str).filter(|key| *key != "chainId").collect();
        if !unexpected.is_empty() {
            return Err(SwitchError::InvalidParams(format!(
                "Received unexpected keys on object parameter. Unsupported keys:\n{}",
                unexpected.join(", ")
            )));
        }

        let raw = object.get("chainId").and_then(Value::as_str).ok_or_else(|| {
            SwitchError::InvalidParams(format!(
                "Expected 0x-prefixed, unpadded, non-zero hexadecimal string 'chainId'. \
                 Received:\n{}",
                object.get("chainId").unwrap_or(&Value::Null)
            ))
        })?;

        let chain_id = ChainId::parse(raw).map_err(|e| {
            SwitchError::InvalidParams(match e {
                ChainIdError::Unsafe(_) => format!(
                    "Invalid chain ID \"{raw}\": numerical value greater than max safe value. \
                     Received:\n{raw}"
                ),
                _ => format!(
                    "Expected 0x-prefixed, unpadded, non-zero hexadecimal string 'chainId'. \
                     Received:\n{raw}"
                ),
            })
        })?;

        Ok(Self { chain_id })
    }
}
