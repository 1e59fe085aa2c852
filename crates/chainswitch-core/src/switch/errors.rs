use crate::{chain::ChainId, types::error_codes};

/// Failure of a chain switch request.
///
/// Every variant maps onto a provider error code via [`SwitchError::code`]. Errors are
/// surfaced to the dApp as-is; nothing in the switch flow retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SwitchError {
    #[error(
        "Unrecognized chain ID \"{0}\". Try adding the chain using wallet_addEthereumChain first."
    )]
    UnrecognizedChain(ChainId),

    /// The user declined a prompt, or a newer request for the same origin superseded it.
    #[error("User rejected the request.")]
    UserRejected,

    #[error("Permission request failed: {0}")]
    PermissionRequestFailed(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SwitchError {
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::UnrecognizedChain(_) => error_codes::UNRECOGNIZED_CHAIN,
            Self::UserRejected => error_codes::USER_REJECTED,
            Self::InvalidParams(_) => error_codes::INVALID_PARAMS,
            Self::PermissionRequestFailed(_) | Self::Internal(_) => error_codes::INTERNAL_ERROR,
        }
    }
}
