use crate::types::{error_codes, is_method_supported, JsonRpcError, JsonRpcRequest};

impl JsonRpcRequest {
    /// Validates the request envelope.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::InvalidVersion`] if not JSON-RPC 2.0
    /// - [`ValidationError::InvalidMethod`] if the method name contains invalid characters
    /// - [`ValidationError::MethodNotFound`] if the wallet does not answer the method
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.jsonrpc != "2.0" {
            return Err(ValidationError::InvalidVersion(self.jsonrpc.to_string()));
        }

        if self.method.is_empty() || !self.method.chars().all(|c| c.is_alphanumeric() || c == '_')
        {
            return Err(ValidationError::InvalidMethod(self.method.clone()));
        }

        if !is_method_supported(&self.method) {
            return Err(ValidationError::MethodNotFound(self.method.clone()));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid JSON-RPC version: {0}")]
    InvalidVersion(String),

    #[error("Invalid method name: {0}")]
    InvalidMethod(String),

    #[error("The method \"{0}\" does not exist / is not available.")]
    MethodNotFound(String),
}

impl From<ValidationError> for JsonRpcError {
    fn from(err: ValidationError) -> Self {
        let code = match err {
            ValidationError::InvalidVersion(_) | ValidationError::InvalidMethod(_) => {
                error_codes::INVALID_REQUEST
            }
            ValidationError::MethodNotFound(_) => error_codes::METHOD_NOT_FOUND,
        };
        JsonRpcError::new(code, err.to_string())
    }
}
