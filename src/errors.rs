use thiserror::Error;

use crate::types::PurchaseField;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("invalid input: {message}")]
    InvalidInput {
        message: String,
    },

    #[error("invalid {field}: {message}")]
    Validation {
        field: PurchaseField,
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LedgerError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        LedgerError::InvalidInput {
            message: message.into(),
        }
    }

    pub(crate) fn validation(field: PurchaseField, message: impl Into<String>) -> Self {
        LedgerError::Validation {
            field,
            message: message.into(),
        }
    }

    /// field that failed purchase validation, if any
    pub fn field(&self) -> Option<PurchaseField> {
        match self {
            LedgerError::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
