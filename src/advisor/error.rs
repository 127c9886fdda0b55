use crate::money::Cents;
use thiserror::Error;

/// Structurally invalid input. An empty recommendation list is never an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    #[error("Tuition amount must be positive, got {0}")]
    InvalidTuition(Cents),

    #[error("{field} must be non-negative, got {amount}")]
    NegativeAmount { field: &'static str, amount: Cents },

    #[error("{field} must be at most {}, got {amount}", Cents::MAX_INPUT)]
    AmountTooLarge { field: &'static str, amount: Cents },

    #[error("Invalid card '{name}': {reason}")]
    InvalidCard { name: String, reason: String },

    #[error("Invalid advisor config: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
