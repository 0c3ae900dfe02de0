// Engine error type.
//
// Every variant is an invalid-input condition: required data for the selected
// policy was withheld, or upstream data does not form a usable draft order.
// Gaps in scoring data are not errors; they only lower computed totals.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{policy} draft order requires {field}")]
    MissingPolicyInput {
        policy: &'static str,
        field: &'static str,
    },

    #[error("{policy} draft order has not been set yet: the draft has no slot assignments")]
    DraftOrderNotSet { policy: &'static str },

    #[error("invalid draft order: {message}")]
    InvalidDraftOrder { message: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
