use thiserror::Error;
use uuid::Uuid;

use bridge_core::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("confirmation token not found: {0}")]
    Unknown(Uuid),

    #[error("confirmation token expired: {0}")]
    Expired(Uuid),

    #[error("confirmation token already used: {0}")]
    Consumed(Uuid),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfirmError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
