use domain::DomainError;
use thiserror::Error;

use crate::broadcaster::BroadcastError;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
    #[error("broadcast error: {0}")]
    Broadcast(#[from] BroadcastError),
}
