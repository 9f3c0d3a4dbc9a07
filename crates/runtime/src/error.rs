//! Unified error type surfaced by the world API.
//!
//! Wraps the core crate's typed failures so callers can bubble them up with a
//! single `?`, while lookups of stale handles get their own variants.
use pickup_core::{
    AgentError, AgentId, ConfigError, CoreError, ErrorSeverity, ItemId, TransferError,
    TransitionError,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("{0} does not exist")]
    ItemNotFound(ItemId),

    #[error("{0} does not exist")]
    AgentNotFound(AgentId),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl CoreError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ItemNotFound(_) | Self::AgentNotFound(_) => ErrorSeverity::Recoverable,
            Self::Transfer(err) => err.severity(),
            Self::Transition(err) => err.severity(),
            Self::Agent(err) => err.severity(),
            Self::Config(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ItemNotFound(_) => "RUNTIME_ITEM_NOT_FOUND",
            Self::AgentNotFound(_) => "RUNTIME_AGENT_NOT_FOUND",
            Self::Transfer(err) => err.error_code(),
            Self::Transition(err) => err.error_code(),
            Self::Agent(err) => err.error_code(),
            Self::Config(err) => err.error_code(),
        }
    }
}
