//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and rejected actions so clients
//! can bubble them up with consistent context.
use battle_core::{ActionError, ModuleId};
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("battle worker command channel closed")]
    CommandChannelClosed,

    #[error("battle worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("battle worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("{module} is not in the module catalog")]
    UnknownModule { module: ModuleId },

    #[error("action rejected: {0}")]
    ActionRejected(#[from] ActionError),
}
