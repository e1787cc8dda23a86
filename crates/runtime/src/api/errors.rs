//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and input validation so clients
//! can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use symphony_core::{LaneError, Side};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("simulation worker stopped before the match ended")]
    WorkerStopped,

    #[error("runtime requires a {side} formation before building")]
    MissingFormation { side: Side },

    #[error(transparent)]
    InvalidLane(#[from] LaneError),
}
