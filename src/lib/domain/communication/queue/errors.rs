//! Queue errors

use thiserror::Error;

/// Errors raised by a mail queue
#[derive(Debug, Error)]
pub enum QueueError {
    /// The queue is not accepting messages
    #[error("mail queue is unavailable")]
    Unavailable,

    /// The queue is at capacity
    #[error("mail queue is full ({capacity} messages)")]
    Full {
        /// Maximum number of queued messages
        capacity: usize,
    },
}
