//! Queued mail transport module

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

mod errors;
mod priority;
mod queued_email;

pub use errors::QueueError;
pub use priority::{Priority, PriorityError};
pub use queued_email::QueuedEmail;

/// A transport that stores messages for later, priority-ordered delivery
#[async_trait]
pub trait MailQueue: Clone + Send + Sync + 'static {
    /// Enqueue a message
    ///
    /// # Arguments
    /// * `email` - The [`QueuedEmail`] to store.
    ///
    /// # Returns
    /// [`Ok`] once the message is queued, or a [`QueueError`] if the queue cannot accept it.
    async fn enqueue(&self, email: &QueuedEmail) -> Result<(), QueueError>;
}

#[cfg(test)]
mock! {
    pub MailQueue {}

    impl Clone for MailQueue {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl MailQueue for MailQueue {
        async fn enqueue(&self, email: &QueuedEmail) -> Result<(), QueueError>;
    }
}

#[cfg(test)]
pub mod tests {
    pub use super::MockMailQueue;
}
