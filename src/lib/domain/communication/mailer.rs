//! Direct mail transport module

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

mod errors;
mod message;

pub use errors::TransportError;
pub use message::{Headers, Message, REPLY_TO};

/// A transport that delivers a message immediately
#[async_trait]
pub trait Mailer: Clone + Send + Sync + 'static {
    /// Send a message
    ///
    /// # Arguments
    /// * `message` - The [`Message`] to send: a plaintext body with an HTML alternative.
    ///
    /// # Returns
    /// A [`Result`] indicating success or failure.
    async fn send(&self, message: &Message) -> Result<(), TransportError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Clone for Mailer {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl Mailer for Mailer {
        async fn send(&self, message: &Message) -> Result<(), TransportError>;
    }
}
