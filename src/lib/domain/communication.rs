//! Email composition and the collaborators it talks to.

pub mod composer;
pub mod email_addresses;
pub mod mailer;
pub mod plaintext;
pub mod queue;
pub mod sites;
pub mod templates;
