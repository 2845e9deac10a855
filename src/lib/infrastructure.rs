//! Adapters implementing the domain collaborator traits

pub mod email;
pub mod plaintext;
pub mod queue;
pub mod sites;
pub mod templates;
