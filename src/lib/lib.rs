#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Templated email composition and dispatch.
//!
//! Renders a subject and an HTML body from templates, derives a plaintext
//! fallback and hands the result to either a direct [`Mailer`] or a
//! priority-aware [`MailQueue`].
//!
//! [`Mailer`]: domain::communication::mailer::Mailer
//! [`MailQueue`]: domain::communication::queue::MailQueue

pub mod domain;
pub mod infrastructure;
