//! Sites module
//!
//! Works out which `domain` and `protocol` links in an email should point at.

mod errors;
mod origin;
mod request;

pub use errors::SiteError;
pub use origin::{resolve_origin, CurrentSite, Origin, SiteConfig, DEFAULT_PROTOCOL};
pub use request::RequestMetadata;

#[cfg(test)]
pub mod tests {
    pub use super::origin::MockCurrentSite;
}
