//! Email addresses module.

mod email_address;
mod recipient;

pub use email_address::{EmailAddress, EmailAddressError};
pub use recipient::Recipient;
