//! Recipient

use std::{fmt, str::FromStr};

use serde::Serialize;

use super::{EmailAddress, EmailAddressError};

/// A message recipient: an optional display name and an address
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Recipient {
    /// Display name, empty when the recipient has none
    pub name: String,

    /// The recipient's address
    pub address: EmailAddress,
}

impl Recipient {
    /// Create a new recipient
    pub fn new(name: impl Into<String>, address: EmailAddress) -> Self {
        Self {
            name: name.into(),
            address,
        }
    }

    /// The display name, if there is one
    pub fn display_name(&self) -> Option<&str> {
        let name = self.name.trim();

        (!name.is_empty()).then_some(name)
    }
}

impl From<EmailAddress> for Recipient {
    fn from(address: EmailAddress) -> Self {
        Self::new("", address)
    }
}

/// Parses either a bare address or `Name <address>`.
impl FromStr for Recipient {
    type Err = EmailAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        match (s.rfind('<'), s.strip_suffix('>')) {
            (Some(open), Some(rest)) => {
                let name = s[..open].trim().trim_matches('"');
                let address = EmailAddress::new(&rest[open + 1..])?;

                Ok(Self::new(name, address))
            }
            _ => Ok(EmailAddress::new(s)?.into()),
        }
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.display_name() {
            Some(name) => write!(f, "{name} <{}>", self.address),
            None => write!(f, "{}", self.address),
        }
    }
}
