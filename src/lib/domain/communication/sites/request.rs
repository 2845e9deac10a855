//! Request metadata

use std::collections::BTreeMap;

use serde_json::Value;

/// What the composer needs to know about the request that triggered an email
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestMetadata {
    /// The `Host` the request was made to
    pub host: String,

    /// Whether the request arrived over a secure channel
    pub is_secure: bool,

    /// Request-scoped template variables, overridden by the caller's own
    pub variables: BTreeMap<String, Value>,
}

impl RequestMetadata {
    /// Create request metadata for a host
    pub fn new(host: impl Into<String>, is_secure: bool) -> Self {
        Self {
            host: host.into(),
            is_secure,
            variables: BTreeMap::new(),
        }
    }

    /// Add a request-scoped template variable
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// The host, unless it is blank
    pub fn host(&self) -> Option<&str> {
        let host = self.host.trim();

        (!host.is_empty()).then_some(host)
    }

    /// The protocol prefix matching [`Self::is_secure`]
    pub fn protocol(&self) -> &'static str {
        if self.is_secure {
            "https://"
        } else {
            "http://"
        }
    }
}
