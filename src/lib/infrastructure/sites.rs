//! Site settings

use async_trait::async_trait;
use clap::Parser;

use crate::domain::communication::sites::{CurrentSite, SiteConfig, SiteError};

/// Site configuration read from the command line or environment
#[derive(Clone, Debug, Parser)]
pub struct SiteSettings {
    /// Domain links point at when there is no request
    #[clap(long, env = "DOMAIN")]
    pub domain: Option<String>,

    /// Protocol prefix links use when there is no request, e.g. `https://`
    #[clap(long, env = "PROTOCOL")]
    pub protocol: Option<String>,

    /// Domain of the current site, used when `DOMAIN` is not set
    #[clap(long, env = "SITE_DOMAIN", default_value = "example.com")]
    pub site_domain: String,
}

impl SiteSettings {
    /// The defaults the composer falls back on without a request
    pub fn site_config(&self) -> SiteConfig {
        SiteConfig {
            domain: self.domain.clone(),
            protocol: self.protocol.clone(),
        }
    }

    /// The current site
    pub fn current_site(&self) -> ConfiguredSite {
        ConfiguredSite::new(&self.site_domain)
    }
}

/// A current site whose domain is fixed by configuration
#[derive(Clone, Debug)]
pub struct ConfiguredSite {
    domain: String,
}

impl ConfiguredSite {
    /// Create a site for `domain`
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.trim().to_string(),
        }
    }
}

#[async_trait]
impl CurrentSite for ConfiguredSite {
    async fn domain(&self) -> Result<String, SiteError> {
        if self.domain.is_empty() {
            return Err(SiteError::NotConfigured);
        }

        Ok(self.domain.clone())
    }
}
