//! Origin resolution

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

#[cfg(test)]
use mockall::mock;

use super::{RequestMetadata, SiteError};

/// Protocol used when neither a request nor the configuration provides one
pub const DEFAULT_PROTOCOL: &str = "http://";

/// Process-wide defaults used when there is no request to inspect
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiteConfig {
    /// Domain to link to, e.g. `example.com`
    pub domain: Option<String>,

    /// Protocol prefix, e.g. `https://`
    pub protocol: Option<String>,
}

/// Looks up the domain of the current site
#[async_trait]
pub trait CurrentSite: Clone + Send + Sync + 'static {
    /// The current site's domain
    ///
    /// # Returns
    /// The domain, or a [`SiteError`] if no site can be determined.
    async fn domain(&self) -> Result<String, SiteError>;
}

#[cfg(test)]
mock! {
    pub CurrentSite {}

    impl Clone for CurrentSite {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl CurrentSite for CurrentSite {
        async fn domain(&self) -> Result<String, SiteError>;
    }
}

/// The `domain` and `protocol` injected into every render context
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Origin {
    /// Domain, without protocol
    pub domain: String,

    /// Protocol prefix including `://`
    pub protocol: String,
}

/// Resolves the [`Origin`] for an email.
///
/// A request with a non-blank host wins. Otherwise the configured domain is
/// used, and the current site is only consulted when no domain is configured.
pub async fn resolve_origin<S: CurrentSite>(
    request: Option<&RequestMetadata>,
    config: &SiteConfig,
    sites: &S,
) -> Result<Origin, SiteError> {
    if let Some((request, host)) = request.and_then(|r| r.host().map(|host| (r, host))) {
        debug!(host, secure = request.is_secure, "Origin taken from request");

        return Ok(Origin {
            domain: host.to_string(),
            protocol: request.protocol().to_string(),
        });
    }

    let domain = match &config.domain {
        Some(domain) => domain.clone(),
        None => sites.domain().await?,
    };

    let protocol = config
        .protocol
        .clone()
        .unwrap_or_else(|| DEFAULT_PROTOCOL.to_string());

    debug!(domain = %domain, protocol = %protocol, "Origin taken from site configuration");

    Ok(Origin { domain, protocol })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn test_secure_request_origin() -> TestResult {
        let mut sites = MockCurrentSite::new();
        sites.expect_domain().times(0);

        let request = RequestMetadata::new("example.com", true);
        let origin = resolve_origin(Some(&request), &SiteConfig::default(), &sites).await?;

        assert_eq!(origin.domain, "example.com");
        assert_eq!(origin.protocol, "https://");

        Ok(())
    }

    #[tokio::test]
    async fn test_insecure_request_origin() -> TestResult {
        let request = RequestMetadata::new("example.com:8000", false);
        let origin =
            resolve_origin(Some(&request), &SiteConfig::default(), &MockCurrentSite::new()).await?;

        assert_eq!(origin.domain, "example.com:8000");
        assert_eq!(origin.protocol, "http://");

        Ok(())
    }

    #[tokio::test]
    async fn test_configured_defaults_skip_site_lookup() -> TestResult {
        let mut sites = MockCurrentSite::new();
        sites.expect_domain().times(0);

        let config = SiteConfig {
            domain: Some("configured.example.com".to_string()),
            protocol: Some("https://".to_string()),
        };

        let origin = resolve_origin(None, &config, &sites).await?;

        assert_eq!(origin.domain, "configured.example.com");
        assert_eq!(origin.protocol, "https://");

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_host_falls_back_to_current_site() -> TestResult {
        let mut sites = MockCurrentSite::new();
        sites
            .expect_domain()
            .times(1)
            .returning(|| Ok("site.example.com".to_string()));

        let request = RequestMetadata::new("", true);
        let origin = resolve_origin(Some(&request), &SiteConfig::default(), &sites).await?;

        assert_eq!(origin.domain, "site.example.com");
        assert_eq!(origin.protocol, DEFAULT_PROTOCOL);

        Ok(())
    }

    #[tokio::test]
    async fn test_site_lookup_failure_propagates() {
        let mut sites = MockCurrentSite::new();
        sites
            .expect_domain()
            .times(1)
            .returning(|| Err(SiteError::NotConfigured));

        let result = resolve_origin(None, &SiteConfig::default(), &sites).await;

        assert!(matches!(result, Err(SiteError::NotConfigured)));
    }
}
