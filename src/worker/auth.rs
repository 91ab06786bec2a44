//! Identity tokens handed to executed commands.

use super::error::WorkerError;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Where the worker gets the token it passes to commands as `APG_REGISTRY_TOKEN`.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn token(&self) -> Result<String, WorkerError>;
}

/// Fetches identity tokens from the instance metadata service, with the registry as the
/// audience.
#[derive(Debug, Clone)]
pub struct MetadataTokenSource {
    client: reqwest::Client,
    url: String,
}

impl MetadataTokenSource {
    pub fn new(metadata_host: &str, registry_address: &str) -> Result<Self, WorkerError> {
        // The metadata server is link-local; never route it through a proxy.
        let client = reqwest::Client::builder().no_proxy().build()?;
        Ok(Self {
            client,
            url: identity_url(metadata_host, registry_address),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn identity_url(metadata_host: &str, registry_address: &str) -> String {
    format!(
        "http://{metadata_host}/computeMetadata/v1/instance/service-accounts/default/identity?audience=http://{registry_address}"
    )
}

#[async_trait]
impl TokenSource for MetadataTokenSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn token(&self) -> Result<String, WorkerError> {
        debug!("Requesting identity token");
        let token = self
            .client
            .get(&self.url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(token.trim().to_string())
    }
}

/// A fixed token, for local runs and tests.
#[derive(Debug, Clone)]
pub struct StaticTokenSource(pub String);

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn token(&self) -> Result<String, WorkerError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_names_registry_as_audience() {
        let source = MetadataTokenSource::new("metadata.google.internal", "registry:8080").unwrap();
        assert_eq!(
            source.url(),
            "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/identity?audience=http://registry:8080"
        );
    }

    #[tokio::test]
    async fn static_source_returns_its_token() {
        let source = StaticTokenSource("abc".into());
        assert_eq!(source.token().await.unwrap(), "abc");
    }
}
