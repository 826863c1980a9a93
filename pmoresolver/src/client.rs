//! HTTP client for the resolution endpoint
//!
//! The endpoint takes a media page URL and answers with the URL of its first
//! audio-only stream:
//!
//! ```text
//! GET {base_url}/api/playlist?url=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3D...
//! 200 {"urlMusic": "https://rr1---sn.example.com/videoplayback?..."}
//! ```
//!
//! # Example
//!
//! ```no_run
//! use pmoresolver::{HttpResolver, Resolver, SourceIdentifier};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resolver = HttpResolver::builder()
//!         .base_url("http://localhost:3000")
//!         .build()?;
//!
//!     let id = SourceIdentifier::new("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
//!     let track = resolver.resolve(&id).await?;
//!     println!("Stream: {}", track);
//!     Ok(())
//! }
//! ```

use crate::error::{Error, ResolutionError, Result};
use crate::models::{ResolveResponse, ResolvedTrack, SourceIdentifier};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Default resolution endpoint host
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default path of the resolution route
pub const DEFAULT_ENDPOINT: &str = "/api/playlist";

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = "PMOPlaylist/0.1.0 (pmoresolver)";

/// Turns one source identifier into one playable audio URL
///
/// Implementations perform exactly one external lookup per call: no batching
/// and no caching, so resolving the same identifier twice costs two lookups.
/// Every failure, whatever its cause, is reported as a [`ResolutionError`]
/// carrying the identifier.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(
        &self,
        identifier: &SourceIdentifier,
    ) -> std::result::Result<ResolvedTrack, ResolutionError>;
}

/// Resolver backed by the HTTP resolution endpoint
///
/// The client is stateless; it can be cloned and shared across tasks.
#[derive(Debug, Clone)]
pub struct HttpResolver {
    client: Client,
    base_url: String,
    endpoint: String,
    timeout: Duration,
}

impl HttpResolver {
    /// Create a new resolver with default settings
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a builder for configuring the resolver
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::default()
    }

    /// Create a resolver with a custom reqwest::Client
    ///
    /// Useful for sharing HTTP connection pools or custom proxy settings
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the endpoint path
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get the per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the lookup URL for an identifier
    ///
    /// The identifier goes into the `url` query parameter, percent-encoded.
    pub fn lookup_url(&self, identifier: &SourceIdentifier) -> Result<Url> {
        let base = self.base_url.trim_end_matches('/');
        let endpoint = self.endpoint.trim_start_matches('/');
        let mut url = Url::parse(&format!("{}/{}", base, endpoint))?;
        url.query_pairs_mut()
            .append_pair("url", identifier.as_str());
        Ok(url)
    }

    /// Perform the lookup and return the raw cause on failure
    async fn fetch(&self, identifier: &SourceIdentifier) -> Result<ResolvedTrack> {
        let url = self.lookup_url(identifier)?;

        tracing::debug!("Resolving {} via {}", identifier, url);

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(Error::transport)?;

        if !response.status().is_success() {
            return Err(Error::api_error(format!(
                "API returned status: {}",
                response.status()
            )));
        }

        let body = response.bytes().await.map_err(Error::transport)?;
        let parsed: ResolveResponse = serde_json::from_slice(&body)?;

        let stream_url = parsed
            .url_music
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::NoAudioStream(identifier.to_string()))?;

        // Only absolute http(s) URLs are playable
        let parsed_url = Url::parse(&stream_url)?;
        if !matches!(parsed_url.scheme(), "http" | "https") {
            return Err(Error::NoAudioStream(format!(
                "{} (unsupported scheme {})",
                identifier,
                parsed_url.scheme()
            )));
        }

        Ok(ResolvedTrack::new(stream_url))
    }
}

#[async_trait]
impl Resolver for HttpResolver {
    async fn resolve(
        &self,
        identifier: &SourceIdentifier,
    ) -> std::result::Result<ResolvedTrack, ResolutionError> {
        match self.fetch(identifier).await {
            Ok(track) => {
                tracing::debug!("Resolved {} -> {}", identifier, track);
                Ok(track)
            }
            Err(cause) => {
                tracing::warn!("Resolution failed for {}: {}", identifier, cause);
                Err(ResolutionError::new(identifier.clone(), cause))
            }
        }
    }
}

/// Builder for configuring an HttpResolver
#[derive(Debug)]
pub struct ResolverBuilder {
    client: Option<Client>,
    base_url: String,
    endpoint: String,
    timeout: Duration,
    user_agent: String,
    proxy: Option<String>,
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self {
            client: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
        }
    }
}

impl ResolverBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the endpoint path
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a proxy URL
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Build the resolver
    pub fn build(self) -> Result<HttpResolver> {
        // Reject a malformed base URL up front rather than on every lookup
        Url::parse(&self.base_url)?;

        let client = if let Some(client) = self.client {
            client
        } else {
            let mut builder = Client::builder()
                .user_agent(&self.user_agent)
                .timeout(self.timeout);

            if let Some(proxy_url) = &self.proxy {
                let proxy = reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::other(format!("Invalid proxy: {}", e)))?;
                builder = builder.proxy(proxy);
            }

            builder.build()?
        };

        Ok(HttpResolver {
            client,
            base_url: self.base_url,
            endpoint: self.endpoint,
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_url_encodes_identifier() {
        let resolver = HttpResolver::builder()
            .base_url("http://localhost:3000/")
            .build()
            .unwrap();
        let id = SourceIdentifier::new("https://www.youtube.com/watch?v=abc&t=10");
        let url = resolver.lookup_url(&id).unwrap();

        assert_eq!(url.path(), "/api/playlist");
        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "url");
        assert_eq!(value, "https://www.youtube.com/watch?v=abc&t=10");
    }

    #[test]
    fn test_custom_endpoint() {
        let resolver = HttpResolver::builder()
            .base_url("http://resolver.local")
            .endpoint("resolve")
            .build()
            .unwrap();
        let url = resolver
            .lookup_url(&SourceIdentifier::new("https://x"))
            .unwrap();
        assert_eq!(url.as_str(), "http://resolver.local/resolve?url=https%3A%2F%2Fx");
    }

    #[test]
    fn test_builder_rejects_bad_base_url() {
        let err = HttpResolver::builder().base_url("not a url").build().unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_builder_defaults() {
        let resolver = HttpResolver::new().unwrap();
        assert_eq!(resolver.base_url(), DEFAULT_BASE_URL);
        assert_eq!(resolver.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(
            resolver.timeout(),
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
    }
}
