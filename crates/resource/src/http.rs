//! HTTP resource provider.
//!
//! Fetches resources relative to the URL the radar is served from. No timeout
//! is configured on the client; requests run until the transport gives up.

use async_trait::async_trait;
use radar_print_traits::{ResourceError, ResourceProvider, SharedResourceData};
use reqwest::{Client, StatusCode, Url};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct HttpResourceProvider {
    base_url: Url,
    client: Client,
}

impl HttpResourceProvider {
    /// Creates a provider resolving paths against `base_url`.
    ///
    /// A base without a trailing slash is treated as a directory, so
    /// `https://host/radar` + `files/themes.csv` becomes
    /// `https://host/radar/files/themes.csv`.
    pub fn new(base_url: &str) -> Result<Self, ResourceError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| ResourceError::InvalidFormat(format!("invalid base URL '{}': {}", base_url, e)))?;
        Ok(Self {
            base_url,
            client: Client::new(),
        })
    }

    /// Uses a caller-configured client (proxies, headers, ...).
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn resolve(&self, path: &str) -> Result<Url, ResourceError> {
        self.base_url
            .join(path)
            .map_err(|e| ResourceError::InvalidFormat(format!("invalid resource path '{}': {}", path, e)))
    }
}

#[async_trait]
impl ResourceProvider for HttpResourceProvider {
    async fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let url = self.resolve(path)?;
        log::debug!("Fetching resource '{}' from {}", path, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ResourceError::LoadFailed {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ResourceError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(ResourceError::LoadFailed {
                path: path.to_string(),
                message: format!("HTTP error: {}", status),
            });
        }

        let body = response.bytes().await.map_err(|e| ResourceError::LoadFailed {
            path: path.to_string(),
            message: format!("failed to read response body: {}", e),
        })?;
        Ok(Arc::new(body.to_vec()))
    }

    fn base_path(&self) -> Option<&str> {
        Some(self.base_url.as_str())
    }

    fn name(&self) -> &'static str {
        "HttpResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_to_directory_base() {
        let provider = HttpResourceProvider::new("https://example.com/radar").unwrap();
        assert_eq!(
            provider.resolve("files/themes.csv").unwrap().as_str(),
            "https://example.com/radar/files/themes.csv"
        );
        assert_eq!(provider.base_path(), Some("https://example.com/radar/"));
    }

    #[test]
    fn test_site_root_paths_ignore_base_directory() {
        let provider = HttpResourceProvider::new("https://example.com/radar/").unwrap();
        assert_eq!(
            provider.resolve("/files/about.csv").unwrap().as_str(),
            "https://example.com/files/about.csv"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpResourceProvider::new("not a url"),
            Err(ResourceError::InvalidFormat(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_load_failure() {
        let provider = HttpResourceProvider::new("http://127.0.0.1:9").unwrap();
        let result = provider.load("files/themes.csv").await;
        assert!(matches!(result, Err(ResourceError::LoadFailed { .. })));
    }
}
