//! Platform service for native targets, backed by `reqwest`.

use async_trait::async_trait;
use bytes::Bytes;
use log::info;

use crate::error::GeoviewError;
use crate::platform::PlatformService;

/// Loads data over HTTP with a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct NativePlatformService {
    http_client: reqwest::Client,
}

#[async_trait]
impl PlatformService for NativePlatformService {
    fn new() -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("geoview/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|err| {
                log::warn!("Failed to configure http client, using defaults: {err}");
                reqwest::Client::new()
            });

        Self { http_client }
    }

    async fn load_bytes_from_url(&self, url: &str) -> Result<Bytes, GeoviewError> {
        let response = self.http_client.get(url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            info!("Failed to load {url}: {status}, {:?}", response.text().await);
            return Err(GeoviewError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?)
    }
}
