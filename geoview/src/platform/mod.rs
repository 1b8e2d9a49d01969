//! Provides platform specific logic and [`PlatformService`] to access it.

use std::sync::LazyLock;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::GeoviewError;

/// Service providing some platform specific functions in a generic way.
#[async_trait]
pub trait PlatformService {
    /// Creates a new instance of the service. This method is a part of the trait to allow other
    /// types be agnostic of the specific type of the platform service they work with.
    fn new() -> Self;
    /// Loads a byte array from the given url.
    async fn load_bytes_from_url(&self, url: &str) -> Result<Bytes, GeoviewError>;
}

pub mod native;

/// Default implementation of the [`PlatformService`] for the current platform.
pub type PlatformServiceImpl = native::NativePlatformService;

static SERVICE: LazyLock<PlatformServiceImpl> = LazyLock::new(PlatformServiceImpl::new);

/// Returns the singleton instance of the platform service
pub fn instance() -> &'static PlatformServiceImpl {
    &SERVICE
}
