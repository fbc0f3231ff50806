//! Content service API client

use async_trait::async_trait;

use crate::error::ApiError;

pub mod content;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use content::ContentClient;
#[cfg(test)]
pub use mock::MockContentClient;
pub use models::{AuthInstance, BrandConfig, SearchHit, SearchResult};

/// Result of a single content service call
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Content service API client trait.
///
/// Every call takes the resolved service hostname, since the service
/// differs per tab environment.
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// `GET /api/configs`
    async fn list_brands(&self, service: &str) -> ApiResult<Vec<BrandConfig>>;

    /// `GET /auth/instance`
    async fn auth_instance(&self, service: &str) -> ApiResult<AuthInstance>;

    /// `GET /api/search?view=edit&uri={uri}`
    ///
    /// `uri` must already be percent-encoded.
    async fn search(&self, service: &str, uri: &str) -> ApiResult<SearchResult>;
}
