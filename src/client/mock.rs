//! Mock content service client for testing
//!
//! Provides a mock implementation of [`ContentApi`] for unit testing
//! without making real API calls.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::models::BrandHostnames;
use super::{ApiResult, AuthInstance, BrandConfig, ContentApi, SearchResult};
use crate::error::ApiError;

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockContentClient::new()
///     .with_brands(vec![MockContentClient::brand("a", Some("siteA"), None)]);
///
/// let brands = mock.list_brands("svc.example.com").await?;
/// assert_eq!(brands.len(), 1);
/// ```
#[derive(Clone)]
pub struct MockContentClient {
    brands: Arc<Mutex<Vec<BrandConfig>>>,
    auth: Arc<Mutex<AuthInstance>>,
    search: Arc<Mutex<Option<SearchResult>>>,
    /// Error for the next list_brands call - consumed on first use
    brands_error: Arc<Mutex<Option<ApiError>>>,
    /// Error for every auth_instance call
    auth_error: Arc<Mutex<Option<ApiError>>>,
    /// How long list_brands takes to answer
    brands_delay: Arc<Mutex<Duration>>,
    call_count: Arc<Mutex<CallCounts>>,
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl Default for MockContentClient {
    fn default() -> Self {
        Self {
            brands: Arc::new(Mutex::new(Vec::new())),
            auth: Arc::new(Mutex::new(AuthInstance::default())),
            search: Arc::new(Mutex::new(None)),
            brands_error: Arc::new(Mutex::new(None)),
            auth_error: Arc::new(Mutex::new(None)),
            brands_delay: Arc::new(Mutex::new(Duration::ZERO)),
            call_count: Arc::new(Mutex::new(CallCounts::default())),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub list_brands: usize,
    pub auth_instance: usize,
    pub search: usize,
}

/// A captured API request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// The API method called (e.g., "list_brands", "search")
    pub method: String,
    /// Service hostname the call was addressed to
    pub service: String,
    /// Encoded search uri, for search calls
    pub uri: Option<String>,
}

impl MockContentClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a brand config
    pub fn brand(code: &str, consumer: Option<&str>, preview: Option<&str>) -> BrandConfig {
        BrandConfig {
            code: code.to_string(),
            hostnames: BrandHostnames {
                consumer: consumer.map(str::to_string),
                preview: preview.map(str::to_string),
            },
        }
    }

    pub fn with_brands(self, brands: Vec<BrandConfig>) -> Self {
        *self.brands.try_lock().expect("mock not shared yet") = brands;
        self
    }

    pub fn with_entitlements(self, brands: &[&str]) -> Self {
        *self.auth.try_lock().expect("mock not shared yet") = AuthInstance {
            brands: brands.iter().map(|b| b.to_string()).collect(),
        };
        self
    }

    pub fn with_search_result(self, result: SearchResult) -> Self {
        *self.search.try_lock().expect("mock not shared yet") = Some(result);
        self
    }

    pub fn with_brands_delay(self, delay: Duration) -> Self {
        *self.brands_delay.try_lock().expect("mock not shared yet") = delay;
        self
    }

    pub fn with_auth_error(self, error: ApiError) -> Self {
        *self.auth_error.try_lock().expect("mock not shared yet") = Some(error);
        self
    }

    /// Fail the next list_brands call with `error`
    pub async fn fail_next_brands(&self, error: ApiError) {
        *self.brands_error.lock().await = Some(error);
    }

    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    async fn capture(&self, method: &str, service: &str, uri: Option<&str>) {
        self.captured_requests.lock().await.push(CapturedRequest {
            method: method.to_string(),
            service: service.to_string(),
            uri: uri.map(str::to_string),
        });
    }
}

#[async_trait]
impl ContentApi for MockContentClient {
    async fn list_brands(&self, service: &str) -> ApiResult<Vec<BrandConfig>> {
        self.call_count.lock().await.list_brands += 1;
        self.capture("list_brands", service, None).await;

        let delay = *self.brands_delay.lock().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.brands_error.lock().await.take() {
            return Err(err);
        }
        Ok(self.brands.lock().await.clone())
    }

    async fn auth_instance(&self, service: &str) -> ApiResult<AuthInstance> {
        self.call_count.lock().await.auth_instance += 1;
        self.capture("auth_instance", service, None).await;

        if let Some(err) = self.auth_error.lock().await.clone() {
            return Err(err);
        }
        Ok(self.auth.lock().await.clone())
    }

    async fn search(&self, service: &str, uri: &str) -> ApiResult<SearchResult> {
        self.call_count.lock().await.search += 1;
        self.capture("search", service, Some(uri)).await;

        self.search
            .lock()
            .await
            .clone()
            .ok_or_else(|| ApiError::NotFound("no search result configured".to_string()))
    }
}
