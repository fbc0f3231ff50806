//! HTTP implementation of the content service API

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::header::{COOKIE, LOCATION};
use reqwest::{Client as HttpClient, StatusCode, redirect};
use serde::de::DeserializeOwned;

use super::{ApiResult, AuthInstance, BrandConfig, ContentApi, SearchResult};
use crate::config::Config;
use crate::cookie::CookieStore;
use crate::error::{ApiError, ConfigError, Result};

pub const CONFIGS_PATH: &str = "/api/configs";
pub const AUTH_INSTANCE_PATH: &str = "/auth/instance";
pub const SEARCH_PATH: &str = "/api/search";

/// Content service client.
///
/// Redirects are never followed: the service bounces logged-out sessions
/// to a login page, so a 3xx is reported as a failure.
pub struct ContentClient {
    http: HttpClient,
    api_host: Option<String>,
    session_cookie: Option<String>,
    cookies: Arc<dyn CookieStore>,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl ContentClient {
    /// Create a client that sends cookies from `cookies` with each request
    pub fn new(config: &Config, cookies: Arc<dyn CookieStore>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .redirect(redirect::Policy::none())
            .build()
            .map_err(ApiError::from)?;

        let per_second = NonZeroU32::new(config.requests_per_second).ok_or_else(|| {
            ConfigError::Invalid("requests_per_second must be > 0".to_string())
        })?;
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(per_second)));

        Ok(Self {
            http,
            api_host: config.api_host.clone(),
            session_cookie: config.session_cookie.clone(),
            cookies,
            rate_limiter,
        })
    }

    /// Base URL requests for `service` are sent to
    fn base_url(&self, service: &str) -> String {
        match &self.api_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => format!("https://{}", service),
        }
    }

    /// Cookie header for a request, combining the session with jar cookies.
    ///
    /// Jar cookies are matched against the service URL, not the override
    /// host, so brand context works the same against a local server.
    fn cookie_header(&self, service: &str, path: &str) -> Option<String> {
        let scoped = self.cookies.header_for(&format!("https://{}{}", service, path));
        let parts: Vec<&str> = [self.session_cookie.as_deref(), scoped.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, service: &str, path: &str) -> ApiResult<T> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.base_url(service), path);
        log::debug!("GET {}", url);

        let mut request = self.http.get(&url);
        if let Some(cookie) = self.cookie_header(service, path) {
            request = request.header(COOKIE, cookie);
        }
        let response = request.send().await.map_err(ApiError::from)?;

        let status = response.status();
        match status {
            status if status.is_success() => response.json::<T>().await.map_err(|e| {
                ApiError::InvalidResponse(format!("Failed to parse response from {}: {}", path, e))
            }),
            status if status.is_redirection() => {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("an unknown location")
                    .to_string();
                Err(ApiError::Redirected(location))
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(path.to_string())),
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg))
            }
            _ => Err(ApiError::InvalidResponse(format!(
                "Unexpected status code: {}",
                status
            ))),
        }
    }
}

#[async_trait]
impl ContentApi for ContentClient {
    async fn list_brands(&self, service: &str) -> ApiResult<Vec<BrandConfig>> {
        self.get_json(service, CONFIGS_PATH).await
    }

    async fn auth_instance(&self, service: &str) -> ApiResult<AuthInstance> {
        self.get_json(service, AUTH_INSTANCE_PATH).await
    }

    async fn search(&self, service: &str, uri: &str) -> ApiResult<SearchResult> {
        let path = format!("{}?view=edit&uri={}", SEARCH_PATH, uri);
        self.get_json(service, &path).await
    }
}
