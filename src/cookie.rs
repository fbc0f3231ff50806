//! Brand context cookies
//!
//! The search endpoint scopes its results by a `brand` cookie. The cookie
//! is written right before each search with a short lifetime so brand
//! context cannot leak into unrelated requests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Url;

use crate::client::content::SEARCH_PATH;
use crate::error::LookupError;

/// Name of the cookie carrying the brand code
pub const BRAND_COOKIE_NAME: &str = "brand";

/// A cookie scoped to a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandCookie {
    /// URL the cookie is scoped to (host and path prefix)
    pub url: String,
    pub name: String,
    pub value: String,
    pub expiration_date: DateTime<Utc>,
}

impl BrandCookie {
    /// Brand cookie for the search endpoint of `service`
    pub fn for_search(service: &str, brand_code: &str, ttl: Duration) -> Self {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::zero());
        Self {
            url: format!("https://{}{}", service, SEARCH_PATH),
            name: BRAND_COOKIE_NAME.to_string(),
            value: brand_code.to_string(),
            expiration_date: Utc::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        self.expiration_date <= Utc::now()
    }
}

/// Cookie jar contract.
///
/// `set` returns the stored cookie, or `None` when the store refused it.
#[async_trait]
pub trait CookieStore: Send + Sync {
    async fn set(&self, cookie: BrandCookie) -> Option<BrandCookie>;

    /// `Cookie` header value for a request to `url`, if any cookie applies
    fn header_for(&self, url: &str) -> Option<String>;
}

/// In-memory cookie jar keyed by host, path and name
#[derive(Default)]
pub struct CookieJar {
    cookies: Mutex<HashMap<(String, String, String), BrandCookie>>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Split a URL into the (host, path) pair cookies are scoped by
fn scope_of(url: &str) -> Option<(String, String)> {
    let url = Url::parse(url).ok()?;
    let host = url.host_str()?.to_string();
    Some((host, url.path().to_string()))
}

#[async_trait]
impl CookieStore for CookieJar {
    async fn set(&self, cookie: BrandCookie) -> Option<BrandCookie> {
        let (host, path) = scope_of(&cookie.url)?;
        if cookie.name.is_empty() {
            return None;
        }

        let mut cookies = self.cookies.lock().unwrap_or_else(|e| e.into_inner());
        let key = (host, path, cookie.name.clone());
        if cookie.is_expired() {
            cookies.remove(&key);
            return None;
        }
        cookies.insert(key, cookie.clone());
        Some(cookie)
    }

    fn header_for(&self, url: &str) -> Option<String> {
        let (host, path) = scope_of(url)?;
        let mut cookies = self.cookies.lock().unwrap_or_else(|e| e.into_inner());
        cookies.retain(|_, c| !c.is_expired());

        let mut matching: Vec<_> = cookies
            .iter()
            .filter(|((h, p, _), _)| *h == host && path.starts_with(p.as_str()))
            .map(|((_, _, name), c)| format!("{}={}", name, c.value))
            .collect();
        if matching.is_empty() {
            return None;
        }
        matching.sort();
        Some(matching.join("; "))
    }
}

/// Scope subsequent searches on `service` to `brand_code`
pub async fn set_brand_context(
    cookies: &dyn CookieStore,
    service: &str,
    brand_code: &str,
    ttl: Duration,
) -> Result<BrandCookie, LookupError> {
    let cookie = BrandCookie::for_search(service, brand_code, ttl);
    cookies
        .set(cookie)
        .await
        .ok_or_else(|| LookupError::CookieWriteFailed {
            brand: brand_code.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_brand_cookie_is_scoped_to_search() {
        let jar = CookieJar::new();
        let cookie = set_brand_context(&jar, "svc.example.com", "a", Duration::from_secs(10))
            .await
            .unwrap();

        assert_eq!(cookie.url, "https://svc.example.com/api/search");
        assert_eq!(cookie.name, "brand");
        assert_eq!(cookie.value, "a");

        assert_eq!(
            jar.header_for("https://svc.example.com/api/search?view=edit&uri=x")
                .as_deref(),
            Some("brand=a")
        );
        assert!(jar.header_for("https://svc.example.com/api/configs").is_none());
        assert!(jar.header_for("https://other.example.com/api/search").is_none());
    }

    #[tokio::test]
    async fn test_brand_cookie_expires_after_ttl() {
        let jar = CookieJar::new();
        let cookie = BrandCookie::for_search("svc.example.com", "a", Duration::from_secs(10));
        assert!(cookie.expiration_date > Utc::now() + chrono::Duration::seconds(8));
        assert!(cookie.expiration_date <= Utc::now() + chrono::Duration::seconds(10));

        let expired = BrandCookie {
            expiration_date: Utc::now() - chrono::Duration::seconds(1),
            ..cookie
        };
        assert!(jar.set(expired).await.is_none());
        assert!(jar.header_for("https://svc.example.com/api/search").is_none());
    }

    #[tokio::test]
    async fn test_newer_brand_overwrites_older() {
        let jar = CookieJar::new();
        let ttl = Duration::from_secs(10);
        set_brand_context(&jar, "svc.example.com", "a", ttl).await.unwrap();
        set_brand_context(&jar, "svc.example.com", "b", ttl).await.unwrap();

        assert_eq!(
            jar.header_for("https://svc.example.com/api/search").as_deref(),
            Some("brand=b")
        );
    }

    #[tokio::test]
    async fn test_rejected_cookie_is_a_write_failure() {
        struct RefusingStore;

        #[async_trait]
        impl CookieStore for RefusingStore {
            async fn set(&self, _cookie: BrandCookie) -> Option<BrandCookie> {
                None
            }

            fn header_for(&self, _url: &str) -> Option<String> {
                None
            }
        }

        let err = set_brand_context(&RefusingStore, "svc.example.com", "a", Duration::from_secs(10))
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::CookieWriteFailed { brand } if brand == "a"));
    }
}
