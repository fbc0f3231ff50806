//! Process-wide brand configuration cache
//!
//! Brand configs are fetched once and shared by every lookup. Concurrent
//! lookups that arrive while the fetch is in flight await the same
//! request. A failed fetch empties the cache so the next lookup retries.

pub mod matcher;

use std::sync::{Arc, Mutex};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};

use crate::client::{ApiResult, BrandConfig, ContentApi};
use crate::error::{LookupError, Result};

pub use matcher::find_brand;

type BrandsFuture = Shared<BoxFuture<'static, ApiResult<Arc<Vec<BrandConfig>>>>>;

enum CacheState {
    Empty,
    Pending(BrandsFuture),
    Ready(Arc<Vec<BrandConfig>>),
}

/// Memoized brand config list
pub struct BrandCache {
    api: Arc<dyn ContentApi>,
    state: Mutex<CacheState>,
}

impl BrandCache {
    pub fn new(api: Arc<dyn ContentApi>) -> Self {
        Self {
            api,
            state: Mutex::new(CacheState::Empty),
        }
    }

    /// The brand list, fetching it from `service` if nothing is cached or pending.
    ///
    /// The list is process-wide: once loaded it is reused for every service.
    pub async fn brands(&self, service: &str) -> ApiResult<Arc<Vec<BrandConfig>>> {
        let pending = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            match &*state {
                CacheState::Ready(brands) => return Ok(Arc::clone(brands)),
                CacheState::Pending(fut) => fut.clone(),
                CacheState::Empty => {
                    log::debug!("Fetching brand configs from {}", service);
                    let api = Arc::clone(&self.api);
                    let service = service.to_string();
                    let fut = async move { api.list_brands(&service).await.map(Arc::new) }
                        .boxed()
                        .shared();
                    *state = CacheState::Pending(fut.clone());
                    fut
                }
            }
        };

        let result = pending.clone().await;

        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if let CacheState::Pending(current) = &*state
            && current.ptr_eq(&pending)
        {
            *state = match &result {
                Ok(brands) => CacheState::Ready(Arc::clone(brands)),
                Err(err) => {
                    log::warn!("Brand config fetch failed, clearing cache: {}", err);
                    CacheState::Empty
                }
            };
        }
        result
    }

    /// Find the brand owning `tab_hostname`
    pub async fn resolve_brand(&self, service: &str, tab_hostname: &str) -> Result<BrandConfig> {
        let brands = self.brands(service).await?;
        find_brand(&brands, tab_hostname).cloned().ok_or_else(|| {
            LookupError::BrandNotFound {
                hostname: tab_hostname.to_string(),
            }
            .into()
        })
    }

    /// Drop any cached or pending brand list
    #[allow(dead_code)]
    pub fn invalidate(&self) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = CacheState::Empty;
    }
}
