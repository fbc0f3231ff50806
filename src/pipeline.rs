//! Tab to deep link lookup pipeline
//!
//! A lookup runs strictly in order: endpoint resolution, brand
//! resolution, entitlement check, brand cookie, search, result sink.
//! The first failing stage ends the run and raises the error badge.

use std::sync::Arc;
use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Url;
use serde::Serialize;

use crate::cache::BrandCache;
use crate::client::{ApiResult, ContentApi, SearchHit};
use crate::config::{Config, Endpoints};
use crate::cookie::{CookieStore, set_brand_context};
use crate::endpoint::resolve_service_hostname;
use crate::error::{ApiError, LookupError, Result};
use crate::notify::{ERROR_BADGE, ERROR_TITLE, NotificationSink, SUCCESS_TITLE};
use crate::store::{LinkStore, link_key};

/// Characters `encodeURIComponent` leaves alone are alphanumerics and `-_.!~*'()`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// The tab a lookup runs for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabContext {
    pub tab_id: u64,
    pub url: String,
    pub hostname: String,
    pub pathname: String,
}

impl TabContext {
    pub fn parse(tab_id: u64, url: &str) -> std::result::Result<Self, LookupError> {
        let parsed = Url::parse(url).map_err(|e| LookupError::InvalidTabUrl(format!("{}: {}", url, e)))?;
        let hostname = parsed
            .host_str()
            .ok_or_else(|| LookupError::InvalidTabUrl(format!("{} has no host", url)))?
            .to_string();

        Ok(Self {
            tab_id,
            url: url.to_string(),
            hostname,
            pathname: parsed.path().to_string(),
        })
    }

    /// Search identifier for this tab's path
    pub fn identifier(&self) -> String {
        search_identifier(&self.pathname)
    }
}

/// Strip leading and trailing slashes, then percent-encode as a URI component
pub fn search_identifier(pathname: &str) -> String {
    utf8_percent_encode(pathname.trim_matches('/'), URI_COMPONENT).to_string()
}

/// `https://{service}/{brand}/{collection}/{id}`
pub fn deep_link(service: &str, brand_code: &str, hit: &SearchHit) -> String {
    format!(
        "https://{}/{}/{}/{}",
        service, brand_code, hit.source.meta.collection_name, hit.id
    )
}

/// How a lookup that did not fail ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LookupOutcome {
    /// Exactly one entry matched and its link was stored
    Linked { link: String },
    /// Zero or several entries matched; nothing stored, nothing signalled
    NoMatch { hits: u64 },
}

/// Runs lookups and owns the state they share
pub struct Locator {
    endpoints: Endpoints,
    cookie_ttl: Duration,
    api: Arc<dyn ContentApi>,
    brands: BrandCache,
    cookies: Arc<dyn CookieStore>,
    store: Arc<dyn LinkStore>,
    sink: Arc<dyn NotificationSink>,
}

impl Locator {
    pub fn new(
        config: &Config,
        api: Arc<dyn ContentApi>,
        cookies: Arc<dyn CookieStore>,
        store: Arc<dyn LinkStore>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            endpoints: config.endpoints.clone(),
            cookie_ttl: config.cookie_ttl(),
            brands: BrandCache::new(Arc::clone(&api)),
            api,
            cookies,
            store,
            sink,
        }
    }

    /// Disable every tab's action until a lookup enables it
    pub fn start(&self) {
        self.sink.disable(None);
    }

    /// Run a lookup and signal failures on the tab's badge
    pub async fn handle_tab(&self, tab: &TabContext) -> Result<LookupOutcome> {
        let result = self.find_content(tab).await;
        if let Err(err) = &result {
            log::warn!("Lookup for tab {} ({}) failed: {}", tab.tab_id, tab.url, err);
            self.sink.set_badge(tab.tab_id, ERROR_BADGE);
            self.sink.set_title(tab.tab_id, ERROR_TITLE);
        }
        result
    }

    /// Resolve the tab to a content entry and store its deep link
    pub async fn find_content(&self, tab: &TabContext) -> Result<LookupOutcome> {
        let service = resolve_service_hostname(&self.endpoints, &tab.hostname);
        log::debug!("tab {}: {} served by {}", tab.tab_id, tab.hostname, service);

        let brand = self.brands.resolve_brand(service, &tab.hostname).await?;
        log::debug!("tab {}: brand {}", tab.tab_id, brand.code);

        let auth = self.api.auth_instance(service).await?;
        if !auth.is_entitled(&brand.code) {
            return Err(LookupError::AccessDenied { brand: brand.code }.into());
        }

        set_brand_context(self.cookies.as_ref(), service, &brand.code, self.cookie_ttl).await?;

        let identifier = tab.identifier();
        log::debug!("tab {}: searching for {}", tab.tab_id, identifier);
        let result = self.api.search(service, &identifier).await?;

        if result.hits.total != 1 {
            log::info!(
                "tab {}: {} hits for {}, no link stored",
                tab.tab_id,
                result.hits.total,
                identifier
            );
            return Ok(LookupOutcome::NoMatch {
                hits: result.hits.total,
            });
        }

        let hit = first_hit(&result.hits.hits)?;
        let link = deep_link(service, &brand.code, hit);
        self.record_link(tab.tab_id, &link)?;
        Ok(LookupOutcome::Linked { link })
    }

    fn record_link(&self, tab_id: u64, link: &str) -> Result<()> {
        self.store.put(&link_key(tab_id), link)?;
        self.sink.enable(tab_id);
        self.sink.set_badge(tab_id, "");
        self.sink.set_title(tab_id, SUCCESS_TITLE);
        Ok(())
    }

    /// The stored link for a tab, if a lookup produced one
    pub fn open_link(&self, tab_id: u64) -> Result<Option<String>> {
        Ok(self.store.get(&link_key(tab_id))?)
    }

    pub fn stored_links(&self) -> Result<usize> {
        Ok(self.store.count()?)
    }

    /// Drop a tab's stored link, e.g. after it navigated away
    pub fn forget_tab(&self, tab_id: u64) -> Result<bool> {
        let removed = self.store.remove(&link_key(tab_id))?;
        self.sink.disable(Some(tab_id));
        Ok(removed)
    }
}

fn first_hit(hits: &[SearchHit]) -> ApiResult<&SearchHit> {
    hits.first()
        .ok_or_else(|| ApiError::InvalidResponse("total is 1 but no hit returned".to_string()))
}
