//! Content service response models

use serde::{Deserialize, Serialize};

/// One brand's routing identity, as served by `/api/configs`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrandConfig {
    /// Brand code used in deep links and entitlement checks
    pub code: String,

    /// Hostnames the brand's sites are served from
    #[serde(default)]
    pub hostnames: BrandHostnames,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrandHostnames {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

/// Authenticated session info from `/auth/instance`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthInstance {
    /// Codes of the brands the session is entitled to
    #[serde(default)]
    pub brands: Vec<String>,
}

impl AuthInstance {
    pub fn is_entitled(&self, brand_code: &str) -> bool {
        self.brands.iter().any(|b| b == brand_code)
    }
}

/// Search document from `/api/search`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub hits: SearchHits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHits {
    pub total: u64,

    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "_source")]
    pub source: HitSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitSource {
    pub meta: HitMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitMeta {
    #[serde(rename = "collectionName")]
    pub collection_name: String,
}

impl SearchResult {
    /// Build a result with `total` hits, all pointing at the same entry
    #[cfg(test)]
    pub fn with_hits(total: u64, id: &str, collection: &str) -> Self {
        let hit = SearchHit {
            id: id.to_string(),
            source: HitSource {
                meta: HitMeta {
                    collection_name: collection.to_string(),
                },
            },
        };
        Self {
            hits: SearchHits {
                total,
                hits: vec![hit; total as usize],
            },
        }
    }
}
