//! Content service hostname selection

use crate::config::Endpoints;

/// Pick the content service hostname responsible for a tab hostname.
///
/// Hostnames outside the production suffix go to the secondary
/// environment. Inside it, the first label selects staging or CI and
/// anything else falls through to production.
pub fn resolve_service_hostname<'a>(endpoints: &'a Endpoints, tab_hostname: &str) -> &'a str {
    if !tab_hostname.ends_with(&endpoints.production_suffix) {
        return &endpoints.secondary;
    }

    let label = tab_hostname.split('.').next().unwrap_or_default();
    if label == endpoints.staging_label {
        &endpoints.staging
    } else if endpoints.ci_labels.iter().any(|l| l == label) {
        &endpoints.ci
    } else {
        &endpoints.production
    }
}
