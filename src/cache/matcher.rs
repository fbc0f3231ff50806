//! Hostname to brand matching

use crate::client::BrandConfig;

/// First brand whose consumer or preview hostname occurs in `tab_hostname`.
///
/// Missing or empty hostnames never match. Comparison ignores ASCII case,
/// since parsed tab URLs carry lowercased hosts.
pub fn find_brand<'a>(brands: &'a [BrandConfig], tab_hostname: &str) -> Option<&'a BrandConfig> {
    let tab_hostname = tab_hostname.to_ascii_lowercase();
    brands.iter().find(|brand| {
        let hostnames = &brand.hostnames;
        [hostnames.consumer.as_deref(), hostnames.preview.as_deref()]
            .into_iter()
            .flatten()
            .any(|h| !h.is_empty() && tab_hostname.contains(&h.to_ascii_lowercase()))
    })
}
