//! Query-string editing for storefront links.
//!
//! Parameters other than the one being set are kept byte-for-byte, in order.

use url::{form_urlencoded, Url};
use crate::Result;

/// Sets `key=value` on `href`, replacing an existing `key` in place and
/// dropping any later duplicates of it. Relative hrefs (`//host/..`, `?q`,
/// `#frag`, `../x`) keep everything outside the query exactly as written.
pub fn with_query_param(href: &str, key: &str, value: &str) -> Result<String> {
    match Url::parse(href) {
        Ok(mut url) => {
            let query = set_param(url.query().unwrap_or(""), key, value);
            url.set_query(Some(&query));
            Ok(url.into())
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(with_relative_query_param(href, key, value)),
        Err(e) => Err(e.into()),
    }
}

fn with_relative_query_param(href: &str, key: &str, value: &str) -> String {
    let (rest, fragment) = match href.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (href, None),
    };
    let (prefix, query) = rest.split_once('?').unwrap_or((rest, ""));
    let mut out = format!("{prefix}?{}", set_param(query, key, value));
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

/// Returns `search` (with or without its leading `?`) with `key=value` set.
pub fn set_param(search: &str, key: &str, value: &str) -> String {
    let search = search.strip_prefix('?').unwrap_or(search);
    let pair = form_urlencoded::Serializer::new(String::new()).append_pair(key, value).finish();
    let mut replaced = false;
    let mut segments = Vec::new();
    for segment in search.split('&').filter(|s| !s.is_empty()) {
        if segment_key(segment) == key {
            if !replaced { segments.push(pair.as_str()); replaced = true; }
        } else {
            segments.push(segment);
        }
    }
    if !replaced { segments.push(pair.as_str()); }
    segments.join("&")
}

/// Decoded value of the first `key` in `search`.
pub fn get_param(search: &str, key: &str) -> Option<String> {
    let search = search.strip_prefix('?').unwrap_or(search);
    form_urlencoded::parse(search.as_bytes()).find(|(k, _)| k == key).map(|(_, v)| v.into_owned())
}

fn segment_key(segment: &str) -> String {
    let raw = segment.split_once('=').map_or(segment, |(k, _)| k);
    form_urlencoded::parse(raw.as_bytes()).next().map(|(k, _)| k.into_owned()).unwrap_or_default()
}
