//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use crate::shared::config::load_config;

/// Get the base URL for API requests
///
/// Uses `api.base_url` from the configuration. An empty value keeps requests
/// on the page's own origin, which is how the dashboard is served next to
/// the device backend.
///
/// # Returns
/// - API base URL like "http://localhost:8000" without a trailing slash
/// - Empty string for same-origin requests
pub fn api_base() -> String {
    load_config().api.base_url.trim_end_matches('/').to_string()
}

/// Build a full API URL from a base and a path
///
/// # Example
/// ```rust
/// use frontend::shared::api_utils::join_url;
/// assert_eq!(join_url("http://host:8000/", "/devices/"), "http://host:8000/devices/");
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Append URL-encoded query parameters to a path
pub fn with_query(path: &str, query: &[(String, String)]) -> String {
    if query.is_empty() {
        return path.to_string();
    }
    let params: Vec<String> = query
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect();
    format!("{}?{}", path, params.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_query_encodes_values() {
        let query = vec![
            ("device_uuid".to_string(), "u1".to_string()),
            ("new_name".to_string(), "Lab #2 & co".to_string()),
        ];
        assert_eq!(
            with_query("/devices/update_name/u1", &query),
            "/devices/update_name/u1?device_uuid=u1&new_name=Lab%20%232%20%26%20co"
        );
        assert_eq!(with_query("/devices/", &[]), "/devices/");
    }

    #[test]
    fn test_join_url_same_origin() {
        assert_eq!(join_url("", "/logs/"), "/logs/");
    }
}
