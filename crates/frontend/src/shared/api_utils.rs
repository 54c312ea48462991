//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use super::config::config;

/// Get the base URL for API requests
///
/// Uses `api.base_url` from the config when set, otherwise the current
/// window location with the configured backend port.
///
/// # Returns
/// - API base URL like "http://localhost:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    config().api_base(&protocol, &hostname)
}

/// Build a full API URL from a path
///
/// # Example
/// ```ignore
/// let url = api_url("/api/brands/12");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Appends url-encoded query pairs to a path.
pub fn with_query(path: &str, pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let query = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{}{}{}", path, separator, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_query_values() {
        let pairs = vec![
            ("page".to_string(), "1".to_string()),
            ("search".to_string(), "a&b c".to_string()),
        ];
        assert_eq!(
            with_query("/api/brands", &pairs),
            "/api/brands?page=1&search=a%26b%20c"
        );
    }

    #[test]
    fn appends_to_existing_query() {
        let pairs = vec![("format".to_string(), "csv".to_string())];
        assert_eq!(with_query("/api/x?y=1", &pairs), "/api/x?y=1&format=csv");
        assert_eq!(with_query("/api/x", &[]), "/api/x");
    }
}
