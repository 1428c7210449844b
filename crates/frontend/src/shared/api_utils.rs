//! API utilities for talking to the TIN service
//!
//! Resolves the service base URL and builds bearer headers.

/// Get the base URL for API requests
///
/// A `TIN_API_BASE` value baked in at compile time wins. Otherwise the URL
/// is built from the current window location, using port 3000 for the service.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    if let Some(configured) = configured_base() {
        return configured;
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

fn configured_base() -> Option<String> {
    normalize_base(option_env!("TIN_API_BASE")?)
}

fn normalize_base(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// `Authorization` header value for an access token
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
