//! Endpoint URL construction
//!
//! Server addresses are accepted with or without a trailing slash and with or
//! without the `/v1` API prefix, so `http://localhost:1234`,
//! `http://localhost:1234/` and `http://localhost:1234/v1` all resolve to the
//! same endpoints.

pub const DEFAULT_BASE_URL: &str = "http://localhost:1234";

/// Strip trailing slashes and a trailing `/v1` segment.
///
/// ```
/// use codeface::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:1234/"), "http://localhost:1234");
/// assert_eq!(normalize_base_url("http://localhost:1234/v1/"), "http://localhost:1234");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim().trim_end_matches('/');
    trimmed
        .strip_suffix("/v1")
        .unwrap_or(trimmed)
        .trim_end_matches('/')
        .to_string()
}

/// Join a server address and a `/v1` endpoint path.
///
/// ```
/// use codeface::utils::url::api_url;
///
/// assert_eq!(
///     api_url("http://localhost:1234", "chat/completions"),
///     "http://localhost:1234/v1/chat/completions"
/// );
/// ```
pub fn api_url(base_url: &str, endpoint: &str) -> String {
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/v1/{}", normalize_base_url(base_url), endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://localhost:1234"),
            "http://localhost:1234"
        );
        assert_eq!(
            normalize_base_url("http://localhost:1234///"),
            "http://localhost:1234"
        );
        assert_eq!(
            normalize_base_url("http://127.0.0.1:1234/v1"),
            "http://127.0.0.1:1234"
        );
        // Only a whole trailing segment is stripped
        assert_eq!(
            normalize_base_url("http://host/api/v10"),
            "http://host/api/v10"
        );
    }

    #[test]
    fn test_api_url() {
        assert_eq!(
            api_url("http://localhost:1234/", "/models"),
            "http://localhost:1234/v1/models"
        );
        assert_eq!(
            api_url("http://localhost:1234/v1", "chat/completions"),
            "http://localhost:1234/v1/chat/completions"
        );
        assert_eq!(
            api_url(DEFAULT_BASE_URL, "models"),
            "http://localhost:1234/v1/models"
        );
    }
}
