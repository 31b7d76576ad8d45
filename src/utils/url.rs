//! Endpoint URL construction.
//!
//! Base URLs in `config.json` are typed by hand on the device, so they may or
//! may not end in `/`. Both forms must produce the same endpoint.

/// Strip trailing slashes from a configured base URL.
///
/// ```
/// use tdeck_chat::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://192.168.1.20:1234/v1/"), "http://192.168.1.20:1234/v1");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Join a base URL and an endpoint path with exactly one slash.
///
/// ```
/// use tdeck_chat::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://tts.local:8004/", "/v1/audio/speech"),
///     "http://tts.local:8004/v1/audio/speech"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalize_base_url(base_url), endpoint)
}

/// Whether requests to this base URL will be sent over TLS.
pub fn is_tls(base_url: &str) -> bool {
    base_url
        .trim()
        .get(..8)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https://"))
}
