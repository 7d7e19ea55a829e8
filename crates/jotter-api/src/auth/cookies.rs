//! Reading and writing the auth cookies.

use axum::http::{header, HeaderMap, HeaderValue};

use jotter_core::defaults::COOKIE_MAX_AGE_SECS;
use jotter_core::{Error, Result};

/// Attributes applied to every auth cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    pub secure: bool,
    pub max_age_secs: i64,
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self {
            secure: true,
            max_age_secs: COOKIE_MAX_AGE_SECS,
        }
    }
}

impl CookiePolicy {
    pub fn new(secure: bool) -> Self {
        Self {
            secure,
            ..Self::default()
        }
    }

    fn attributes(&self, max_age: i64) -> String {
        let secure = if self.secure { "; Secure" } else { "" };
        format!("Path=/; Max-Age={max_age}; HttpOnly{secure}; SameSite=Strict")
    }

    /// `Set-Cookie` value storing `value` under `name`.
    pub fn set(&self, name: &str, value: &str) -> Result<HeaderValue> {
        HeaderValue::from_str(&format!(
            "{name}={value}; {}",
            self.attributes(self.max_age_secs)
        ))
        .map_err(|e| Error::Internal(format!("Invalid cookie value: {}", e)))
    }

    /// `Set-Cookie` value expiring `name` immediately.
    pub fn clear(&self, name: &str) -> Result<HeaderValue> {
        HeaderValue::from_str(&format!("{name}=; {}", self.attributes(0)))
            .map_err(|e| Error::Internal(format!("Invalid cookie name: {}", e)))
    }
}

/// Find a cookie by name across all `Cookie` headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_cookie_attributes() {
        let value = CookiePolicy::default().set("auth_token", "abc.def").unwrap();
        assert_eq!(
            value.to_str().unwrap(),
            "auth_token=abc.def; Path=/; Max-Age=2592000; HttpOnly; Secure; SameSite=Strict"
        );
    }

    #[test]
    fn test_insecure_policy_omits_secure() {
        let value = CookiePolicy::new(false).set("auth_token", "x").unwrap();
        assert!(!value.to_str().unwrap().contains("Secure"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let value = CookiePolicy::default().clear("refresh_token").unwrap();
        assert!(value.to_str().unwrap().starts_with("refresh_token=; Path=/; Max-Age=0"));
    }

    #[test]
    fn test_read_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; auth_token=tok123; refresh_token=r"),
        );
        assert_eq!(read_cookie(&headers, "auth_token"), Some("tok123"));
        assert_eq!(read_cookie(&headers, "refresh_token"), Some("r"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_read_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::COOKIE, HeaderValue::from_static("auth_token=t"));
        assert_eq!(read_cookie(&headers, "auth_token"), Some("t"));
    }

    #[test]
    fn test_empty_cookie_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("auth_token="));
        assert_eq!(read_cookie(&headers, "auth_token"), None);
    }
}
