//! One-shot flash messages carried in a cookie.
//!
//! A flash is set on the redirect after a form submission and consumed
//! by the next page render. The payload is JSON wrapped in URL-safe
//! base64 so it survives cookie encoding rules.

use axum::http::{header, HeaderMap};
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Cookie holding the pending flash message.
pub const FLASH_COOKIE: &str = "flash";

/// Visual category of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashCategory {
    Success,
    Error,
    Info,
}

impl FlashCategory {
    /// CSS class suffix for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// A message shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Info,
            message: message.into(),
        }
    }
}

/// `Set-Cookie` value that stores `flash` for the next request.
pub fn set_cookie(flash: &Flash) -> String {
    let json = serde_json::to_vec(flash).unwrap_or_default();
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(json);
    format!("{}={}; Path=/; HttpOnly; Max-Age=60", FLASH_COOKIE, payload)
}

/// `Set-Cookie` value that clears the flash cookie.
pub fn clear_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; Max-Age=0", FLASH_COOKIE)
}

/// Read the pending flash message out of a request's `Cookie` header.
pub fn from_headers(headers: &HeaderMap) -> Option<Flash> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|part| {
        let (name, value) = part.trim().split_once('=')?;
        if name != FLASH_COOKIE || value.is_empty() {
            return None;
        }
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(value)
            .ok()?;
        serde_json::from_slice(&bytes).ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_roundtrip_through_cookie() {
        let flash = Flash::success("Page added successfully");
        let set = set_cookie(&flash);

        // The request echoes back only the name=value pair.
        let pair = set.split(';').next().unwrap();
        let headers = headers_with_cookie(pair);

        assert_eq!(from_headers(&headers), Some(flash));
    }

    #[test]
    fn test_survives_other_cookies() {
        let flash = Flash::info("Page already exists");
        let pair = set_cookie(&flash);
        let pair = pair.split(';').next().unwrap();
        let headers = headers_with_cookie(&format!("session=abc123; {}; theme=dark", pair));

        assert_eq!(from_headers(&headers), Some(flash));
    }

    #[test]
    fn test_cleared_cookie_yields_none() {
        let headers = headers_with_cookie("flash=");
        assert_eq!(from_headers(&headers), None);
    }

    #[test]
    fn test_garbage_payload_yields_none() {
        let headers = headers_with_cookie("flash=!!!not-base64!!!");
        assert_eq!(from_headers(&headers), None);
    }

    #[test]
    fn test_missing_cookie_yields_none() {
        assert_eq!(from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_category_css_classes() {
        assert_eq!(FlashCategory::Success.as_str(), "success");
        assert_eq!(FlashCategory::Error.as_str(), "error");
        assert_eq!(FlashCategory::Info.as_str(), "info");
    }
}
