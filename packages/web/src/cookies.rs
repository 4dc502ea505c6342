//! The `auth` cookie.
//!
//! Its value is the opaque token issued by the gateway. It is HTTP-only, lives
//! for one week, and its `Secure`/`SameSite` flags come from
//! [`CookieSettings`].

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use time::Duration;
use tower_sessions::cookie::Cookie;

use crate::settings::CookieSettings;

pub const AUTH_COOKIE: &str = "auth";

/// One week.
pub const AUTH_COOKIE_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 7;

/// The `auth` token sent by the browser, if any.
pub fn read_auth_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == AUTH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

/// `Set-Cookie` value storing `token`.
pub fn auth_cookie(token: String, settings: &CookieSettings) -> String {
    Cookie::build((AUTH_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(settings.secure)
        .same_site(settings.same_site.into())
        .max_age(Duration::seconds(AUTH_COOKIE_MAX_AGE_SECS))
        .build()
        .to_string()
}

/// `Set-Cookie` value deleting the `auth` cookie.
pub fn removal_cookie() -> String {
    let mut cookie = Cookie::build((AUTH_COOKIE, "")).path("/").build();
    cookie.make_removal();
    cookie.to_string()
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;
    use crate::settings::SameSitePolicy;

    fn headers(values: &[&'static str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append(COOKIE, HeaderValue::from_static(value));
        }
        headers
    }

    #[test]
    fn test_read_auth_cookie() {
        assert_eq!(read_auth_cookie(&headers(&[])), None);
        assert_eq!(read_auth_cookie(&headers(&["id=abc; theme=dark"])), None);
        assert_eq!(
            read_auth_cookie(&headers(&["id=abc; auth=tok123"])).as_deref(),
            Some("tok123")
        );
        assert_eq!(
            read_auth_cookie(&headers(&["id=abc", "auth=tok456"])).as_deref(),
            Some("tok456")
        );
        assert_eq!(read_auth_cookie(&headers(&["auth="])), None);
    }

    #[test]
    fn test_auth_cookie_flags() {
        let insecure = auth_cookie("tok".to_string(), &CookieSettings::default());
        assert!(insecure.starts_with("auth=tok"));
        assert!(insecure.contains("HttpOnly"));
        assert!(insecure.contains("Max-Age=604800"));
        assert!(insecure.contains("SameSite=Lax"));
        assert!(!insecure.contains("Secure"));

        let strict = auth_cookie(
            "tok".to_string(),
            &CookieSettings {
                secure: true,
                same_site: SameSitePolicy::Strict,
            },
        );
        assert!(strict.contains("Secure"));
        assert!(strict.contains("SameSite=Strict"));
    }

    #[test]
    fn test_removal_cookie() {
        let removal = removal_cookie();
        assert!(removal.starts_with("auth=;"));
        assert!(removal.contains("Max-Age=0"));
    }
}
