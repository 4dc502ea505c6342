//! Page scripts, embedded in the binary.

use axum::extract::Path;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

const LOGIN_JS: &str = include_str!("../static/js/login.js");
const CALLBACK_JS: &str = include_str!("../static/js/callback.js");
const COUNTER_JS: &str = include_str!("../static/js/counter.js");

fn lookup(file: &str) -> Option<&'static str> {
    match file {
        "login.js" => Some(LOGIN_JS),
        "callback.js" => Some(CALLBACK_JS),
        "counter.js" => Some(COUNTER_JS),
        _ => None,
    }
}

/// `GET /static/js/{file}`
pub async fn script(Path(file): Path<String>) -> Response {
    match lookup(&file) {
        Some(source) => ([(CONTENT_TYPE, "text/javascript; charset=utf-8")], source).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert!(lookup("login.js").unwrap().contains("bg-login-btn"));
        assert!(lookup("callback.js").unwrap().contains("browniegate_logged_in"));
        assert!(lookup("counter.js").unwrap().contains("/update_count"));
        assert!(lookup("../Cargo.toml").is_none());
    }
}
