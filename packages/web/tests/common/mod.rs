//! Test harness: the full router over an in-memory gateway, score store and
//! session store, with a tiny cookie jar carried between requests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use tower_sessions::cookie::Cookie;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use api::auth::MockGateway;
use store::ScoreStore;
use web::settings::CookieSettings;
use web::AppState;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }

    pub fn set_cookies(&self) -> Vec<Cookie<'static>> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| Cookie::parse(v.to_string()).ok())
            .collect()
    }

    pub fn set_cookie(&self, name: &str) -> Option<Cookie<'static>> {
        self.set_cookies().into_iter().find(|c| c.name() == name)
    }

    /// Whether the response tells the browser to delete `name`.
    pub fn removes_cookie(&self, name: &str) -> bool {
        self.set_cookie(name).is_some_and(|c| is_removal(&c))
    }
}

fn is_removal(cookie: &Cookie<'_>) -> bool {
    cookie.value().is_empty() || cookie.max_age() == Some(time::Duration::ZERO)
}

pub struct TestApp {
    router: Router,
    pub gateway: MockGateway,
    pub scores: ScoreStore,
    jar: HashMap<String, String>,
}

impl TestApp {
    pub async fn new(gateway: MockGateway) -> Self {
        let pool = store::connect("sqlite::memory:").await.unwrap();
        store::migrate(&pool).await.unwrap();
        let scores = ScoreStore::new(pool);

        let state = AppState::new(
            Arc::new(gateway.clone()),
            scores.clone(),
            CookieSettings::default(),
        );
        let router = web::app(state).layer(SessionManagerLayer::new(MemoryStore::default()));

        Self {
            router,
            gateway,
            scores,
            jar: HashMap::new(),
        }
    }

    /// A second browser talking to the same server.
    pub fn new_browser(&self) -> Self {
        Self {
            router: self.router.clone(),
            gateway: self.gateway.clone(),
            scores: self.scores.clone(),
            jar: HashMap::new(),
        }
    }

    pub fn cookie(&self, name: &str) -> Option<String> {
        self.jar.get(name).cloned()
    }

    pub fn set_cookie(&mut self, name: &str, value: &str) {
        self.jar.insert(name.to_string(), value.to_string());
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request(Method::GET, uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_json(&mut self, uri: &str, body: &str) -> TestResponse {
        let request = self
            .request(Method::POST, uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Log in through the gateway callback as `user_id`.
    pub async fn login(&mut self, user_id: &str) -> TestResponse {
        let response = self
            .get(&format!(
                "/auth/callback?payload={}",
                MockGateway::payload_for(user_id)
            ))
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response
    }

    fn request(&self, method: Method, uri: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(uri);
        if !self.jar.is_empty() {
            let header = self
                .jar
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(COOKIE, header);
        }
        builder
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let response = TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        };

        for cookie in response.set_cookies() {
            if is_removal(&cookie) {
                self.jar.remove(cookie.name());
            } else {
                self.jar
                    .insert(cookie.name().to_string(), cookie.value().to_string());
            }
        }
        response
    }
}
