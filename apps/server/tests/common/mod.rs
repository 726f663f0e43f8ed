#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use fintrack_core::{errors::Error, users::NewUser};
use fintrack_server::{
    api::app_router,
    build_state_with_provider,
    config::{Config, GoogleOAuthConfig},
    oauth::IdentityProvider,
    AppState,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const GOOD_CODE: &str = "good-code";
pub const OAUTH_STATE: &str = "test-state";

/// Stands in for Google: `GOOD_CODE` resolves to a fixed identity, anything else fails.
pub struct FakeIdentityProvider;

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    fn authorize_url(&self, state: &str) -> String {
        format!("https://idp.test/authorize?state={state}")
    }

    async fn fetch_identity(&self, code: &str) -> fintrack_core::Result<NewUser> {
        if code == GOOD_CODE {
            Ok(NewUser {
                email: "Ada@Example.com".to_string(),
                name: Some("Ada".to_string()),
            })
        } else {
            Err(Error::Unexpected("code exchange failed".to_string()))
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    _dir: TempDir,
}

pub fn test_config(dir: &TempDir) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: dir.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["http://localhost:3000".to_string()],
        request_timeout: Duration::from_secs(30),
        jwt_secret: vec![42u8; 32],
        session_ttl: Duration::from_secs(3600),
        cookie_secure: false,
        frontend_url: "http://localhost:3000".to_string(),
        oauth_state: OAUTH_STATE.to_string(),
        google: GoogleOAuthConfig {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_url: String::new(),
        },
    }
}

pub async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    let state = build_state_with_provider(&config, Arc::new(FakeIdentityProvider))
        .await
        .unwrap();
    let router = app_router(state.clone(), &config);
    TestApp {
        router,
        state,
        _dir: dir,
    }
}

impl TestApp {
    /// Signs `email` in and returns a session token plus the user's id.
    pub async fn login(&self, email: &str) -> (String, String) {
        let user = self
            .state
            .user_service
            .login(NewUser {
                email: email.to_string(),
                name: None,
            })
            .await
            .unwrap();
        let token = self.state.auth.issue_token(&user).unwrap();
        (token, user.id)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }
}

pub fn approx(value: &Value, expected: f64) -> bool {
    value
        .as_f64()
        .map(|v| (v - expected).abs() < 1e-9)
        .unwrap_or(false)
}
