//! Google OAuth2 login.
//!
//! The server only needs two things from the provider: the URL to send the
//! browser to, and the identity behind the authorization code that comes back.
//! Both are behind [`IdentityProvider`] so tests can swap in a fake.

use std::time::Duration;

use async_trait::async_trait;
use fintrack_core::{
    errors::{Error, Result},
    users::NewUser,
};
use serde::{de::DeserializeOwned, Deserialize};

use crate::config::GoogleOAuthConfig;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
const GOOGLE_SCOPES: &str =
    "https://www.googleapis.com/auth/userinfo.email https://www.googleapis.com/auth/userinfo.profile";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Where to send the browser to start a login carrying `state`.
    fn authorize_url(&self, state: &str) -> String;

    /// Exchanges an authorization code for the user's email and display name.
    async fn fetch_identity(&self, code: &str) -> Result<NewUser>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    email: String,
    name: Option<String>,
}

pub struct GoogleIdentityProvider {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_url: String,
}

impl GoogleIdentityProvider {
    pub fn new(config: &GoogleOAuthConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;
        Ok(Self {
            client,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_url: config.redirect_url.clone(),
        })
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Unexpected(format!("Failed to read response: {}", e)))?;
        if !status.is_success() {
            return Err(Error::Unexpected(format!(
                "OAuth provider error {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }
        serde_json::from_str(&body)
            .map_err(|e| Error::Unexpected(format!("Failed to parse provider response: {}", e)))
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    fn authorize_url(&self, state: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            GOOGLE_AUTH_URL,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_url),
            urlencoding::encode(GOOGLE_SCOPES),
            urlencoding::encode(state),
        )
    }

    async fn fetch_identity(&self, code: &str) -> Result<NewUser> {
        tracing::debug!("Exchanging OAuth code for token");
        let response = self
            .client
            .post(GOOGLE_TOKEN_URL)
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.redirect_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| Error::Unexpected(format!("Token exchange failed: {}", e)))?;
        let token: TokenResponse = Self::parse_response(response).await?;

        let response = self
            .client
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| Error::Unexpected(format!("Failed to get user info: {}", e)))?;
        let info: GoogleUserInfo = Self::parse_response(response).await?;

        Ok(NewUser {
            email: info.email,
            name: info.name,
        })
    }
}
