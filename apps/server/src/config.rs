use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

use crate::auth::decode_secret_key;

pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub jwt_secret: Vec<u8>,
    pub session_ttl: Duration,
    pub cookie_secure: bool,
    pub frontend_url: String,
    pub oauth_state: String,
    pub google: GoogleOAuthConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_or("FT_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid FT_LISTEN_ADDR")?;
        let db_path = env_or("FT_DB_PATH", "./db/fintrack.db");
        let cors_allow = env_or("FT_CORS_ALLOW_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_or("FT_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .unwrap_or(30000);
        let raw_secret = std::env::var("FT_JWT_SECRET").context("FT_JWT_SECRET must be set")?;
        let jwt_secret = decode_secret_key(&raw_secret)?;
        let session_ttl_secs: u64 = env_or("FT_SESSION_TTL_SECS", "86400")
            .parse()
            .unwrap_or(86400);
        let cookie_secure = matches!(
            env_or("FT_COOKIE_SECURE", "false").to_ascii_lowercase().as_str(),
            "1" | "true" | "yes"
        );
        let frontend_url = env_or("FT_FRONTEND_URL", "http://localhost:3000")
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            session_ttl: Duration::from_secs(session_ttl_secs),
            cookie_secure,
            frontend_url,
            oauth_state: env_or("FT_OAUTH_STATE", "randomstate"),
            google: GoogleOAuthConfig {
                client_id: env_or("FT_GOOGLE_CLIENT_ID", ""),
                client_secret: env_or("FT_GOOGLE_CLIENT_SECRET", ""),
                redirect_url: env_or("FT_GOOGLE_REDIRECT_URL", ""),
            },
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
