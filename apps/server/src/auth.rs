use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::{Query, State},
    http::{
        header::{AUTHORIZATION, COOKIE, LOCATION, SET_COOKIE},
        HeaderMap, Request, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use fintrack_core::users::{User, UserId};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::MessageResponse,
};

pub const SESSION_COOKIE: &str = "auth_token";

/// Authenticated caller, inserted into request extensions by [`require_session`].
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: UserId,
    pub email: String,
}

pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    Internal(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    exp: usize,
    iat: usize,
}

impl AuthManager {
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret),
            decoding_key: DecodingKey::from_secret(jwt_secret),
            validation,
            token_ttl,
        }
    }

    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::Internal("System clock is before UNIX_EPOCH".into()))?;
        let exp = now + self.token_ttl;
        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            iat: now.as_secs() as usize,
            exp: exp.as_secs() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    pub fn validate_token(&self, token: &str) -> Result<SessionUser, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| SessionUser {
                user_id: UserId::new(data.claims.sub),
                email: data.claims.email,
            })
            .map_err(|err| {
                tracing::debug!("Rejected session token: {:?}", err.kind());
                AuthError::InvalidToken
            })
    }

    pub fn expires_in(&self) -> Duration {
        self.token_ttl
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => ApiError::Unauthorized("Authentication required".into()),
            AuthError::InvalidToken => ApiError::Unauthorized("Invalid or expired token".into()),
            AuthError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

/// Accepts a base64 encoded 32-byte key, or a raw string of at least 32 characters.
pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("JWT secret cannot be empty");
    }
    if let Ok(bytes) = BASE64.decode(trimmed) {
        if bytes.len() == 32 {
            return Ok(bytes);
        }
    }
    if trimmed.len() >= 32 {
        return Ok(trimmed.as_bytes().to_vec());
    }
    anyhow::bail!("JWT secret must be base64 of 32 bytes or a string of at least 32 characters")
}

pub fn session_cookie(token: &str, ttl: Duration, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        ttl.as_secs()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn expired_session_cookie(secure: bool) -> String {
    session_cookie("", Duration::ZERO, secure)
}

/// Session token from the `auth_token` cookie, falling back to a bearer header.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string());
    if from_cookie.is_some() {
        return from_cookie;
    }

    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("Bearer") || token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = token_from_headers(request.headers()).ok_or(AuthError::MissingToken)?;
    let session = state.auth.validate_token(&token)?;
    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

#[derive(Deserialize)]
struct CallbackParams {
    state: Option<String>,
    code: Option<String>,
}

async fn sso(State(state): State<Arc<AppState>>) -> Redirect {
    Redirect::temporary(&state.identity_provider.authorize_url(&state.oauth_state))
}

async fn google_callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CallbackParams>,
) -> ApiResult<Response> {
    if params.state.as_deref() != Some(state.oauth_state.as_str()) {
        return Err(ApiError::BadRequest("invalid oauth state".into()));
    }
    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::BadRequest("missing authorization code".into()))?;

    let identity = state
        .identity_provider
        .fetch_identity(&code)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let user = state.user_service.login(identity).await?;
    let token = state.auth.issue_token(&user)?;

    let cookie = session_cookie(&token, state.auth.expires_in(), state.cookie_secure);
    let location = format!("{}/dashboard", state.frontend_url);
    Ok((
        StatusCode::FOUND,
        [(LOCATION, location), (SET_COOKIE, cookie)],
    )
        .into_response())
}

fn current_session(state: &AppState, headers: &HeaderMap) -> Option<SessionUser> {
    let token = token_from_headers(headers)?;
    state.auth.validate_token(&token).ok()
}

async fn verify(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    match current_session(&state, &headers) {
        Some(session) => Json(json!({
            "valid": true,
            "email": session.email,
            "user_id": session.user_id,
        }))
        .into_response(),
        None => (StatusCode::UNAUTHORIZED, Json(json!({ "valid": false }))).into_response(),
    }
}

async fn me(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    match current_session(&state, &headers) {
        Some(session) => Json(json!({
            "logged_in": true,
            "email": session.email,
            "user_id": session.user_id,
        }))
        .into_response(),
        None => (StatusCode::UNAUTHORIZED, Json(json!({ "logged_in": false }))).into_response(),
    }
}

async fn logout(State(state): State<Arc<AppState>>) -> Response {
    (
        [(SET_COOKIE, expired_session_cookie(state.cookie_secure))],
        Json(MessageResponse::new("Logged out successfully")),
    )
        .into_response()
}

/// Login flow and session introspection, mounted outside `/api/v1`.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sso", get(sso))
        .route("/auth/google/callback", get(google_callback))
        .route("/verify", get(verify))
        .route("/me", get(me))
        .route("/logout", post(logout))
}
