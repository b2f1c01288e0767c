//! Session token verification and viewer resolution.

use std::collections::HashSet;
use std::fmt;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use storage::error::StorageError;
use storage::models::{Role, Tenant, Viewer};
use storage::services::tenant_resolver::resolve_tenant;

use crate::error::WebError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "scoreboard_session";

#[derive(Debug)]
pub enum AuthError {
    MissingCredential,
    InvalidToken(jsonwebtoken::errors::Error),
    MissingClaim(&'static str),
    InvalidRole(String),
    InvalidAudience,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredential => write!(f, "missing session cookie"),
            Self::InvalidToken(e) => write!(f, "invalid token: {}", e),
            Self::MissingClaim(claim) => write!(f, "invalid token: {} not found", claim),
            Self::InvalidRole(role) => write!(f, "invalid token: {} is invalid role", role),
            Self::InvalidAudience => write!(f, "invalid token: aud must be one element"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Audience {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: Option<String>,
    role: Option<String>,
    aud: Option<Audience>,
}

/// Claims of a token whose signature and expiry checked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub subject: String,
    pub role: Role,
    pub audience: String,
}

/// RS256 verifier for session tokens.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn from_rsa_pem(pem: &[u8]) -> Result<Self, jsonwebtoken::errors::Error> {
        let key = DecodingKey::from_rsa_pem(pem)?;

        let mut validation = Validation::new(Algorithm::RS256);
        // aud is matched against the addressed tenant, not a fixed value
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        Ok(Self { key, validation })
    }

    pub fn verify(&self, token: &str) -> Result<VerifiedToken, AuthError> {
        let claims = decode::<Claims>(token, &self.key, &self.validation)
            .map_err(AuthError::InvalidToken)?
            .claims;

        let subject = claims
            .sub
            .filter(|sub| !sub.is_empty())
            .ok_or(AuthError::MissingClaim("sub"))?;

        let role = claims.role.ok_or(AuthError::MissingClaim("role"))?;
        let role = role.parse::<Role>().map_err(|_| AuthError::InvalidRole(role))?;

        let audience = match claims.aud {
            Some(Audience::One(aud)) => aud,
            Some(Audience::Many(mut aud)) if aud.len() == 1 => aud.remove(0),
            _ => return Err(AuthError::InvalidAudience),
        };

        Ok(VerifiedToken {
            subject,
            role,
            audience,
        })
    }
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenVerifier").finish_non_exhaustive()
    }
}

/// Value of the session cookie, if the request carries one.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token)
        .filter(|token| !token.is_empty())
}

pub fn request_host(headers: &HeaderMap) -> Result<&str, WebError> {
    headers
        .get(header::HOST)
        .and_then(|host| host.to_str().ok())
        .ok_or_else(|| WebError::BadRequest("missing Host header".to_string()))
}

/// Verify the session token and bind it to the tenant addressed by the Host header.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Viewer, WebError> {
    let token = session_token(headers).ok_or(AuthError::MissingCredential)?;
    let verified = state.verifier.verify(token)?;

    let host = request_host(headers)?;
    let tenant = match resolve_tenant(&state.db, host, &state.base_hostname).await {
        Ok(tenant) => tenant,
        Err(StorageError::TenantNotFound(_)) => {
            return Err(WebError::Unauthorized("tenant not found".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    if tenant.name != verified.audience {
        return Err(WebError::Unauthorized(format!(
            "invalid token: tenant {} not found in aud",
            tenant.name
        )));
    }
    if tenant.is_admin() && verified.role != Role::Admin {
        return Err(WebError::Unauthorized("tenant not found".to_string()));
    }

    Ok(Viewer {
        role: verified.role,
        player_id: verified.subject,
        tenant_name: tenant.name,
        tenant_id: tenant.id,
    })
}

async fn require_role(
    role: Role,
    state: &AppState,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let viewer = authenticate(state, request.headers()).await?;
    if role == Role::Admin && viewer.tenant_name != Tenant::ADMIN_NAME {
        return Err(WebError::NotFound(format!(
            "tenant {} does not serve the admin API",
            viewer.tenant_name
        )));
    }
    if viewer.role != role {
        return Err(WebError::Forbidden(format!("role {} required", role)));
    }

    request.extensions_mut().insert(viewer);
    Ok(next.run(request).await)
}

pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, WebError> {
    require_role(Role::Admin, &state, request, next).await
}

pub async fn require_organizer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, WebError> {
    require_role(Role::Organizer, &state, request, next).await
}

pub async fn require_player(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, WebError> {
    require_role(Role::Player, &state, request, next).await
}
