//! Authentication Middleware
//!
//! JWT bearer auth for the admin API. Public read endpoints and the login
//! route are allowlisted; everything else under /api/ requires a token.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// Whether the request may pass without a token.
///
/// Covers CORS preflight, non-API paths (static images, 404s), the login
/// route, the SSE stream, and the public GET surface of the site.
fn is_public(method: &http::Method, path: &str) -> bool {
    if method == http::Method::OPTIONS {
        return true;
    }
    if !path.starts_with("/api/") {
        return true;
    }
    if path == "/api/auth/login" {
        return true;
    }
    if method != http::Method::GET {
        return false;
    }
    matches!(
        path,
        "/api/health" | "/api/menu" | "/api/categories" | "/api/specials" | "/api/gallery"
            | "/api/reviews" | "/api/settings" | "/api/events"
    ) || path.starts_with("/api/menu/") && !path.ends_with("/special")
}

/// Require a valid bearer token, injecting [`CurrentUser`] on success
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path().to_string();

    if is_public(req.method(), &path) {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = path);
            return Err(AppError::unauthorized());
        }
    };

    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!("WARN", "auth_failed", error = format!("{}", e), uri = path);

            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}
