//! # Authentication Middleware
//!
//! HTTP Basic authentication with per-route allow-lists.
//!
//! Every protected route group carries its own [`RouteAccess`]: the shared
//! user table plus the usernames allowed on that group. Failures answer
//! `401` with a `WWW-Authenticate: Basic` challenge.
//!
//! # Usage
//!
//! ```ignore
//! let access = Arc::new(RouteAccess::new(users, ["storefront"]));
//! let router = Router::new()
//!     .route("/freights/zunka", post(handler))
//!     .route_layer(middleware::from_fn_with_state(access, basic_auth_middleware));
//! ```

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Basic};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Challenge sent with every `401`.
pub const BASIC_CHALLENGE: &str = r#"Basic realm="Please enter your username and password for this service""#;

// ============================================================================
// Configuration
// ============================================================================

/// Credentials and the users allowed on one route group.
#[derive(Debug, Clone, Default)]
pub struct RouteAccess {
    users: Arc<HashMap<String, String>>,
    allowed: HashSet<String>,
}

impl RouteAccess {
    /// Creates access rules over a shared user table.
    #[must_use]
    pub fn new(users: Arc<HashMap<String, String>>, allowed: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            users,
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Checks a username and password against the table and the allow-list.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on an unknown user or wrong
    /// password, and `AuthError::NotAllowed` for a valid user outside the
    /// allow-list.
    pub fn check(&self, username: &str, password: &str) -> Result<(), AuthError> {
        match self.users.get(username) {
            Some(expected) if expected == password => {}
            _ => return Err(AuthError::InvalidCredentials),
        }
        if !self.allowed.contains(username) {
            return Err(AuthError::NotAllowed(username.to_string()));
        }
        Ok(())
    }
}

/// Access rules for every protected route group.
#[derive(Debug, Clone, Default)]
pub struct ApiAccess {
    /// Storefront freight routes.
    pub storefront: Arc<RouteAccess>,
    /// Marketplace freight routes.
    pub marketplace: Arc<RouteAccess>,
    /// Rate table administration.
    pub admin: Arc<RouteAccess>,
}

// ============================================================================
// Errors
// ============================================================================

/// Authentication errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No Basic credentials on the request.
    #[error("missing authentication credentials")]
    MissingCredentials,

    /// Unknown user or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Valid user not allowed on this route.
    #[error("user {0} is not allowed on this route")]
    NotAllowed(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let code = match &self {
            AuthError::MissingCredentials => "MISSING_CREDENTIALS",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::NotAllowed(_) => "NOT_ALLOWED",
        };
        let body = AuthErrorBody {
            code,
            message: self.to_string(),
        };

        let mut response = (StatusCode::UNAUTHORIZED, Json(body)).into_response();
        response
            .headers_mut()
            .insert(WWW_AUTHENTICATE, HeaderValue::from_static(BASIC_CHALLENGE));
        response
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// The authenticated username, inserted into request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

/// Basic authentication middleware.
///
/// # Errors
///
/// Returns an [`AuthError`] response when the request is not authorized.
pub async fn basic_auth_middleware(
    State(access): State<Arc<RouteAccess>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(Authorization(basic)) = request.headers().typed_get::<Authorization<Basic>>() else {
        debug!(path = %request.uri().path(), "request without basic credentials");
        return Err(AuthError::MissingCredentials);
    };

    if let Err(e) = access.check(basic.username(), basic.password()) {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            user = basic.username(),
            error = %e,
            "unauthorized access"
        );
        return Err(e);
    }

    request
        .extensions_mut()
        .insert(AuthenticatedUser(basic.username().to_string()));
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AuthError::MissingCredentials)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn access() -> RouteAccess {
        let users = HashMap::from([
            ("storefront".to_string(), "s3cret".to_string()),
            ("marketplace".to_string(), "m4rket".to_string()),
        ]);
        RouteAccess::new(Arc::new(users), ["storefront"])
    }

    #[test]
    fn allowed_user_passes() {
        assert!(access().check("storefront", "s3cret").is_ok());
    }

    #[test]
    fn wrong_password_is_rejected() {
        assert_eq!(
            access().check("storefront", "nope"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(access().check("ghost", "s3cret"), Err(AuthError::InvalidCredentials));
    }

    #[test]
    fn valid_user_outside_allow_list_is_rejected() {
        assert_eq!(
            access().check("marketplace", "m4rket"),
            Err(AuthError::NotAllowed("marketplace".to_string()))
        );
    }

    #[test]
    fn rejection_carries_basic_challenge() {
        let response = AuthError::MissingCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(WWW_AUTHENTICATE).unwrap(),
            BASIC_CHALLENGE
        );
    }
}
