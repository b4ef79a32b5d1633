//! Authentication middleware
//!
//! JWT authentication and Manager/Seller role gating

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use shared::models::UserRole;
use uuid::Uuid;

use crate::error::{AppError, ErrorDetail, ErrorResponse};
use crate::AppState;

/// Authenticated user information extracted from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_manager(&self) -> bool {
        self.role.is_manager()
    }

    /// Reject the request unless the user is a Manager
    pub fn require_manager(&self) -> Result<(), AppError> {
        if self.is_manager() {
            Ok(())
        } else {
            Err(AppError::InsufficientPermissions)
        }
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn to_auth_user(&self) -> Result<AuthUser, String> {
        let user_id =
            Uuid::parse_str(&self.sub).map_err(|_| "Invalid user ID in token".to_string())?;
        Ok(AuthUser {
            user_id,
            role: self.role,
        })
    }
}

/// Decode and validate JWT token
pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Invalid token: {}", e))
}

/// Pull the token out of a `Bearer <token>` header value
fn bearer_token(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|h| h.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
}

/// Resolve the caller on routes where signing in is optional.
/// Missing or invalid tokens yield `None`.
pub fn user_from_headers(headers: &HeaderMap, secret: &str) -> Option<AuthUser> {
    let header = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());
    let token = bearer_token(header)?;
    decode_jwt(token, secret).ok()?.to_auth_user().ok()
}

/// Authentication middleware that validates JWT tokens and stores the
/// resulting `AuthUser` in the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match bearer_token(header) {
        Some(token) => token,
        None => return unauthorized_response("Missing or invalid Authorization header"),
    };

    let auth_user = match decode_jwt(token, &state.config.jwt.secret)
        .and_then(|claims| claims.to_auth_user())
    {
        Ok(user) => user,
        Err(msg) => return unauthorized_response(&msg),
    };

    tracing::debug!(user_id = %auth_user.user_id, role = %auth_user.role, "authenticated request");
    request.extensions_mut().insert(auth_user);

    next.run(request).await
}

/// Create unauthorized response
fn unauthorized_response(message: &str) -> Response {
    let error = ErrorResponse {
        error: ErrorDetail::new("UNAUTHORIZED", message),
    };

    (StatusCode::UNAUTHORIZED, Json(error)).into_response()
}

/// Extractor for authenticated user
/// Use this in handlers to get the current user
#[derive(Clone, Debug)]
pub struct CurrentUser(pub AuthUser);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                let error = ErrorResponse {
                    error: ErrorDetail::new("UNAUTHORIZED", "Authentication required"),
                };
                (StatusCode::UNAUTHORIZED, Json(error))
            })
    }
}

/// Extractor that only admits Managers
#[derive(Clone, Debug)]
pub struct Manager(pub AuthUser);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Manager
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        user.require_manager().map_err(IntoResponse::into_response)?;
        Ok(Manager(user))
    }
}
