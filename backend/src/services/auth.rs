//! Authentication service for user registration, login, and token management

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared::models::{User, UserRole};
use shared::validation::{validate_email, validate_name, validate_password};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, Claims};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

/// Input for registering a new user account
#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Only honoured when a Manager is making the request
    pub role: Option<UserRole>,
}

/// Authentication tokens
#[derive(Debug, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Response after successful registration
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: User,
    #[serde(flatten)]
    pub tokens: AuthTokens,
}

/// User info from database
#[derive(Debug, sqlx::FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    fn role(&self) -> AppResult<UserRole> {
        UserRole::parse(&self.role)
            .ok_or_else(|| AppError::Internal(format!("Unknown role '{}'", self.role)))
    }

    fn into_user(self) -> AppResult<User> {
        let role = self.role()?;
        Ok(User {
            id: self.id,
            email: self.email,
            name: self.name,
            role,
            is_active: self.is_active,
            created_at: self.created_at,
        })
    }
}

/// Decide which role a new account gets.
///
/// The first account in an empty system is the bootstrap Manager. After that
/// only a signed-in Manager may hand out roles; everyone else registers as a
/// Seller.
pub fn role_for_new_account(
    existing_users: i64,
    requester: Option<&AuthUser>,
    requested: Option<UserRole>,
) -> AppResult<UserRole> {
    if existing_users == 0 {
        return Ok(UserRole::Manager);
    }
    match (requester, requested) {
        (_, None) | (_, Some(UserRole::Seller)) => Ok(UserRole::Seller),
        (Some(user), Some(UserRole::Manager)) if user.is_manager() => Ok(UserRole::Manager),
        (_, Some(UserRole::Manager)) => Err(AppError::InsufficientPermissions),
    }
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
            refresh_token_expiry: config.jwt.refresh_token_expiry,
        }
    }

    /// Register a new account and sign it in
    pub async fn register(
        &self,
        requester: Option<&AuthUser>,
        input: RegisterInput,
    ) -> AppResult<RegisterResponse> {
        validate_name("name", &input.name)?;
        validate_email(&input.email)?;
        validate_password(&input.password)?;

        let email = input.email.trim().to_lowercase();

        let mut tx = self.db.begin().await?;

        // Serialize registrations so only one account can claim the bootstrap role
        sqlx::query("LOCK TABLE users IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let existing_users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *tx)
            .await?;

        let role = role_for_new_account(existing_users, requester, input.role)?;

        let password_hash = hash(&input.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, password_hash, name, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, name, role, is_active, created_at
            "#,
        )
        .bind(&email)
        .bind(&password_hash)
        .bind(input.name.trim())
        .bind(role.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "email", "An account with this email already exists"))?;

        tx.commit().await?;

        tracing::info!(user_id = %row.id, role = %role, "registered user");

        let user = row.into_user()?;
        let tokens = self.generate_tokens(user.id, user.role)?;
        self.store_refresh_token(user.id, &tokens.refresh_token).await?;

        Ok(RegisterResponse { user, tokens })
    }

    /// Authenticate user with email and password
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthTokens> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, name, role, is_active, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        if !user.is_active {
            return Err(AppError::Unauthorized("Account is disabled".to_string()));
        }

        let valid = verify(password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(user.id)
            .execute(&self.db)
            .await?;

        let tokens = self.generate_tokens(user.id, user.role()?)?;
        self.store_refresh_token(user.id, &tokens.refresh_token).await?;

        tracing::debug!(user_id = %user.id, "login succeeded");

        Ok(tokens)
    }

    /// Refresh access token using refresh token. The old refresh token is revoked.
    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<AuthTokens> {
        let token_hash = Self::hash_token(refresh_token);

        let (user_id, role) = sqlx::query_as::<_, (Uuid, String)>(
            r#"
            SELECT rt.user_id, u.role
            FROM refresh_tokens rt
            JOIN users u ON u.id = rt.user_id
            WHERE rt.token_hash = $1
              AND rt.expires_at > NOW()
              AND rt.revoked_at IS NULL
              AND u.is_active = true
            "#,
        )
        .bind(&token_hash)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired refresh token".to_string()))?;

        let role = UserRole::parse(&role)
            .ok_or_else(|| AppError::Internal(format!("Unknown role '{}'", role)))?;

        sqlx::query("UPDATE refresh_tokens SET revoked_at = NOW() WHERE token_hash = $1")
            .bind(&token_hash)
            .execute(&self.db)
            .await?;

        let tokens = self.generate_tokens(user_id, role)?;
        self.store_refresh_token(user_id, &tokens.refresh_token).await?;

        Ok(tokens)
    }

    /// Load the profile of the signed-in user
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<User> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, name, role, is_active, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?
        .into_user()
    }

    /// Generate access and refresh tokens
    fn generate_tokens(&self, user_id: Uuid, role: UserRole) -> AppResult<AuthTokens> {
        let now = Utc::now();
        let access_exp = now + Duration::seconds(self.access_token_expiry);

        let access_claims = Claims {
            sub: user_id.to_string(),
            role,
            exp: access_exp.timestamp(),
            iat: now.timestamp(),
        };

        let access_token = encode(
            &Header::default(),
            &access_claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

        // Refresh token (opaque random token)
        let refresh_token = Uuid::new_v4().to_string();

        Ok(AuthTokens {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Store refresh token in database
    async fn store_refresh_token(&self, user_id: Uuid, token: &str) -> AppResult<()> {
        let token_hash = Self::hash_token(token);
        let expires_at = Utc::now() + Duration::seconds(self.refresh_token_expiry);

        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(&token_hash)
        .bind(expires_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Hash a token for storage (hex-encoded SHA-256)
    fn hash_token(token: &str) -> String {
        Sha256::digest(token.as_bytes())
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }
}
