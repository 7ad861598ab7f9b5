// ABOUTME: User account route handlers for registration and sign-in
// ABOUTME: Thin axum handlers delegating to AuthService, which owns hashing and the user store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriq

//! Authentication routes for user management
//!
//! Both endpoints answer "does this account exist" with a 2xx status; only
//! missing credentials (400) and store failures (500) are errors.

use crate::{
    constants::{auth::PLACEHOLDER_TOKEN, messages},
    database::{Database, UserInsert},
    errors::{AppError, AppResult},
    models::{User, UserProfile},
    resources::ServerResources,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// User registration request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Login email, trimmed before lookup
    pub email: String,
    /// Optional phone number
    pub mobile: Option<String>,
    /// Plaintext password, hashed with bcrypt before storage
    pub password: String,
    /// Accepted for client compatibility; not compared against `password`
    pub confirm_password: Option<String>,
}

/// User registration response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// True when the email was already registered
    pub exists: bool,
    /// The created account, omitted when `exists` is true
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

/// User sign-in request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignInRequest {
    /// Login email
    pub email: String,
    /// Plaintext password checked against the stored hash
    pub password: String,
    /// Accepted for client compatibility; ignored
    pub remember_me: Option<bool>,
}

/// User info for sign-in response
#[derive(Debug, Serialize)]
pub struct SignInUser {
    /// Display name ("first last")
    pub name: String,
    /// Account email
    pub email: String,
}

/// User sign-in response
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    /// True only when the email is known and the password matches
    pub exists: bool,
    /// Placeholder session token, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Signed-in account, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SignInUser>,
}

impl SignInResponse {
    const fn unknown() -> Self {
        Self {
            exists: false,
            token: None,
            user: None,
        }
    }
}

/// Authentication service for business logic
#[derive(Clone)]
pub struct AuthService {
    database: Database,
    bcrypt_cost: u32,
}

impl AuthService {
    /// Create a service over `database`, hashing new passwords at `bcrypt_cost`
    #[must_use]
    pub const fn new(database: Database, bcrypt_cost: u32) -> Self {
        Self {
            database,
            bcrypt_cost,
        }
    }

    /// Register a new account, or report that the email is already taken
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when email or password is empty, and an internal
    /// error if hashing or the user store fails
    pub async fn register(&self, request: RegisterRequest) -> AppResult<RegisterResponse> {
        let email = request.email.trim().to_owned();
        if email.is_empty() || request.password.is_empty() {
            return Err(AppError::invalid_input(messages::CREDENTIALS_REQUIRED));
        }

        info!("User registration attempt for email: {}", email);

        if self.find_user(&email).await?.is_some() {
            info!("Registration skipped, email already registered: {}", email);
            return Ok(RegisterResponse {
                exists: true,
                user: None,
            });
        }

        let password_hash = hash_password(request.password, self.bcrypt_cost).await?;
        let user = User::new(
            request.first_name,
            request.last_name,
            email,
            request.mobile,
            password_hash,
        );

        match self
            .database
            .create_user(&user)
            .await
            .map_err(store_failure)?
        {
            UserInsert::Created => {
                info!("User registered successfully: {} ({})", user.email, user.id);
                Ok(RegisterResponse {
                    exists: false,
                    user: Some(UserProfile::from(&user)),
                })
            }
            UserInsert::EmailTaken => {
                warn!("Concurrent registration for email: {}", user.email);
                Ok(RegisterResponse {
                    exists: true,
                    user: None,
                })
            }
        }
    }

    /// Check credentials
    ///
    /// Unknown email and wrong password produce the same `exists: false` answer.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the user store or hash verification fails
    pub async fn sign_in(&self, request: SignInRequest) -> AppResult<SignInResponse> {
        let email = request.email.trim();
        info!("User sign-in attempt for email: {}", email);

        let Some(user) = self.find_user(email).await? else {
            return Ok(SignInResponse::unknown());
        };

        if !verify_password(request.password, user.password_hash.clone()).await? {
            warn!("Invalid password for user: {}", user.email);
            return Ok(SignInResponse::unknown());
        }

        info!("User signed in: {} ({})", user.email, user.id);
        Ok(SignInResponse {
            exists: true,
            token: Some(PLACEHOLDER_TOKEN.to_owned()),
            user: Some(SignInUser {
                name: user.name,
                email: user.email,
            }),
        })
    }

    async fn find_user(&self, email: &str) -> AppResult<Option<User>> {
        self.database
            .get_user_by_email(email)
            .await
            .map_err(store_failure)
    }
}

fn store_failure(error: anyhow::Error) -> AppError {
    AppError::database(format!("{error:#}"))
}

/// Hash a password on the blocking pool
async fn hash_password(password: String, cost: u32) -> AppResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Password hashing error: {e}")))
}

/// Verify a password against its bcrypt hash on the blocking pool
async fn verify_password(password: String, hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Password verification error: {e}")))
}

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create the `/api/auth/register` and `/api/auth/signin` routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let service = AuthService::new(resources.database.clone(), resources.bcrypt_cost());

        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/signin", post(Self::handle_sign_in))
            .with_state(service)
    }

    async fn handle_register(
        State(service): State<AuthService>,
        body: Result<Json<RegisterRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) = body.map_err(|rejection| {
            warn!("Rejected registration body: {}", rejection.body_text());
            AppError::invalid_input(messages::CREDENTIALS_REQUIRED)
        })?;

        let response = service.register(request).await?;
        let status = if response.exists {
            StatusCode::OK
        } else {
            StatusCode::CREATED
        };
        Ok((status, Json(response)).into_response())
    }

    async fn handle_sign_in(
        State(service): State<AuthService>,
        body: Result<Json<SignInRequest>, JsonRejection>,
    ) -> Result<Json<SignInResponse>, AppError> {
        let Json(request) = body.map_err(|rejection| {
            warn!("Rejected sign-in body: {}", rejection.body_text());
            AppError::invalid_input(messages::CREDENTIALS_REQUIRED)
        })?;
        Ok(Json(service.sign_in(request).await?))
    }
}
