// ABOUTME: Account data models shared by the user store and the auth routes
// ABOUTME: Registered users with hashed credentials and their public projection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriq

//! Data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Display name (`first last`, trimmed)
    pub name: String,
    /// Login email, unique across users
    pub email: String,
    /// Optional phone number
    pub mobile: Option<String>,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh id and the display name derived from its parts
    #[must_use]
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        mobile: Option<String>,
        password_hash: String,
    ) -> Self {
        let name = format!("{first_name} {last_name}").trim().to_owned();
        Self {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            name,
            email,
            mobile,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// User fields safe to return to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Unique identifier
    pub id: Uuid,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Optional phone number
    pub mobile: Option<String>,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            mobile: user.mobile.clone(),
            created_at: user.created_at,
        }
    }
}
