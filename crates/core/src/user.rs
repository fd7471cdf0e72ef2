//! Demo users and login tokens.
//!
//! The login flow issues a deterministic per-email token so a dashboard can
//! tell users apart. It carries no secret and must not be used to
//! authenticate anything.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Prefix for demo tokens.
pub const TOKEN_PREFIX: &str = "tok-";

/// Number of hex digest characters kept in a demo token.
const TOKEN_HEX_CHARS: usize = 16;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Viewer,
    Operator,
    Admin,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Viewer => "viewer",
            UserRole::Operator => "operator",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "viewer" => Ok(UserRole::Viewer),
            "operator" => Ok(UserRole::Operator),
            "admin" => Ok(UserRole::Admin),
            other => Err(CoreError::Validation(format!("Invalid role '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub token: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub token: String,
    pub created_at: Timestamp,
}

/// Request body for `POST /api/login`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(max = 200))]
    pub name: String,
    #[validate(length(max = 320))]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginResponse {
    pub name: String,
    pub email: String,
    pub token: String,
}

/// Derive the demo token for an email address.
///
/// Same email, same token. Not a credential.
pub fn demo_token(email: &str) -> String {
    let hash = Sha256::digest(email.as_bytes());
    let hex = format!("{hash:x}");
    format!("{TOKEN_PREFIX}{}", &hex[..TOKEN_HEX_CHARS])
}
