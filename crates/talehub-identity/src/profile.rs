//! User profile documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Avatar assigned to every new account until a custom one is uploaded.
pub const DEFAULT_AVATAR_URL: &str = "/media/default-avatar.png";

/// One profile document per identity, at `users/{uid}`, created at
/// sign-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name.
    pub name: String,
    /// Unique-by-convention handle. Nothing enforces uniqueness; the
    /// email is the login key.
    pub username: String,
    /// Normalized (trimmed, lowercased) email address.
    pub email: String,
    /// Avatar URL.
    pub pfp: String,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name. Required.
    pub name: String,
    /// Handle. Required.
    pub username: String,
    /// Email address, the login key. Required.
    pub email: String,
    /// Plaintext password, hashed before storage. Required.
    pub password: String,
}

/// The identity a successful sign-in yields: the stable user id and the
/// display name, used as the sole identity key throughout the data model.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    /// Stable user identifier.
    pub uid: uuid::Uuid,
    /// Display name from the profile.
    pub display_name: String,
}
