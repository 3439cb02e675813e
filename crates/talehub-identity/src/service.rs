//! The identity service.

use std::sync::{Arc, Mutex};

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use talehub_core::clock::Clock;
use talehub_core::document::{CollectionPath, DocumentStore, WriteOp};
use talehub_core::error::DomainError;
use talehub_core::rng::TokenRng;

use crate::profile::{AuthenticatedUser, DEFAULT_AVATAR_URL, NewUser, UserProfile};
use crate::token;

/// Credentials document at `credentials/{email}`, private to this module.
#[derive(Debug, Serialize, Deserialize)]
struct Credentials {
    uid: Uuid,
    password_hash: String,
}

fn profiles() -> CollectionPath {
    CollectionPath::new("users")
}

fn credentials() -> CollectionPath {
    CollectionPath::new("credentials")
}

/// Normalizes an email into the credentials document key.
fn normalize_email(email: &str) -> Result<String, DomainError> {
    let normalized = email.trim().to_lowercase();
    if normalized.is_empty() || !normalized.contains('@') {
        return Err(DomainError::Validation("a valid email is required".into()));
    }
    // The email doubles as a document path segment.
    if normalized.contains('/') || normalized.contains(char::is_whitespace) {
        return Err(DomainError::Validation("a valid email is required".into()));
    }
    Ok(normalized)
}

/// Email+password identity over the document store.
#[derive(Clone)]
pub struct IdentityService {
    documents: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    rng: Arc<Mutex<dyn TokenRng + Send>>,
}

impl IdentityService {
    /// Creates the service over the given seams.
    #[must_use]
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
        rng: Arc<Mutex<dyn TokenRng + Send>>,
    ) -> Self {
        Self {
            documents,
            clock,
            rng,
        }
    }

    fn lock_rng(&self) -> Result<std::sync::MutexGuard<'_, dyn TokenRng + Send + 'static>, DomainError> {
        self.rng
            .lock()
            .map_err(|_| DomainError::Infrastructure("rng mutex poisoned".into()))
    }

    fn hash_password(&self, password: &str) -> Result<String, DomainError> {
        let mut salt_bytes = [0u8; 16];
        self.lock_rng()?.fill_bytes(&mut salt_bytes);
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| DomainError::Infrastructure(format!("salt encoding failed: {e}")))?;
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::Infrastructure(format!("password hashing failed: {e}")))
    }

    /// Creates an account: one credentials document and one profile
    /// document, written atomically. Returns the new uid.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for missing fields, a malformed
    /// email, or an email that is already registered.
    pub async fn sign_up(&self, new_user: NewUser) -> Result<Uuid, DomainError> {
        if new_user.name.trim().is_empty() {
            return Err(DomainError::Validation("name is required".into()));
        }
        if new_user.username.trim().is_empty() {
            return Err(DomainError::Validation("username is required".into()));
        }
        if new_user.password.is_empty() {
            return Err(DomainError::Validation("password is required".into()));
        }
        let email = normalize_email(&new_user.email)?;

        let credentials_path = credentials().doc(&email);
        if self.documents.get(&credentials_path).await?.is_some() {
            return Err(DomainError::Validation("email already registered".into()));
        }

        let uid = Uuid::new_v4();
        let creds = Credentials {
            uid,
            password_hash: self.hash_password(&new_user.password)?,
        };
        let profile = UserProfile {
            name: new_user.name,
            username: new_user.username,
            email,
            pfp: DEFAULT_AVATAR_URL.to_owned(),
            created_at: self.clock.now(),
        };

        self.documents
            .commit(vec![
                WriteOp::Put {
                    path: credentials_path,
                    value: serde_json::to_value(&creds).map_err(|e| {
                        DomainError::Infrastructure(format!("document encode failed: {e}"))
                    })?,
                },
                WriteOp::Put {
                    path: profiles().doc(&uid.to_string()),
                    value: serde_json::to_value(&profile).map_err(|e| {
                        DomainError::Infrastructure(format!("document encode failed: {e}"))
                    })?,
                },
            ])
            .await?;

        tracing::info!(%uid, "account created");
        Ok(uid)
    }

    /// Verifies an email+password pair.
    ///
    /// # Errors
    ///
    /// Returns the same `DomainError::Unauthorized` for an unknown email
    /// and a wrong password.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, DomainError> {
        let email = normalize_email(email)?;

        let creds: Credentials = match self.documents.get(&credentials().doc(&email)).await? {
            Some(doc) => doc.decode()?,
            None => {
                return Err(DomainError::Unauthorized("invalid email or password".into()));
            }
        };

        let parsed = PasswordHash::new(&creds.password_hash)
            .map_err(|e| DomainError::Infrastructure(format!("stored hash unreadable: {e}")))?;
        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_err()
        {
            return Err(DomainError::Unauthorized("invalid email or password".into()));
        }

        let profile = self.profile(creds.uid).await?;
        Ok(AuthenticatedUser {
            uid: creds.uid,
            display_name: profile.name,
        })
    }

    /// Fetches a user's profile.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no profile exists for `uid`.
    pub async fn profile(&self, uid: Uuid) -> Result<UserProfile, DomainError> {
        let path = profiles().doc(&uid.to_string());
        let doc = self
            .documents
            .get(&path)
            .await?
            .ok_or_else(|| DomainError::NotFound(path.to_string()))?;
        doc.decode()
    }

    /// Mints a fresh access token for the login cookie. Presence marker
    /// only; never stored or verified server-side.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the RNG mutex is poisoned.
    pub fn mint_access_token(&self) -> Result<String, DomainError> {
        let mut rng = self.lock_rng()?;
        Ok(token::mint_access_token(&mut *rng))
    }
}
