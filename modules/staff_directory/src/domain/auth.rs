//! Login, logout and credential management.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::contract::User;
use crate::domain::error::DomainError;
use crate::domain::repo::UsersRepository;
use crate::domain::session::SessionStore;
use crate::domain::validation::validate_login;

/// One-way password hashing with a per-call salt.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a PHC string.
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Check a plaintext against a stored hash. An unparsable hash is an error.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}

/// Argon2id hasher with default parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        use argon2::{
            password_hash::{PasswordHasher as _, SaltString},
            Argon2,
        };
        use rand::RngCore;

        let mut salt_bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut salt_bytes);
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| DomainError::password_hash(e.to_string()))?;

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::password_hash(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        use argon2::{
            password_hash::{PasswordHash, PasswordVerifier},
            Argon2,
        };

        let parsed =
            PasswordHash::new(hash).map_err(|e| DomainError::password_hash(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

/// Authentication service: credentials in, session tokens out.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UsersRepository>,
    hasher: Arc<dyn PasswordHasher>,
    sessions: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UsersRepository>,
        hasher: Arc<dyn PasswordHasher>,
        sessions: Arc<SessionStore>,
    ) -> Self {
        Self {
            users,
            hasher,
            sessions,
        }
    }

    /// Check credentials and open a session. Unknown user and wrong password
    /// both yield `InvalidCredentials`.
    #[instrument(name = "staff_directory.auth.login", skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<String, DomainError> {
        validate_login(username, password)?;

        let user = self
            .users
            .find_by_username(username)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        let Some(user) = user else {
            info!("Login rejected");
            return Err(DomainError::InvalidCredentials);
        };

        let matches = match self.hasher.verify(password, &user.password_hash) {
            Ok(matches) => matches,
            Err(e) => {
                warn!(user_id = user.id, error = %e, "Stored password hash is unusable");
                false
            }
        };
        if !matches {
            info!("Login rejected");
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.sessions.create(user.id);
        info!(user_id = user.id, "User logged in");
        Ok(token)
    }

    /// Close a session. Unknown tokens are ignored.
    #[instrument(name = "staff_directory.auth.logout", skip_all)]
    pub fn logout(&self, token: &str) {
        if self.sessions.remove(token) {
            info!("User logged out");
        }
    }

    /// Resolve a session token to its user id.
    pub fn resolve(&self, token: &str) -> Option<i32> {
        self.sessions.resolve(token)
    }

    /// Create a credential record. Used by the `create-user` command.
    #[instrument(name = "staff_directory.auth.create_user", skip(self, password))]
    pub async fn create_user(&self, username: &str, password: &str) -> Result<User, DomainError> {
        // Same rules as login, so every created account can sign in.
        validate_login(username, password)?;

        if self
            .users
            .username_exists(username)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        {
            return Err(DomainError::username_taken(username));
        }

        let hash = self.hasher.hash(password)?;
        let user = self
            .users
            .insert(username, &hash)
            .await
            .map_err(|e| match e.downcast_ref::<sea_orm::DbErr>() {
                Some(db_err) if db::is_unique_violation(db_err) => {
                    DomainError::username_taken(username)
                }
                _ => DomainError::database(e.to_string()),
            })?;

        info!(user_id = user.id, "Created user");
        Ok(user)
    }
}
