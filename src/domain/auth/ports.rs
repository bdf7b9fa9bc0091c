use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{FederatedProfile, Session, User};
use super::errors::AuthError;
use super::value_objects::{Email, Password, PasswordHash, TokenHash};

/// Repository trait for user persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Creates a new user in the repository
  async fn create(&self, user: User) -> Result<User, AuthError>;

  /// Finds a user by their unique identifier
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError>;

  /// Finds a user by their email address (exact match)
  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError>;
}

/// Store trait for session persistence. Sessions are process-local and do
/// not survive a restart.
#[async_trait]
pub trait SessionStore: Send + Sync {
  /// Inserts a new session, keyed by its token hash
  async fn insert(&self, session: Session) -> Result<(), AuthError>;

  /// Finds a session by the hash of the cookie token
  async fn find_by_token_hash(&self, token_hash: &TokenHash) -> Result<Option<Session>, AuthError>;

  /// Removes a session. Removing an absent session is not an error.
  async fn remove(&self, token_hash: &TokenHash) -> Result<(), AuthError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plain text password
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError>;

  /// Verifies a plain text password against a hashed password
  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError>;
}

/// External identity provider: turns an authorization code into a profile
#[async_trait]
pub trait IdentityProvider: Send + Sync {
  /// Builds the consent-screen URL. Returns (auth_url, csrf_state).
  fn authorization_url(&self) -> (String, String);

  /// Exchanges an authorization code for the user's profile
  async fn fetch_profile(&self, code: String) -> Result<FederatedProfile, AuthError>;
}
