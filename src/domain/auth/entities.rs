use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::TokenHash;

/// Sentinel stored in place of a password hash for accounts created through
/// a federated login. Such accounts can never authenticate locally.
pub const FEDERATED_PASSWORD_SENTINEL: &str = "google";

/// Profile photo used for locally registered accounts
pub const DEFAULT_PHOTO_PATH: &str = "/assets/images/defaultprofileimage.jpg";

/// User entity representing a storefront account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  /// Unique identifier for the user
  pub id: Uuid,
  /// User's email address (unique, stored as given)
  pub email: String,
  /// Argon2 hash for local accounts, or the federated sentinel
  pub password_hash: String,
  /// Path or URL of the profile photo
  pub photo_path: String,
  pub first_name: String,
  pub last_name: String,
  /// Timestamp when the user was created
  pub created_at: DateTime<Utc>,
}

impl User {
  /// Creates a locally registered user with a hashed password
  pub fn new_local(
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
  ) -> Self {
    Self {
      id: Uuid::new_v4(),
      email,
      password_hash,
      photo_path: DEFAULT_PHOTO_PATH.to_string(),
      first_name,
      last_name,
      created_at: Utc::now(),
    }
  }

  /// Creates a user from a federated identity profile. The password column
  /// holds the sentinel value, marking the account as not locally
  /// password-authenticatable.
  pub fn new_federated(profile: &FederatedProfile) -> Self {
    Self {
      id: Uuid::new_v4(),
      email: profile.email.clone(),
      password_hash: FEDERATED_PASSWORD_SENTINEL.to_string(),
      photo_path: profile.picture.clone(),
      first_name: profile.given_name.clone(),
      last_name: profile.family_name.clone(),
      created_at: Utc::now(),
    }
  }

  /// Creates a user from database fields (for reconstruction)
  pub fn from_db(
    id: Uuid,
    email: String,
    password_hash: String,
    photo_path: String,
    first_name: String,
    last_name: String,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      email,
      password_hash,
      photo_path,
      first_name,
      last_name,
      created_at,
    }
  }

  /// Whether this account was created through a federated login
  pub fn is_federated(&self) -> bool {
    self.password_hash == FEDERATED_PASSWORD_SENTINEL
  }
}

/// Profile returned by an external identity provider after a successful
/// authorization code exchange
#[derive(Debug, Clone, Deserialize)]
pub struct FederatedProfile {
  pub email: String,
  pub given_name: String,
  pub family_name: String,
  /// URL of the provider-hosted profile picture
  pub picture: String,
}

/// Minimal session identity: user id plus timestamps, keyed by the hash of
/// the cookie token. The full User is re-fetched from the store on each
/// request, so no profile data (and no password hash) ever lives in the
/// session store.
#[derive(Debug, Clone)]
pub struct Session {
  /// Reference to the user who owns this session
  pub user_id: Uuid,
  /// SHA-256 hash of the cookie token
  pub token_hash: TokenHash,
  /// Timestamp when the session was issued
  pub issued_at: DateTime<Utc>,
  /// Fixed expiry, not sliding
  pub expires_at: DateTime<Utc>,
}

impl Session {
  /// Creates a new session expiring after `duration`
  pub fn with_duration(user_id: Uuid, token_hash: TokenHash, duration: Duration) -> Self {
    let issued_at = Utc::now();
    Self {
      user_id,
      token_hash,
      issued_at,
      expires_at: issued_at + duration,
    }
  }

  /// Checks if the session has expired
  pub fn is_expired(&self) -> bool {
    self.expires_at <= Utc::now()
  }

  /// Checks if the session is still valid (not expired)
  pub fn is_valid(&self) -> bool {
    !self.is_expired()
  }
}
