use chrono::Duration;
use std::sync::Arc;

use super::entities::{FederatedProfile, Session, User};
use super::errors::{AuthError, RepositoryError};
use super::ports::{PasswordHasher, SessionStore, UserRepository};
use super::value_objects::{Email, Password, PasswordHash, SessionToken};

/// Default session lifetime when no TTL is configured
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 7;

/// Authentication service implementing the register/login/session flow
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  session_store: Arc<dyn SessionStore>,
  password_hasher: Arc<dyn PasswordHasher>,
  /// Session lifetime. Expiry is absolute, not sliding.
  session_ttl: Duration,
}

impl AuthService {
  /// Creates a new instance of AuthService
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    session_store: Arc<dyn SessionStore>,
    password_hasher: Arc<dyn PasswordHasher>,
    session_ttl_days: i64,
  ) -> Self {
    Self {
      user_repo,
      session_store,
      password_hasher,
      session_ttl: Duration::days(session_ttl_days),
    }
  }

  /// Registers a new user with email and password, and opens a session
  ///
  /// # Errors
  /// Returns `AuthError::EmailAlreadyExists` if the email is already
  /// registered, whether caught by the lookup or by the unique index when
  /// two registrations race.
  pub async fn register(
    &self,
    email: Email,
    password: Password,
    first_name: String,
    last_name: String,
  ) -> Result<(User, Session, SessionToken), AuthError> {
    if self.user_repo.find_by_email(&email).await?.is_some() {
      return Err(AuthError::EmailAlreadyExists);
    }

    let password_hash = self.password_hasher.hash(&password).await?;

    let user = User::new_local(
      email.into_inner(),
      password_hash.into_inner(),
      first_name,
      last_name,
    );

    let created = match self.user_repo.create(user).await {
      Ok(user) => user,
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => {
        return Err(AuthError::EmailAlreadyExists);
      }
      Err(e) => return Err(e),
    };

    let (session, token) = self.open_session(&created).await?;
    Ok((created, session, token))
  }

  /// Authenticates a user with email and password, and opens a session
  ///
  /// An unknown email, a federated-only account, and a wrong password all
  /// fail the same way, so nothing is leaked about which one occurred.
  /// Database failures surface as `Repository` errors, distinct from a
  /// credential mismatch.
  pub async fn login(
    &self,
    email: Email,
    password: Password,
  ) -> Result<(User, Session, SessionToken), AuthError> {
    let user = self
      .user_repo
      .find_by_email(&email)
      .await?
      .ok_or(AuthError::InvalidCredentials)?;

    // The sentinel is not a parseable hash; reject before the verifier
    if user.is_federated() {
      return Err(AuthError::InvalidCredentials);
    }

    let stored = PasswordHash::from_hash(&user.password_hash)?;
    let is_valid = self.password_hasher.verify(&password, &stored).await?;

    if !is_valid {
      return Err(AuthError::InvalidCredentials);
    }

    let (session, token) = self.open_session(&user).await?;
    Ok((user, session, token))
  }

  /// Signs in a user from a federated identity profile, inserting the user
  /// on first login
  ///
  /// A returning user's record is returned unchanged: the profile is not
  /// re-synced on repeat logins.
  pub async fn login_federated(
    &self,
    profile: FederatedProfile,
  ) -> Result<(User, Session, SessionToken), AuthError> {
    let email = Email::new(&profile.email)?;

    let user = match self.user_repo.find_by_email(&email).await? {
      Some(existing) => existing,
      None => match self.user_repo.create(User::new_federated(&profile)).await {
        Ok(created) => created,
        Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => {
          // Lost a concurrent first-login race; the other insert won
          self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?
        }
        Err(e) => return Err(e),
      },
    };

    let (session, token) = self.open_session(&user).await?;
    Ok((user, session, token))
  }

  /// Resolves the user behind a session token, re-fetching the record from
  /// the credential store on every call
  ///
  /// # Errors
  /// Returns `AuthError::InvalidSession` if the session is unknown or
  /// expired; expired entries are dropped from the store.
  pub async fn current_user(&self, token: &SessionToken) -> Result<User, AuthError> {
    let token_hash = token.hash();

    let session = self
      .session_store
      .find_by_token_hash(&token_hash)
      .await?
      .ok_or(AuthError::InvalidSession)?;

    if session.is_expired() {
      self.session_store.remove(&token_hash).await?;
      return Err(AuthError::InvalidSession);
    }

    self
      .user_repo
      .find_by_id(session.user_id)
      .await?
      .ok_or(AuthError::UserNotFound)
  }

  /// Destroys the session behind a token. Unknown tokens are ignored so
  /// logout stays idempotent.
  pub async fn logout(&self, token: &SessionToken) -> Result<(), AuthError> {
    self.session_store.remove(&token.hash()).await
  }

  async fn open_session(&self, user: &User) -> Result<(Session, SessionToken), AuthError> {
    let token = SessionToken::generate();
    let session = Session::with_duration(user.id, token.hash(), self.session_ttl);

    self.session_store.insert(session.clone()).await?;

    tracing::debug!(user_id = %user.id, "session opened");
    Ok((session, token))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::entities::{DEFAULT_PHOTO_PATH, FEDERATED_PASSWORD_SENTINEL};
  use crate::infrastructure::persistence::memory::InMemorySessionStore;
  use crate::infrastructure::security::Argon2PasswordHasher;
  use async_trait::async_trait;
  use std::sync::Mutex;
  use uuid::Uuid;

  /// Test double backed by a Vec, mimicking the unique-email index
  #[derive(Default)]
  struct InMemoryUsers {
    users: Mutex<Vec<User>>,
  }

  #[async_trait]
  impl UserRepository for InMemoryUsers {
    async fn create(&self, user: User) -> Result<User, AuthError> {
      let mut users = self.users.lock().unwrap();
      if users.iter().any(|u| u.email == user.email) {
        return Err(AuthError::Repository(RepositoryError::DuplicateKey(
          user.email.clone(),
        )));
      }
      users.push(user.clone());
      Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
      Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
      Ok(
        self
          .users
          .lock()
          .unwrap()
          .iter()
          .find(|u| u.email == email.as_str())
          .cloned(),
      )
    }
  }

  fn service() -> (AuthService, Arc<InMemoryUsers>, Arc<InMemorySessionStore>) {
    service_with_ttl(DEFAULT_SESSION_TTL_DAYS)
  }

  fn service_with_ttl(
    ttl_days: i64,
  ) -> (AuthService, Arc<InMemoryUsers>, Arc<InMemorySessionStore>) {
    let users = Arc::new(InMemoryUsers::default());
    let sessions = Arc::new(InMemorySessionStore::new());
    let service = AuthService::new(
      users.clone(),
      sessions.clone(),
      Arc::new(Argon2PasswordHasher::new().unwrap()),
      ttl_days,
    );
    (service, users, sessions)
  }

  fn profile() -> FederatedProfile {
    FederatedProfile {
      email: "fed@example.com".to_string(),
      given_name: "Fed".to_string(),
      family_name: "Erated".to_string(),
      picture: "https://lh3.googleusercontent.com/photo.jpg".to_string(),
    }
  }

  #[tokio::test]
  async fn test_register_then_login_succeeds() {
    let (service, _, _) = service();

    let (user, session, _) = service
      .register(
        Email::new("new@example.com").unwrap(),
        Password::new("correct horse").unwrap(),
        "New".to_string(),
        "User".to_string(),
      )
      .await
      .unwrap();

    assert_eq!(user.photo_path, DEFAULT_PHOTO_PATH);
    assert!(session.is_valid());

    let (logged_in, _, token) = service
      .login(
        Email::new("new@example.com").unwrap(),
        Password::new("correct horse").unwrap(),
      )
      .await
      .unwrap();

    assert_eq!(logged_in.id, user.id);
    assert_eq!(service.current_user(&token).await.unwrap().id, user.id);
  }

  #[tokio::test]
  async fn test_configured_ttl_sets_session_expiry() {
    let (service, _, _) = service_with_ttl(1);

    let (_, session, _) = service
      .register(
        Email::new("short@example.com").unwrap(),
        Password::new("some password").unwrap(),
        "Short".to_string(),
        "Lived".to_string(),
      )
      .await
      .unwrap();

    assert_eq!(session.expires_at - session.issued_at, Duration::days(1));
  }

  #[tokio::test]
  async fn test_duplicate_registration_rejected() {
    let (service, users, _) = service();

    let email = || Email::new("dup@example.com").unwrap();
    let password = || Password::new("some password").unwrap();

    service
      .register(email(), password(), "First".to_string(), "In".to_string())
      .await
      .unwrap();

    let result = service
      .register(email(), password(), "Second".to_string(), "In".to_string())
      .await;

    assert!(matches!(result, Err(AuthError::EmailAlreadyExists)));
    assert_eq!(users.users.lock().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn test_wrong_password_fails() {
    let (service, _, _) = service();

    service
      .register(
        Email::new("user@example.com").unwrap(),
        Password::new("right password").unwrap(),
        "A".to_string(),
        "B".to_string(),
      )
      .await
      .unwrap();

    let result = service
      .login(
        Email::new("user@example.com").unwrap(),
        Password::new("wrong password").unwrap(),
      )
      .await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
  }

  #[tokio::test]
  async fn test_unknown_email_fails_without_leaking() {
    let (service, _, _) = service();

    let result = service
      .login(
        Email::new("ghost@example.com").unwrap(),
        Password::new("whatever pw").unwrap(),
      )
      .await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
  }

  #[tokio::test]
  async fn test_federated_first_login_creates_single_user() {
    let (service, users, _) = service();

    let (user, _, token) = service.login_federated(profile()).await.unwrap();

    assert_eq!(user.password_hash, FEDERATED_PASSWORD_SENTINEL);
    assert_eq!(user.photo_path, "https://lh3.googleusercontent.com/photo.jpg");
    assert_eq!(users.users.lock().unwrap().len(), 1);
    assert_eq!(service.current_user(&token).await.unwrap().id, user.id);
  }

  #[tokio::test]
  async fn test_federated_repeat_login_returns_original_record() {
    let (service, users, _) = service();

    let (first, _, _) = service.login_federated(profile()).await.unwrap();

    // Same email, different picture; the stored record must win
    let mut changed = profile();
    changed.picture = "https://lh3.googleusercontent.com/other.jpg".to_string();
    let (second, _, _) = service.login_federated(changed).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.photo_path, "https://lh3.googleusercontent.com/photo.jpg");
    assert_eq!(users.users.lock().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn test_federated_account_rejects_local_login() {
    let (service, _, _) = service();

    service.login_federated(profile()).await.unwrap();

    let result = service
      .login(
        Email::new("fed@example.com").unwrap(),
        Password::new("any password").unwrap(),
      )
      .await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
  }

  #[tokio::test]
  async fn test_logout_invalidates_session() {
    let (service, _, _) = service();

    let (_, _, token) = service
      .register(
        Email::new("out@example.com").unwrap(),
        Password::new("some password").unwrap(),
        "Log".to_string(),
        "Out".to_string(),
      )
      .await
      .unwrap();

    assert!(service.current_user(&token).await.is_ok());

    service.logout(&token).await.unwrap();

    assert!(matches!(
      service.current_user(&token).await,
      Err(AuthError::InvalidSession)
    ));

    // Idempotent
    assert!(service.logout(&token).await.is_ok());
  }

  #[tokio::test]
  async fn test_expired_session_rejected_and_dropped() {
    let (service, users, sessions) = service();

    let user = users
      .create(User::new_local(
        "stale@example.com".to_string(),
        "$argon2id$fake".to_string(),
        "Stale".to_string(),
        "Session".to_string(),
      ))
      .await
      .unwrap();

    let token = SessionToken::generate();
    let session = Session {
      user_id: user.id,
      token_hash: token.hash(),
      issued_at: chrono::Utc::now() - Duration::days(8),
      expires_at: chrono::Utc::now() - Duration::days(1),
    };
    sessions.insert(session).await.unwrap();

    assert!(matches!(
      service.current_user(&token).await,
      Err(AuthError::InvalidSession)
    ));

    // The expired entry was removed
    assert!(
      sessions
        .find_by_token_hash(&token.hash())
        .await
        .unwrap()
        .is_none()
    );
  }
}
