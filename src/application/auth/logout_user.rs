use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::SessionToken;

/// Use case for destroying the caller's session
pub struct LogoutUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LogoutUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Removes the session behind `token`. A malformed or unknown token is
  /// ignored; logout always succeeds from the caller's point of view.
  pub async fn execute(&self, token: &str) -> Result<(), AuthError> {
    match SessionToken::from_string(token) {
      Ok(token) => self.auth_service.logout(&token).await,
      Err(_) => Ok(()),
    }
  }
}
