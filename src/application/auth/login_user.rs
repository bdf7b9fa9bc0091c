use std::sync::Arc;

use super::AuthenticatedResponse;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password};

/// Command for logging in a user with local credentials
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
  pub email: String,
  pub password: String,
}

/// Use case for local email/password login
pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// # Errors
  /// Returns `AuthError::InvalidCredentials` for any credential mismatch;
  /// repository failures propagate separately.
  pub async fn execute(&self, command: LoginUserCommand) -> Result<AuthenticatedResponse, AuthError> {
    let email = Email::new(command.email)?;
    let password = Password::new(command.password)?;

    let (user, session, token) = self.auth_service.login(email, password).await?;

    tracing::info!(user_id = %user.id, "local login succeeded");

    Ok(AuthenticatedResponse {
      user_id: user.id,
      email: user.email,
      session_token: token.into_inner(),
      expires_at: session.expires_at,
    })
  }
}
