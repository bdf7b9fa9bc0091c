use std::sync::Arc;

use super::AuthenticatedResponse;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password};

/// Command for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
  pub email: String,
  /// Plain text; hashed inside the domain service
  pub password: String,
  pub first_name: String,
  pub last_name: String,
}

/// Use case for registering a user and opening their first session
pub struct RegisterUserUseCase {
  auth_service: Arc<AuthService>,
}

impl RegisterUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// # Errors
  /// Returns `AuthError::EmailAlreadyExists` when the email is taken, and
  /// validation errors for malformed input.
  pub async fn execute(
    &self,
    command: RegisterUserCommand,
  ) -> Result<AuthenticatedResponse, AuthError> {
    let email = Email::new(command.email)?;
    let password = Password::new(command.password)?;

    let (user, session, token) = self
      .auth_service
      .register(email, password, command.first_name, command.last_name)
      .await?;

    Ok(AuthenticatedResponse {
      user_id: user.id,
      email: user.email,
      session_token: token.into_inner(),
      expires_at: session.expires_at,
    })
  }
}
