//! Authentication use cases

mod login_user;
mod login_with_google;
mod logout_user;
mod register_user;

pub use login_user::{LoginUserCommand, LoginUserUseCase};
pub use login_with_google::LoginWithGoogleUseCase;
pub use logout_user::LogoutUserUseCase;
pub use register_user::{RegisterUserCommand, RegisterUserUseCase};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Response shared by every use case that establishes a session
#[derive(Debug, Clone)]
pub struct AuthenticatedResponse {
  /// Unique identifier of the user
  pub user_id: Uuid,
  /// User's email address
  pub email: String,
  /// Opaque token to place in the session cookie
  pub session_token: String,
  /// Session expiration timestamp
  pub expires_at: DateTime<Utc>,
}
