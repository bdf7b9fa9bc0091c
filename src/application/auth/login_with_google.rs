use std::sync::Arc;

use super::AuthenticatedResponse;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::IdentityProvider;
use crate::domain::auth::services::AuthService;

/// Use case for the Google OAuth callback: exchanges the authorization code
/// for a profile, then signs the user in (inserting on first login)
pub struct LoginWithGoogleUseCase {
  identity_provider: Arc<dyn IdentityProvider>,
  auth_service: Arc<AuthService>,
}

impl LoginWithGoogleUseCase {
  pub fn new(identity_provider: Arc<dyn IdentityProvider>, auth_service: Arc<AuthService>) -> Self {
    Self {
      identity_provider,
      auth_service,
    }
  }

  /// Builds the consent-screen URL. Returns (auth_url, csrf_state).
  pub fn authorization_url(&self) -> (String, String) {
    self.identity_provider.authorization_url()
  }

  /// # Errors
  /// Returns `AuthError::Federation` when the code exchange or profile
  /// fetch fails.
  pub async fn execute(&self, code: String) -> Result<AuthenticatedResponse, AuthError> {
    let profile = self.identity_provider.fetch_profile(code).await?;

    let (user, session, token) = self.auth_service.login_federated(profile).await?;

    tracing::info!(user_id = %user.id, "federated login succeeded");

    Ok(AuthenticatedResponse {
      user_id: user.id,
      email: user.email,
      session_token: token.into_inner(),
      expires_at: session.expires_at,
    })
  }
}
