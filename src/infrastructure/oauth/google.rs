use async_trait::async_trait;
use oauth2::reqwest::async_http_client;
use oauth2::{
  AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, RedirectUrl, Scope,
  TokenResponse, TokenUrl, basic::BasicClient,
};
use serde::Deserialize;

use crate::domain::auth::entities::{DEFAULT_PHOTO_PATH, FederatedProfile};
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::IdentityProvider;
use crate::domain::auth::value_objects::Email;
use crate::infrastructure::config::GoogleConfig;

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

/// Google OAuth 2.0 identity provider
///
/// Runs the authorization-code flow against Google and resolves the
/// resulting access token into a profile via the userinfo endpoint.
/// Only identity scopes are requested; no offline access, no refresh
/// tokens.
pub struct GoogleIdentityProvider {
  client: BasicClient,
  http: reqwest::Client,
}

/// Claims returned by the userinfo v3 endpoint. Google omits name
/// fields for accounts without a public profile.
#[derive(Debug, Deserialize)]
struct UserInfoClaims {
  email: String,
  given_name: Option<String>,
  family_name: Option<String>,
  picture: Option<String>,
}

impl GoogleIdentityProvider {
  /// Create a new identity provider
  ///
  /// # Arguments
  /// * `config` - OAuth client credentials from Google Cloud Console;
  ///   the redirect URL must match the console settings
  pub fn new(config: &GoogleConfig) -> Result<Self, AuthError> {
    let client = BasicClient::new(
      ClientId::new(config.client_id.clone()),
      Some(ClientSecret::new(config.client_secret.clone())),
      AuthUrl::new(AUTH_URL.to_string())
        .map_err(|e| AuthError::Federation(format!("Invalid auth URL: {}", e)))?,
      Some(
        TokenUrl::new(TOKEN_URL.to_string())
          .map_err(|e| AuthError::Federation(format!("Invalid token URL: {}", e)))?,
      ),
    )
    .set_redirect_uri(
      RedirectUrl::new(config.redirect_url.clone())
        .map_err(|e| AuthError::Federation(format!("Invalid redirect URL: {}", e)))?,
    );

    Ok(Self {
      client,
      http: reqwest::Client::new(),
    })
  }

  async fn exchange_code(&self, code: String) -> Result<String, AuthError> {
    let token_response = self
      .client
      .exchange_code(AuthorizationCode::new(code))
      .request_async(async_http_client)
      .await
      .map_err(|e| AuthError::Federation(format!("Token exchange failed: {}", e)))?;

    Ok(token_response.access_token().secret().clone())
  }

  async fn fetch_userinfo(&self, access_token: &str) -> Result<UserInfoClaims, AuthError> {
    let response = self
      .http
      .get(USERINFO_URL)
      .bearer_auth(access_token)
      .send()
      .await
      .map_err(|e| AuthError::Federation(format!("Userinfo request failed: {}", e)))?;

    if !response.status().is_success() {
      return Err(AuthError::Federation(format!(
        "Userinfo request failed with status {}",
        response.status()
      )));
    }

    response
      .json::<UserInfoClaims>()
      .await
      .map_err(|e| AuthError::Federation(format!("Failed to parse userinfo response: {}", e)))
  }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
  /// Generate the consent-screen URL for the browser redirect
  ///
  /// Returns (authorization_url, csrf_state_token). The state token
  /// must be echoed back on the callback and checked by the caller.
  fn authorization_url(&self) -> (String, String) {
    let (auth_url, csrf_token) = self
      .client
      .authorize_url(CsrfToken::new_random)
      .add_scope(Scope::new("profile".to_string()))
      .add_scope(Scope::new("email".to_string()))
      .url();

    (auth_url.to_string(), csrf_token.secret().clone())
  }

  /// Exchange the callback code for tokens, then resolve the profile
  async fn fetch_profile(&self, code: String) -> Result<FederatedProfile, AuthError> {
    let access_token = self.exchange_code(code).await?;
    let claims = self.fetch_userinfo(&access_token).await?;

    let email = Email::new(claims.email)
      .map_err(|e| AuthError::Federation(format!("Provider returned invalid email: {}", e)))?;

    Ok(FederatedProfile {
      email: email.into_inner(),
      given_name: claims.given_name.unwrap_or_default(),
      family_name: claims.family_name.unwrap_or_default(),
      picture: claims.picture.unwrap_or_else(|| DEFAULT_PHOTO_PATH.to_string()),
    })
  }
}
