use actix_web::{
  HttpRequest, HttpResponse,
  cookie::{Cookie, SameSite, time::Duration as CookieDuration},
  web,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::adapters::http::errors::PageError;
use crate::adapters::http::handlers::auth::session_cookie;
use crate::application::auth::LoginWithGoogleUseCase;

/// Short-lived cookie holding the CSRF state between redirect and callback
const OAUTH_STATE_COOKIE: &str = "oauth_state";
const OAUTH_STATE_TTL_SECONDS: i64 = 600;

#[derive(Deserialize)]
pub struct CallbackQuery {
  code: Option<String>,
  state: Option<String>,
  error: Option<String>,
}

/// Start the Google sign-in flow: stash the CSRF state in a cookie and
/// bounce the browser to the consent screen
pub async fn google_start(
  use_case: web::Data<Arc<LoginWithGoogleUseCase>>,
) -> Result<HttpResponse, PageError> {
  let (auth_url, csrf_state) = use_case.authorization_url();

  let state_cookie = Cookie::build(OAUTH_STATE_COOKIE, csrf_state)
    .path("/auth")
    .http_only(true)
    .same_site(SameSite::Lax)
    .max_age(CookieDuration::seconds(OAUTH_STATE_TTL_SECONDS))
    .finish();

  Ok(
    HttpResponse::Found()
      .cookie(state_cookie)
      .insert_header(("Location", auth_url))
      .finish(),
  )
}

/// Handle the Google callback: verify the CSRF state, exchange the code,
/// and open a session. A denied consent screen sends the user back to the
/// login page instead of an error.
pub async fn google_callback(
  query: web::Query<CallbackQuery>,
  use_case: web::Data<Arc<LoginWithGoogleUseCase>>,
  req: HttpRequest,
) -> Result<HttpResponse, PageError> {
  let query = query.into_inner();

  if let Some(error) = query.error {
    tracing::warn!("federated login declined by provider: {}", error);
    return Ok(
      HttpResponse::Found()
        .cookie(expired_state_cookie())
        .insert_header(("Location", "/login"))
        .finish(),
    );
  }

  let code = query
    .code
    .ok_or_else(|| PageError::BadRequest("Missing authorization code".to_string()))?;
  let state = query
    .state
    .ok_or_else(|| PageError::BadRequest("Missing state parameter".to_string()))?;

  let expected = req
    .cookie(OAUTH_STATE_COOKIE)
    .map(|c| c.value().to_string())
    .ok_or_else(|| PageError::BadRequest("Missing state cookie".to_string()))?;

  if state != expected {
    return Err(PageError::BadRequest("State mismatch".to_string()));
  }

  // A failed exchange or profile fetch sends the user back to the login
  // page rather than a bare error page
  match use_case.execute(code).await {
    Ok(response) => Ok(
      HttpResponse::Found()
        .cookie(session_cookie(&response))
        .cookie(expired_state_cookie())
        .insert_header(("Location", "/"))
        .finish(),
    ),
    Err(e) => {
      tracing::warn!("federated login failed: {}", e);
      Ok(
        HttpResponse::Found()
          .cookie(expired_state_cookie())
          .insert_header(("Location", "/login"))
          .finish(),
      )
    }
  }
}

fn expired_state_cookie() -> Cookie<'static> {
  Cookie::build(OAUTH_STATE_COOKIE, "")
    .path("/auth")
    .http_only(true)
    .same_site(SameSite::Lax)
    .max_age(CookieDuration::seconds(0))
    .finish()
}
