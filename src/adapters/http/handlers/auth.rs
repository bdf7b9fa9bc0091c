use actix_web::{
  HttpRequest, HttpResponse,
  cookie::{Cookie, SameSite, time::Duration as CookieDuration},
  web,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::adapters::http::errors::PageError;
use crate::adapters::http::middleware::identity::SESSION_COOKIE;
use crate::application::auth::{
  AuthenticatedResponse, LoginUserCommand, LoginUserUseCase, LogoutUserUseCase,
  RegisterUserCommand, RegisterUserUseCase,
};
use crate::domain::auth::errors::AuthError;

#[derive(Deserialize)]
pub struct LoginFormData {
  email: String,
  password: String,
}

#[derive(Deserialize)]
pub struct RegisterFormData {
  email: String,
  password: String,
  first_name: String,
  last_name: String,
}

/// Session cookie scoped to the whole site. Not `Secure`: the storefront
/// also serves plain HTTP in development.
pub(crate) fn session_cookie(response: &AuthenticatedResponse) -> Cookie<'static> {
  let remaining = response.expires_at - chrono::Utc::now();

  Cookie::build(SESSION_COOKIE, response.session_token.clone())
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .max_age(CookieDuration::seconds(remaining.num_seconds().max(0)))
    .finish()
}

fn expired_session_cookie() -> Cookie<'static> {
  Cookie::build(SESSION_COOKIE, "")
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .max_age(CookieDuration::seconds(0))
    .finish()
}

fn redirect_to(location: &str) -> HttpResponse {
  HttpResponse::Found()
    .insert_header(("Location", location.to_string()))
    .finish()
}

/// Handle login form submission. A credential mismatch sends the browser
/// back to the login page; only infrastructure failures surface as errors.
pub async fn login_submit(
  form: web::Form<LoginFormData>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
) -> Result<HttpResponse, PageError> {
  let form = form.into_inner();
  let command = LoginUserCommand {
    email: form.email,
    password: form.password,
  };

  match use_case.execute(command).await {
    Ok(response) => Ok(
      HttpResponse::Found()
        .cookie(session_cookie(&response))
        .insert_header(("Location", "/"))
        .finish(),
    ),
    Err(AuthError::InvalidCredentials) | Err(AuthError::Validation(_)) => {
      Ok(redirect_to("/login"))
    }
    Err(e) => Err(e.into()),
  }
}

/// Handle registration form submission. An already-taken email lands on
/// the login page, since that account can simply sign in.
pub async fn register_submit(
  form: web::Form<RegisterFormData>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
) -> Result<HttpResponse, PageError> {
  let form = form.into_inner();
  let command = RegisterUserCommand {
    email: form.email,
    password: form.password,
    first_name: form.first_name,
    last_name: form.last_name,
  };

  match use_case.execute(command).await {
    Ok(response) => Ok(
      HttpResponse::Found()
        .cookie(session_cookie(&response))
        .insert_header(("Location", "/"))
        .finish(),
    ),
    Err(AuthError::EmailAlreadyExists) => Ok(redirect_to("/login")),
    Err(AuthError::Validation(_)) => Ok(redirect_to("/register")),
    Err(e) => Err(e.into()),
  }
}

/// Handle logout: drop the server-side session and clear the cookie.
/// Always lands on the homepage, signed in or not.
pub async fn logout(
  use_case: web::Data<Arc<LogoutUserUseCase>>,
  req: HttpRequest,
) -> Result<HttpResponse, PageError> {
  if let Some(cookie) = req.cookie(SESSION_COOKIE) {
    use_case.execute(cookie.value()).await?;
  }

  Ok(
    HttpResponse::Found()
      .cookie(expired_session_cookie())
      .insert_header(("Location", "/"))
      .finish(),
  )
}
