use actix_web::{
  Error, HttpMessage,
  body::MessageBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::SessionToken;

/// Cookie carrying the opaque session token
pub const SESSION_COOKIE: &str = "session_token";

/// Identity middleware using cookie-based sessions
///
/// Resolves the session cookie into a `User` and attaches it to request
/// extensions. Runs on every route and never blocks: an absent, malformed,
/// or expired token simply leaves the request anonymous. Route protection
/// is a separate concern (see `RequireAuth`).
pub struct IdentityMiddleware {
  auth_service: Arc<AuthService>,
}

impl IdentityMiddleware {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }
}

impl<S, B> Transform<S, ServiceRequest> for IdentityMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type InitError = ();
  type Transform = IdentityMiddlewareService<S>;
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(IdentityMiddlewareService {
      service: Rc::new(service),
      auth_service: self.auth_service.clone(),
    }))
  }
}

pub struct IdentityMiddlewareService<S> {
  service: Rc<S>,
  auth_service: Arc<AuthService>,
}

impl<S, B> Service<ServiceRequest> for IdentityMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());

    let auth_service = self.auth_service.clone();
    let service = Rc::clone(&self.service);

    Box::pin(async move {
      if let Some(token_str) = token {
        if let Ok(session_token) = SessionToken::from_string(token_str) {
          // The user record is re-fetched on every request; the session
          // only holds the user id
          match auth_service.current_user(&session_token).await {
            Ok(user) => {
              req.extensions_mut().insert(user);
            }
            Err(e) => {
              tracing::debug!("session cookie did not resolve to a user: {}", e);
            }
          }
        }
      }

      service.call(req).await
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::{
    App, HttpRequest, HttpResponse,
    cookie::Cookie,
    http::StatusCode,
    test::{self, TestRequest},
    web,
  };
  use async_trait::async_trait;
  use chrono::{Duration, Utc};
  use uuid::Uuid;

  use crate::adapters::http::handlers::base_context;
  use crate::domain::auth::entities::{DEFAULT_PHOTO_PATH, Session, User};
  use crate::domain::auth::errors::AuthError;
  use crate::domain::auth::ports::{SessionStore, UserRepository};
  use crate::domain::auth::value_objects::Email;
  use crate::infrastructure::persistence::memory::InMemorySessionStore;
  use crate::infrastructure::security::Argon2PasswordHasher;

  /// Test double holding exactly one account
  struct SingleUser {
    user: User,
  }

  #[async_trait]
  impl UserRepository for SingleUser {
    async fn create(&self, user: User) -> Result<User, AuthError> {
      Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
      Ok((self.user.id == id).then(|| self.user.clone()))
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
      Ok((self.user.email == email.as_str()).then(|| self.user.clone()))
    }
  }

  fn fake_user() -> User {
    User::new_local(
      "buyer@example.com".to_string(),
      "$argon2id$fake".to_string(),
      "Test".to_string(),
      "Buyer".to_string(),
    )
  }

  fn auth_service(user: User, sessions: Arc<InMemorySessionStore>) -> Arc<AuthService> {
    Arc::new(AuthService::new(
      Arc::new(SingleUser { user }),
      sessions,
      Arc::new(Argon2PasswordHasher::new().unwrap()),
      7,
    ))
  }

  // Renders what the navbar would see: the signed-in user's photo, or a
  // marker for an anonymous request
  async fn whoami(req: HttpRequest) -> HttpResponse {
    let context = base_context("Home", &req);
    match context.get("user") {
      Some(user) => {
        HttpResponse::Ok().body(user["photo_path"].as_str().unwrap_or_default().to_string())
      }
      None => HttpResponse::Ok().body("anonymous"),
    }
  }

  #[actix_web::test]
  async fn test_valid_session_cookie_attaches_user() {
    let user = fake_user();
    let sessions = Arc::new(InMemorySessionStore::new());

    let token = SessionToken::generate();
    sessions
      .insert(Session::with_duration(user.id, token.hash(), Duration::days(7)))
      .await
      .unwrap();

    let app = test::init_service(
      App::new()
        .wrap(IdentityMiddleware::new(auth_service(user, sessions)))
        .route("/", web::get().to(whoami)),
    )
    .await;

    let req = TestRequest::get()
      .uri("/")
      .cookie(Cookie::new(SESSION_COOKIE, token.as_str()))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, DEFAULT_PHOTO_PATH);
  }

  #[actix_web::test]
  async fn test_malformed_cookie_stays_anonymous() {
    let sessions = Arc::new(InMemorySessionStore::new());

    let app = test::init_service(
      App::new()
        .wrap(IdentityMiddleware::new(auth_service(fake_user(), sessions)))
        .route("/", web::get().to(whoami)),
    )
    .await;

    let req = TestRequest::get()
      .uri("/")
      .cookie(Cookie::new(SESSION_COOKIE, "definitely-not-a-token"))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, "anonymous");
  }

  #[actix_web::test]
  async fn test_expired_session_cookie_stays_anonymous() {
    let user = fake_user();
    let sessions = Arc::new(InMemorySessionStore::new());

    let token = SessionToken::generate();
    sessions
      .insert(Session {
        user_id: user.id,
        token_hash: token.hash(),
        issued_at: Utc::now() - Duration::days(8),
        expires_at: Utc::now() - Duration::days(1),
      })
      .await
      .unwrap();

    let app = test::init_service(
      App::new()
        .wrap(IdentityMiddleware::new(auth_service(user, sessions)))
        .route("/", web::get().to(whoami)),
    )
    .await;

    let req = TestRequest::get()
      .uri("/")
      .cookie(Cookie::new(SESSION_COOKIE, token.as_str()))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, "anonymous");
  }
}
