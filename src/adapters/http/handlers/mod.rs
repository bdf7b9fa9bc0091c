pub mod auth;
pub mod catalog;
pub mod oauth;
pub mod pages;

use actix_web::{HttpMessage, HttpRequest};

use crate::domain::auth::entities::User;

/// User attached to the request by the identity middleware, if any
pub fn current_user(req: &HttpRequest) -> Option<User> {
  req.extensions().get::<User>().cloned()
}

/// Base template context: page title plus the signed-in user for the navbar
pub fn base_context(title: &str, req: &HttpRequest) -> tera::Context {
  let mut context = tera::Context::new();
  context.insert("title", title);

  if let Some(user) = current_user(req) {
    context.insert(
      "user",
      &serde_json::json!({
        "first_name": user.first_name,
        "last_name": user.last_name,
        "email": user.email,
        "photo_path": user.photo_path,
      }),
    );
  }

  context
}
