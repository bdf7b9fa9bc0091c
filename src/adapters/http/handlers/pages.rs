use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::adapters::http::errors::PageError;
use crate::adapters::http::handlers::base_context;
use crate::adapters::http::templates::TemplateEngine;
use crate::application::catalog::GetHomepageUseCase;

/// Render the homepage: top sellers plus testimonials
pub async fn home_page(
  use_case: web::Data<Arc<GetHomepageUseCase>>,
  templates: web::Data<TemplateEngine>,
  req: HttpRequest,
) -> Result<HttpResponse, PageError> {
  let homepage = use_case.execute().await?;

  let mut context = base_context("FurryFriends", &req);
  context.insert("top_sellers", &homepage.top_sellers);
  context.insert("testimonials", &homepage.testimonials);

  let html = templates.render("pages/index.html.tera", &context)?;
  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Render the login page
pub async fn login_page(
  templates: web::Data<TemplateEngine>,
  req: HttpRequest,
) -> Result<HttpResponse, PageError> {
  let context = base_context("Login", &req);

  let html = templates.render("pages/login.html.tera", &context)?;
  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Render the registration page
pub async fn register_page(
  templates: web::Data<TemplateEngine>,
  req: HttpRequest,
) -> Result<HttpResponse, PageError> {
  let context = base_context("Register", &req);

  let html = templates.render("pages/register.html.tera", &context)?;
  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Render the checkout placeholder. The route is guarded by `RequireAuth`,
/// so an anonymous request never reaches this handler.
pub async fn checkout_page(
  templates: web::Data<TemplateEngine>,
  req: HttpRequest,
) -> Result<HttpResponse, PageError> {
  let context = base_context("Checkout", &req);

  let html = templates.render("pages/checkout.html.tera", &context)?;
  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Liveness probe
pub async fn health() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
