use actix_web::web;
use std::sync::Arc;

use crate::application::auth::{
  LoginUserUseCase, LoginWithGoogleUseCase, LogoutUserUseCase, RegisterUserUseCase,
};
use crate::application::catalog::{
  GetDogDetailsUseCase, GetHomepageUseCase, ListDogsUseCase, SearchDogsUseCase,
};

use super::handlers::{auth, catalog, oauth, pages};
use super::middleware::RequireAuth;
use super::templates::TemplateEngine;

/// Everything the web routes need, constructed at startup and injected
/// explicitly
pub struct WebRouteDependencies {
  pub templates: TemplateEngine,
  pub get_homepage: Arc<GetHomepageUseCase>,
  pub list_dogs: Arc<ListDogsUseCase>,
  pub get_dog_details: Arc<GetDogDetailsUseCase>,
  pub search_dogs: Arc<SearchDogsUseCase>,
  pub register_user: Arc<RegisterUserUseCase>,
  pub login_user: Arc<LoginUserUseCase>,
  pub logout_user: Arc<LogoutUserUseCase>,
  /// None when Google OAuth is not configured; the routes are not mounted
  pub login_with_google: Option<Arc<LoginWithGoogleUseCase>>,
}

/// Configure the storefront routes
///
/// # Routes
///
/// - GET  /            - Homepage with top sellers and testimonials
/// - GET  /login       - Login page
/// - POST /login       - Login form submission
/// - GET  /register    - Registration page
/// - POST /register    - Registration form submission
/// - GET  /logout      - Destroy the session, clear the cookie
/// - GET  /dogs        - Full product listing
/// - GET  /dogs/{id}   - Product detail page (404 for unknown ids)
/// - POST /search      - Breed search, renders the listing page
/// - GET  /checkout    - Placeholder page, requires a signed-in user
/// - GET  /auth/google              - Start the Google sign-in flow
/// - GET  /auth/google/furryfriends - Google OAuth callback
/// - GET  /health      - Liveness probe
pub fn configure_web_routes(cfg: &mut web::ServiceConfig, deps: WebRouteDependencies) {
  cfg
    .app_data(web::Data::new(deps.templates))
    .app_data(web::Data::new(deps.get_homepage))
    .app_data(web::Data::new(deps.list_dogs))
    .app_data(web::Data::new(deps.get_dog_details))
    .app_data(web::Data::new(deps.search_dogs))
    .app_data(web::Data::new(deps.register_user))
    .app_data(web::Data::new(deps.login_user))
    .app_data(web::Data::new(deps.logout_user));

  cfg
    .route("/", web::get().to(pages::home_page))
    .route("/login", web::get().to(pages::login_page))
    .route("/login", web::post().to(auth::login_submit))
    .route("/register", web::get().to(pages::register_page))
    .route("/register", web::post().to(auth::register_submit))
    .route("/logout", web::get().to(auth::logout))
    .route("/dogs", web::get().to(catalog::products_page))
    .route("/dogs/{id}", web::get().to(catalog::dog_detail_page))
    .route("/search", web::post().to(catalog::search_submit))
    .route("/health", web::get().to(pages::health));

  cfg.service(
    web::scope("/checkout")
      .wrap(RequireAuth::new())
      .route("", web::get().to(pages::checkout_page)),
  );

  if let Some(login_with_google) = deps.login_with_google {
    cfg.service(
      web::scope("/auth")
        .app_data(web::Data::new(login_with_google))
        .route("/google", web::get().to(oauth::google_start))
        .route("/google/furryfriends", web::get().to(oauth::google_callback)),
    );
  }
}
