use actix_files as fs;
use actix_web::{App, HttpServer, middleware::Logger};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use furryfriends::{
  adapters::http::{
    IdentityMiddleware, RequestIdMiddleware, TemplateEngine, WebRouteDependencies,
    configure_web_routes,
  },
  application::auth::{
    LoginUserUseCase, LoginWithGoogleUseCase, LogoutUserUseCase, RegisterUserUseCase,
  },
  application::catalog::{
    GetDogDetailsUseCase, GetHomepageUseCase, ListDogsUseCase, SearchDogsUseCase,
  },
  domain::auth::services::AuthService,
  domain::catalog::services::CatalogService,
  infrastructure::{
    config::Config,
    oauth::GoogleIdentityProvider,
    persistence::{
      memory::InMemorySessionStore,
      postgres::{PostgresCatalogRepository, PostgresUserRepository},
    },
    security::Argon2PasswordHasher,
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "furryfriends=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting FurryFriends storefront");

  // Load configuration
  let config = Config::load().expect("Failed to load configuration");
  tracing::info!("Configuration loaded successfully");

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database");

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "Could not connect to database. Is PostgreSQL running?".to_string(),
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Database connection pool created");

  // Run database migrations
  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .expect("Failed to run database migrations");
  tracing::info!("Database migrations completed");

  // Initialize repositories and the in-process session store. Sessions do
  // not survive a restart.
  let user_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));
  let catalog_repo = Arc::new(PostgresCatalogRepository::new(db_pool.clone()));
  let session_store = Arc::new(InMemorySessionStore::new());

  let password_hasher =
    Arc::new(Argon2PasswordHasher::new().expect("Failed to create password hasher"));

  // Drop expired sessions hourly so the map cannot grow unbounded; lookups
  // re-check expiry, so correctness does not depend on this task
  let purge_store = session_store.clone();
  tokio::spawn(async move {
    let mut interval = tokio::time::interval(Duration::from_secs(3600));
    loop {
      interval.tick().await;
      let purged = purge_store.purge_expired().await;
      if purged > 0 {
        tracing::debug!(purged, "expired sessions purged");
      }
    }
  });

  // Initialize domain services
  let auth_service = Arc::new(AuthService::new(
    user_repo,
    session_store,
    password_hasher,
    config.session.ttl_days,
  ));
  let catalog_service = Arc::new(CatalogService::new(catalog_repo));

  // Initialize use cases
  let register_use_case = Arc::new(RegisterUserUseCase::new(auth_service.clone()));
  let login_use_case = Arc::new(LoginUserUseCase::new(auth_service.clone()));
  let logout_use_case = Arc::new(LogoutUserUseCase::new(auth_service.clone()));

  let get_homepage_use_case = Arc::new(GetHomepageUseCase::new(catalog_service.clone()));
  let list_dogs_use_case = Arc::new(ListDogsUseCase::new(catalog_service.clone()));
  let get_dog_details_use_case = Arc::new(GetDogDetailsUseCase::new(catalog_service.clone()));
  let search_dogs_use_case = Arc::new(SearchDogsUseCase::new(catalog_service.clone()));

  // Federated login is optional; without credentials the routes are not
  // mounted and the rest of the site works unchanged
  let login_with_google_use_case = match &config.google {
    Some(google_config) => {
      let provider = Arc::new(
        GoogleIdentityProvider::new(google_config)
          .expect("Failed to create Google identity provider"),
      );
      tracing::info!("Google sign-in enabled");
      Some(Arc::new(LoginWithGoogleUseCase::new(
        provider,
        auth_service.clone(),
      )))
    }
    None => {
      tracing::warn!("Google OAuth not configured; federated login disabled");
      None
    }
  };

  // Initialize template engine
  let templates = TemplateEngine::new().expect("Failed to initialize template engine");
  tracing::info!("Template engine initialized");

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  // Create and start the HTTP server
  HttpServer::new(move || {
    App::new()
      // Add request ID middleware
      .wrap(RequestIdMiddleware::new())
      // Add logging middleware
      .wrap(Logger::default())
      // Resolve the session cookie into a user on every request
      .wrap(IdentityMiddleware::new(auth_service.clone()))
      // Configure storefront routes
      .configure(|cfg| {
        configure_web_routes(
          cfg,
          WebRouteDependencies {
            templates: templates.clone(),
            get_homepage: get_homepage_use_case.clone(),
            list_dogs: list_dogs_use_case.clone(),
            get_dog_details: get_dog_details_use_case.clone(),
            search_dogs: search_dogs_use_case.clone(),
            register_user: register_use_case.clone(),
            login_user: login_use_case.clone(),
            logout_user: logout_use_case.clone(),
            login_with_google: login_with_google_use_case.clone(),
          },
        )
      })
      // Static files (stylesheets, product and profile images)
      .service(fs::Files::new("/assets", "./public/assets"))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}
