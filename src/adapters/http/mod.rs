pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod templates;

// Re-export commonly used types
pub use errors::PageError;
pub use middleware::{IdentityMiddleware, RequestId, RequestIdExt, RequestIdMiddleware, RequireAuth};
pub use routes::{WebRouteDependencies, configure_web_routes};
pub use templates::TemplateEngine;
