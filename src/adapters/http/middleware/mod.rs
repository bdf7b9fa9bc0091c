pub mod identity;
pub mod request_id;
pub mod require_auth;

// Re-export middleware components for easier access
pub use identity::IdentityMiddleware;
pub use request_id::{RequestId, RequestIdExt, RequestIdMiddleware};
pub use require_auth::RequireAuth;
