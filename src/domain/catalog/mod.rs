pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;

// Re-export commonly used types
pub use entities::{Dog, SaleTestimonial, TopSeller};
pub use errors::CatalogError;
pub use services::{CatalogService, Homepage};
