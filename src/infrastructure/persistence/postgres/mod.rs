pub mod catalog_repository;
pub mod user_repository;

pub use catalog_repository::PostgresCatalogRepository;
pub use user_repository::PostgresUserRepository;
