use thiserror::Error;

use crate::domain::auth::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("Dog not found")]
  DogNotFound,

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for CatalogError {
  fn from(error: sqlx::Error) -> Self {
    CatalogError::Repository(RepositoryError::from(error))
  }
}
