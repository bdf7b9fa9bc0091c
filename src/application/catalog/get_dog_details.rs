use std::sync::Arc;

use crate::domain::catalog::entities::Dog;
use crate::domain::catalog::errors::CatalogError;
use crate::domain::catalog::services::CatalogService;

/// Use case for the product detail page
pub struct GetDogDetailsUseCase {
  catalog_service: Arc<CatalogService>,
}

impl GetDogDetailsUseCase {
  pub fn new(catalog_service: Arc<CatalogService>) -> Self {
    Self { catalog_service }
  }

  /// # Errors
  /// Returns `CatalogError::DogNotFound` when no row matches `id`.
  pub async fn execute(&self, id: i32) -> Result<Dog, CatalogError> {
    self.catalog_service.dog_details(id).await
  }
}
