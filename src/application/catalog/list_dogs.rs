use std::sync::Arc;

use crate::domain::catalog::entities::Dog;
use crate::domain::catalog::errors::CatalogError;
use crate::domain::catalog::services::CatalogService;

/// Use case for the full product listing
pub struct ListDogsUseCase {
  catalog_service: Arc<CatalogService>,
}

impl ListDogsUseCase {
  pub fn new(catalog_service: Arc<CatalogService>) -> Self {
    Self { catalog_service }
  }

  pub async fn execute(&self) -> Result<Vec<Dog>, CatalogError> {
    self.catalog_service.list_dogs().await
  }
}
