use std::sync::Arc;

use crate::domain::catalog::errors::CatalogError;
use crate::domain::catalog::services::{CatalogService, Homepage};

/// Use case for the homepage aggregation (top sellers + testimonials)
pub struct GetHomepageUseCase {
  catalog_service: Arc<CatalogService>,
}

impl GetHomepageUseCase {
  pub fn new(catalog_service: Arc<CatalogService>) -> Self {
    Self { catalog_service }
  }

  pub async fn execute(&self) -> Result<Homepage, CatalogError> {
    self.catalog_service.homepage().await
  }
}
