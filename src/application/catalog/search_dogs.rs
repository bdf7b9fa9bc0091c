use std::sync::Arc;

use crate::domain::catalog::entities::Dog;
use crate::domain::catalog::errors::CatalogError;
use crate::domain::catalog::services::CatalogService;

/// Response of a breed search
#[derive(Debug, Clone)]
pub struct SearchDogsResponse {
  pub dogs: Vec<Dog>,
  /// Set when the search matched nothing; the listing page renders its
  /// "no results" state instead of an empty grid
  pub no_dogs_found: bool,
}

/// Use case for breed substring search
pub struct SearchDogsUseCase {
  catalog_service: Arc<CatalogService>,
}

impl SearchDogsUseCase {
  pub fn new(catalog_service: Arc<CatalogService>) -> Self {
    Self { catalog_service }
  }

  pub async fn execute(&self, term: &str) -> Result<SearchDogsResponse, CatalogError> {
    let dogs = self.catalog_service.search(term).await?;
    let no_dogs_found = dogs.is_empty();

    Ok(SearchDogsResponse {
      dogs,
      no_dogs_found,
    })
  }
}
