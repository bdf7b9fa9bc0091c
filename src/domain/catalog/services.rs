use std::sync::Arc;

use super::entities::{Dog, SaleTestimonial, TopSeller};
use super::errors::CatalogError;
use super::ports::CatalogRepository;

/// Number of best-selling dogs shown on the homepage
const TOP_SELLER_LIMIT: i64 = 3;

/// Everything the homepage renders from the catalog
#[derive(Debug, Clone)]
pub struct Homepage {
  pub top_sellers: Vec<TopSeller>,
  pub testimonials: Vec<SaleTestimonial>,
}

/// Catalog service over the read-only domain tables
pub struct CatalogService {
  repo: Arc<dyn CatalogRepository>,
}

impl CatalogService {
  /// Creates a new instance of CatalogService
  pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
    Self { repo }
  }

  /// Fetches the homepage aggregation: top 3 sellers plus testimonials
  pub async fn homepage(&self) -> Result<Homepage, CatalogError> {
    let top_sellers = self.repo.top_sellers(TOP_SELLER_LIMIT).await?;
    let testimonials = self.repo.sale_testimonials().await?;

    Ok(Homepage {
      top_sellers,
      testimonials,
    })
  }

  /// Lists every dog in the catalog
  pub async fn list_dogs(&self) -> Result<Vec<Dog>, CatalogError> {
    self.repo.list_dogs().await
  }

  /// Fetches a single dog. Zero rows is a `DogNotFound`, not a silent
  /// fall-through to the renderer.
  pub async fn dog_details(&self, id: i32) -> Result<Dog, CatalogError> {
    self
      .repo
      .find_dog_by_id(id)
      .await?
      .ok_or(CatalogError::DogNotFound)
  }

  /// Case-insensitive substring search on breed. An empty result is a
  /// normal outcome, never an error.
  pub async fn search(&self, term: &str) -> Result<Vec<Dog>, CatalogError> {
    self.repo.search_by_breed(&term.to_lowercase()).await
  }
}
