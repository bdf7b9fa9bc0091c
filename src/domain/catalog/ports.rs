use async_trait::async_trait;

use super::entities::{Dog, SaleTestimonial, TopSeller};
use super::errors::CatalogError;

/// Repository trait for the read-only catalog tables
#[async_trait]
pub trait CatalogRepository: Send + Sync {
  /// Lists every dog, ordered by id
  async fn list_dogs(&self) -> Result<Vec<Dog>, CatalogError>;

  /// Finds a dog by its identifier
  async fn find_dog_by_id(&self, id: i32) -> Result<Option<Dog>, CatalogError>;

  /// Case-insensitive substring match on breed. `term` is expected
  /// pre-lowercased by the caller.
  async fn search_by_breed(&self, term: &str) -> Result<Vec<Dog>, CatalogError>;

  /// Dogs joined against sales, grouped by dog attributes, ordered by sale
  /// count descending
  async fn top_sellers(&self, limit: i64) -> Result<Vec<TopSeller>, CatalogError>;

  /// All sales left-joined with their testimonials
  async fn sale_testimonials(&self) -> Result<Vec<SaleTestimonial>, CatalogError>;
}
