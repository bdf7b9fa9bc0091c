use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Dog listing. Read-only from this system's perspective; rows are managed
/// outside the storefront.
#[derive(Debug, Clone, Serialize)]
pub struct Dog {
  pub id: i32,
  pub breed: String,
  pub price: Decimal,
  pub age: i32,
  pub description: String,
  pub image_url: String,
}

/// Homepage aggregation row: a dog joined against its sale count
#[derive(Debug, Clone, Serialize)]
pub struct TopSeller {
  pub breed: String,
  pub total_sales: i64,
  pub price: Decimal,
  pub age: i32,
  pub description: String,
  pub image_url: String,
}

/// A sale left-joined with its testimonial, if one was written. The
/// testimonial columns are null for sales without one.
#[derive(Debug, Clone, Serialize)]
pub struct SaleTestimonial {
  pub sale_id: i32,
  pub dog_id: i32,
  pub sold_at: DateTime<Utc>,
  pub author: Option<String>,
  pub quote: Option<String>,
  pub rating: Option<i32>,
}

impl SaleTestimonial {
  /// Whether the buyer left a testimonial for this sale
  pub fn has_testimonial(&self) -> bool {
    self.quote.is_some()
  }
}
