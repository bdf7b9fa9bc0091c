use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::catalog::{
  entities::{Dog, SaleTestimonial, TopSeller},
  errors::CatalogError,
  ports::CatalogRepository,
};

/// PostgreSQL implementation of the CatalogRepository trait
pub struct PostgresCatalogRepository {
  pool: PgPool,
}

impl PostgresCatalogRepository {
  /// Creates a new instance of PostgresCatalogRepository
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for the dogs table
#[derive(Debug, sqlx::FromRow)]
struct DogRow {
  id: i32,
  breed: String,
  price: Decimal,
  age: i32,
  description: String,
  image_url: String,
}

impl From<DogRow> for Dog {
  fn from(row: DogRow) -> Self {
    Dog {
      id: row.id,
      breed: row.breed,
      price: row.price,
      age: row.age,
      description: row.description,
      image_url: row.image_url,
    }
  }
}

#[derive(Debug, sqlx::FromRow)]
struct TopSellerRow {
  breed: String,
  total_sales: i64,
  price: Decimal,
  age: i32,
  description: String,
  image_url: String,
}

#[derive(Debug, sqlx::FromRow)]
struct SaleTestimonialRow {
  sale_id: i32,
  dog_id: i32,
  sold_at: DateTime<Utc>,
  author: Option<String>,
  quote: Option<String>,
  rating: Option<i32>,
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
  async fn list_dogs(&self) -> Result<Vec<Dog>, CatalogError> {
    let rows = sqlx::query_as::<_, DogRow>(
      r#"
            SELECT id, breed, price, age, description, image_url
            FROM dogs
            ORDER BY id ASC
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn find_dog_by_id(&self, id: i32) -> Result<Option<Dog>, CatalogError> {
    let row = sqlx::query_as::<_, DogRow>(
      r#"
            SELECT id, breed, price, age, description, image_url
            FROM dogs
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn search_by_breed(&self, term: &str) -> Result<Vec<Dog>, CatalogError> {
    let rows = sqlx::query_as::<_, DogRow>(
      r#"
            SELECT id, breed, price, age, description, image_url
            FROM dogs
            WHERE LOWER(breed) LIKE '%' || $1 || '%'
            ORDER BY id ASC
            "#,
    )
    .bind(term)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn top_sellers(&self, limit: i64) -> Result<Vec<TopSeller>, CatalogError> {
    let rows = sqlx::query_as::<_, TopSellerRow>(
      r#"
            SELECT d.breed, COUNT(*) AS total_sales, d.price, d.age, d.description, d.image_url
            FROM dogs d
            JOIN sales s ON d.id = s.dog_id
            GROUP BY d.breed, d.price, d.age, d.description, d.image_url
            ORDER BY total_sales DESC
            LIMIT $1
            "#,
    )
    .bind(limit)
    .fetch_all(&self.pool)
    .await?;

    Ok(
      rows
        .into_iter()
        .map(|row| TopSeller {
          breed: row.breed,
          total_sales: row.total_sales,
          price: row.price,
          age: row.age,
          description: row.description,
          image_url: row.image_url,
        })
        .collect(),
    )
  }

  async fn sale_testimonials(&self) -> Result<Vec<SaleTestimonial>, CatalogError> {
    let rows = sqlx::query_as::<_, SaleTestimonialRow>(
      r#"
            SELECT s.id AS sale_id, s.dog_id, s.sold_at, t.author, t.quote, t.rating
            FROM sales s
            LEFT JOIN testimonials t ON s.id = t.sale_id
            ORDER BY s.id ASC
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    Ok(
      rows
        .into_iter()
        .map(|row| SaleTestimonial {
          sale_id: row.sale_id,
          dog_id: row.dog_id,
          sold_at: row.sold_at,
          author: row.author,
          quote: row.quote,
          rating: row.rating,
        })
        .collect(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use sqlx::postgres::PgPoolOptions;
  use testcontainers::ImageExt;
  use testcontainers_modules::postgres::Postgres;
  use testcontainers_modules::testcontainers::{ContainerAsync, runners::AsyncRunner};

  async fn setup_test_db() -> (PgPool, ContainerAsync<Postgres>) {
    let container = Postgres::default()
      .with_tag("16-alpine")
      .start()
      .await
      .expect("Failed to start postgres container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
      .get_host_port_ipv4(5432)
      .await
      .expect("Failed to get port");
    let database_url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

    let pool = PgPoolOptions::new()
      .max_connections(5)
      .connect(&database_url)
      .await
      .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
      .run(&pool)
      .await
      .expect("Failed to run migrations");

    (pool, container)
  }

  async fn seed_catalog(pool: &PgPool) {
    sqlx::query(
      r#"
            INSERT INTO dogs (breed, price, age, description, image_url) VALUES
              ('Labrador Retriever', 500.00, 2, 'Friendly family dog', '/assets/images/lab.jpg'),
              ('Labradoodle', 650.00, 1, 'Curly and clever', '/assets/images/doodle.jpg'),
              ('Beagle', 400.00, 3, 'Small and curious', '/assets/images/beagle.jpg')
            "#,
    )
    .execute(pool)
    .await
    .unwrap();

    // Two sales for dog 1, one for dog 2; one testimonial
    sqlx::query("INSERT INTO sales (dog_id) VALUES (1), (1), (2)")
      .execute(pool)
      .await
      .unwrap();
    sqlx::query(
      "INSERT INTO testimonials (sale_id, author, quote, rating) VALUES (1, 'Sam', 'Best dog ever', 5)",
    )
    .execute(pool)
    .await
    .unwrap();
  }

  #[tokio::test]
  async fn test_list_dogs_ordered_by_id() {
    let (pool, _container) = setup_test_db().await;
    seed_catalog(&pool).await;
    let repo = PostgresCatalogRepository::new(pool);

    let dogs = repo.list_dogs().await.unwrap();
    assert_eq!(dogs.len(), 3);
    assert_eq!(dogs[0].breed, "Labrador Retriever");
    assert!(dogs.windows(2).all(|w| w[0].id < w[1].id));
  }

  #[tokio::test]
  async fn test_find_dog_by_id_zero_rows_is_none() {
    let (pool, _container) = setup_test_db().await;
    seed_catalog(&pool).await;
    let repo = PostgresCatalogRepository::new(pool);

    assert!(repo.find_dog_by_id(1).await.unwrap().is_some());
    assert!(repo.find_dog_by_id(999).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn test_search_matches_substring_case_insensitively() {
    let (pool, _container) = setup_test_db().await;
    seed_catalog(&pool).await;
    let repo = PostgresCatalogRepository::new(pool);

    // Callers lowercase the term; LOWER(breed) handles the column side
    let hits = repo.search_by_breed("lab").await.unwrap();
    assert_eq!(hits.len(), 2);

    let none = repo.search_by_breed("husky").await.unwrap();
    assert!(none.is_empty());
  }

  #[tokio::test]
  async fn test_top_sellers_grouped_and_ordered() {
    let (pool, _container) = setup_test_db().await;
    seed_catalog(&pool).await;
    let repo = PostgresCatalogRepository::new(pool);

    let sellers = repo.top_sellers(3).await.unwrap();
    assert_eq!(sellers.len(), 2); // only dogs with sales appear
    assert_eq!(sellers[0].breed, "Labrador Retriever");
    assert_eq!(sellers[0].total_sales, 2);
  }

  #[tokio::test]
  async fn test_sale_testimonials_left_join_keeps_bare_sales() {
    let (pool, _container) = setup_test_db().await;
    seed_catalog(&pool).await;
    let repo = PostgresCatalogRepository::new(pool);

    let rows = repo.sale_testimonials().await.unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].has_testimonial());
    assert!(!rows[1].has_testimonial());
  }
}
