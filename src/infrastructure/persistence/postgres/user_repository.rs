use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{
  entities::User,
  errors::AuthError,
  ports::UserRepository,
  value_objects::Email,
};

/// PostgreSQL implementation of the UserRepository trait
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  /// Creates a new instance of PostgresUserRepository
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for the users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  email: String,
  password_hash: String,
  photo_path: String,
  first_name: String,
  last_name: String,
  created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User::from_db(
      row.id,
      row.email,
      row.password_hash,
      row.photo_path,
      row.first_name,
      row.last_name,
      row.created_at,
    )
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn create(&self, user: User) -> Result<User, AuthError> {
    let result = sqlx::query_as::<_, UserRow>(
      r#"
            INSERT INTO users (id, email, password_hash, photo_path, first_name, last_name, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, email, password_hash, photo_path, first_name, last_name, created_at
            "#,
    )
    .bind(user.id)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.photo_path)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(user.created_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(result.into())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    let result = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, email, password_hash, photo_path, first_name, last_name, created_at
            FROM users
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(result.map(Into::into))
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    let result = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, email, password_hash, photo_path, first_name, last_name, created_at
            FROM users
            WHERE email = $1
            "#,
    )
    .bind(email.as_str())
    .fetch_optional(&self.pool)
    .await?;

    Ok(result.map(Into::into))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::errors::RepositoryError;
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

  #[tokio::test]
  async fn test_create_and_find_by_email() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    let user = User::new_local(
      "test@example.com".to_string(),
      "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2hoYXNoaGFzaA".to_string(),
      "Test".to_string(),
      "User".to_string(),
    );

    let created = repo.create(user.clone()).await.unwrap();
    assert_eq!(created.email, user.email);

    let email = Email::new("test@example.com").unwrap();
    let found = repo.find_by_email(&email).await.unwrap();
    assert!(found.is_some());
    assert_eq!(found.unwrap().id, created.id);
  }

  #[tokio::test]
  async fn test_email_lookup_is_case_sensitive() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    let user = User::new_local(
      "Cased@Example.com".to_string(),
      "sentinel".to_string(),
      "Cased".to_string(),
      "User".to_string(),
    );
    repo.create(user).await.unwrap();

    let exact = Email::new("Cased@Example.com").unwrap();
    assert!(repo.find_by_email(&exact).await.unwrap().is_some());

    let folded = Email::new("cased@example.com").unwrap();
    assert!(repo.find_by_email(&folded).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn test_duplicate_email_violates_unique_index() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    let user1 = User::new_local(
      "duplicate@example.com".to_string(),
      "hash-one".to_string(),
      "User".to_string(),
      "One".to_string(),
    );
    let user2 = User::new_local(
      "duplicate@example.com".to_string(),
      "hash-two".to_string(),
      "User".to_string(),
      "Two".to_string(),
    );

    repo.create(user1).await.unwrap();
    let result = repo.create(user2).await;

    assert!(matches!(
      result,
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_)))
    ));
  }

  #[tokio::test]
  async fn test_find_by_id_missing_is_none() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    let found = repo.find_by_id(Uuid::new_v4()).await.unwrap();
    assert!(found.is_none());
  }
}
