use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use thiserror::Error;

use crate::domain::auth::errors::{AuthError, RepositoryError};
use crate::domain::catalog::errors::CatalogError;

/// Error type for the server-rendered pages. Maps domain errors to the
/// handful of status codes the storefront actually serves.
#[derive(Debug, Error)]
pub enum PageError {
  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  BadRequest(String),

  #[error("Internal error: {0}")]
  Internal(String),
}

impl ResponseError for PageError {
  fn status_code(&self) -> StatusCode {
    match self {
      PageError::NotFound(_) => StatusCode::NOT_FOUND,
      PageError::BadRequest(_) => StatusCode::BAD_REQUEST,
      PageError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let body = match self {
      PageError::NotFound(msg) | PageError::BadRequest(msg) => msg.clone(),
      PageError::Internal(msg) => {
        // Logged server-side only; the browser gets a generic message
        tracing::error!("Internal error: {}", msg);
        "An internal server error occurred".to_string()
      }
    };

    HttpResponse::build(self.status_code())
      .content_type(ContentType::plaintext())
      .body(body)
  }
}

impl From<CatalogError> for PageError {
  fn from(error: CatalogError) -> Self {
    match error {
      CatalogError::DogNotFound => PageError::NotFound("Dog not found".to_string()),
      CatalogError::Repository(e) => PageError::Internal(e.to_string()),
    }
  }
}

impl From<AuthError> for PageError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::InvalidCredentials => {
        PageError::BadRequest("Invalid email or password".to_string())
      }
      AuthError::EmailAlreadyExists => {
        PageError::BadRequest("An account with this email already exists".to_string())
      }
      AuthError::InvalidSession => PageError::BadRequest("Invalid or expired session".to_string()),
      AuthError::Validation(e) => PageError::BadRequest(e.to_string()),
      AuthError::UserNotFound => PageError::NotFound("User not found".to_string()),
      AuthError::Federation(e) => PageError::Internal(e),
      AuthError::Repository(e) => match e {
        RepositoryError::NotFound => PageError::NotFound("Not found".to_string()),
        other => PageError::Internal(other.to_string()),
      },
      AuthError::Hash(e) => PageError::Internal(e.to_string()),
    }
  }
}

impl From<tera::Error> for PageError {
  fn from(error: tera::Error) -> Self {
    PageError::Internal(format!("Template rendering failed: {}", error))
  }
}
