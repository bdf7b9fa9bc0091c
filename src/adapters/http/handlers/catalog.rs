use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use std::sync::Arc;

use crate::adapters::http::errors::PageError;
use crate::adapters::http::handlers::base_context;
use crate::adapters::http::templates::TemplateEngine;
use crate::application::catalog::{GetDogDetailsUseCase, ListDogsUseCase, SearchDogsUseCase};

#[derive(Deserialize)]
pub struct SearchFormData {
  search: String,
}

/// Render the full product listing
pub async fn products_page(
  use_case: web::Data<Arc<ListDogsUseCase>>,
  templates: web::Data<TemplateEngine>,
  req: HttpRequest,
) -> Result<HttpResponse, PageError> {
  let dogs = use_case.execute().await?;

  let mut context = base_context("Our Dogs", &req);
  context.insert("dogs", &dogs);
  context.insert("no_dogs_found", &false);

  let html = templates.render("pages/products.html.tera", &context)?;
  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Render a single dog's detail page. An unknown id is a plain 404, never
/// an empty page.
pub async fn dog_detail_page(
  path: web::Path<i32>,
  use_case: web::Data<Arc<GetDogDetailsUseCase>>,
  templates: web::Data<TemplateEngine>,
  req: HttpRequest,
) -> Result<HttpResponse, PageError> {
  let dog = use_case.execute(path.into_inner()).await?;

  let mut context = base_context(&dog.breed, &req);
  context.insert("dog", &dog);

  let html = templates.render("pages/detail.html.tera", &context)?;
  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Handle the breed search form. Renders the listing page with the matches,
/// or its "no results" state when nothing matched.
pub async fn search_submit(
  form: web::Form<SearchFormData>,
  use_case: web::Data<Arc<SearchDogsUseCase>>,
  templates: web::Data<TemplateEngine>,
  req: HttpRequest,
) -> Result<HttpResponse, PageError> {
  let result = use_case.execute(&form.search).await?;

  let mut context = base_context("Search Results", &req);
  context.insert("dogs", &result.dogs);
  context.insert("no_dogs_found", &result.no_dogs_found);
  context.insert("search_term", &form.search);

  let html = templates.render("pages/products.html.tera", &context)?;
  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}
