use actix_web::{
  Error, HttpMessage, HttpResponse,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{future::ready, rc::Rc};

use crate::domain::auth::entities::User;

/// Guard middleware for routes that need a signed-in user
///
/// Checks for the `User` attached by `IdentityMiddleware` and redirects
/// anonymous requests to the login page. Must be mounted inside an app
/// that runs the identity middleware first.
#[derive(Debug, Clone, Default)]
pub struct RequireAuth;

impl RequireAuth {
  pub fn new() -> Self {
    Self
  }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type InitError = ();
  type Transform = RequireAuthService<S>;
  type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(RequireAuthService {
      service: Rc::new(service),
    }))
  }
}

pub struct RequireAuthService<S> {
  service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireAuthService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let authenticated = req.extensions().get::<User>().is_some();
    let service = Rc::clone(&self.service);

    Box::pin(async move {
      if authenticated {
        let res = service.call(req).await?;
        Ok(res.map_into_left_body())
      } else {
        let res = req.into_response(
          HttpResponse::Found()
            .insert_header(("Location", "/login"))
            .finish(),
        );
        Ok(res.map_into_right_body())
      }
    })
  }
}
