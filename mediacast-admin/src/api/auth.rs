//! Admin authentication middleware
//!
//! Every route under `/admin` requires the admin token in the
//! `X-Admin-Token` header. An empty configured token disables the check
//! entirely (development setups). Implemented as a tower layer so the
//! whole router is guarded in one place.

use axum::{
    extract::Request,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Header carrying the admin token
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Tower layer for admin token authentication
#[derive(Clone)]
pub struct AuthLayer {
    pub admin_token: Arc<String>,
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            admin_token: self.admin_token.clone(),
        }
    }
}

/// Tower service that performs the token check
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    admin_token: Arc<String>,
}

impl<S> Service<Request> for AuthMiddleware<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let admin_token = self.admin_token.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            // Only the admin surface is guarded
            if !request.uri().path().starts_with("/admin") {
                return inner.call(request).await;
            }

            // Empty token means authentication disabled
            if admin_token.is_empty() {
                tracing::debug!("Admin authentication disabled (no token configured)");
                return inner.call(request).await;
            }

            let provided = request
                .headers()
                .get(ADMIN_TOKEN_HEADER)
                .and_then(|v| v.to_str().ok());

            match provided {
                Some(token) if token == admin_token.as_str() => inner.call(request).await,
                Some(_) => Ok(unauthorized("invalid_token", "Admin token does not match")),
                None => Ok(unauthorized(
                    "missing_token",
                    "Header 'X-Admin-Token' is required",
                )),
            }
        })
    }
}

fn unauthorized(error: &str, message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": error,
            "message": message,
        })),
    )
        .into_response()
}
