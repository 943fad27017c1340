//! JWT authentication middleware.
//!
//! Verifies the `Authorization: Bearer` header on every request passing
//! through the wrapped scope and stores an [`AuthContext`] in the request
//! extensions. Handlers receive the caller identity explicitly through the
//! `AuthContext` extractor rather than reading any ambient state.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::ErrorUnauthorized;
use actix_web::http::header;
use actix_web::{web, Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use sb_core::services::TokenService;
use sb_shared::types::ErrorResponse;

/// Identity of the authenticated caller, taken from verified JWT claims.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub email: String,
    pub token_id: String,
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let ctx = req.extensions().get::<AuthContext>().cloned();
        ready(ctx.ok_or_else(|| unauthorized("Authentication required")))
    }
}

/// Middleware factory that enforces a valid bearer token.
pub struct JwtAuth;

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = JwtAuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = match extract_bearer_token(req.request()) {
                Some(token) => token,
                None => return Err(unauthorized("Missing or malformed Authorization header")),
            };

            let token_service = req
                .app_data::<web::Data<Arc<TokenService>>>()
                .ok_or_else(|| unauthorized("Token verifier not configured"))?;

            match token_service.verify_token(&token) {
                Ok(claims) => {
                    let user_id = claims
                        .user_id()
                        .ok_or_else(|| unauthorized("Invalid token subject"))?;
                    req.extensions_mut().insert(AuthContext {
                        user_id,
                        email: claims.email,
                        token_id: claims.jti,
                    });
                    service.call(req).await
                }
                Err(e) => {
                    log::debug!("Token verification failed: {}", e);
                    Err(unauthorized("Invalid or expired token"))
                }
            }
        })
    }
}

fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    let header = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

fn unauthorized(message: &str) -> Error {
    ErrorUnauthorized(
        serde_json::to_string(&ErrorResponse::new("unauthorized", message))
            .unwrap_or_else(|_| message.to_string()),
    )
}
