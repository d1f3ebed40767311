use crate::error::ApiError;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use uuid::Uuid;

/// Resolved identity of the caller. Credential verification happens
/// upstream; by the time a request reaches these handlers the gateway has
/// placed the authenticated user's id in the `X-User-Id` header.
#[derive(Debug, Clone, Copy)]
pub struct UserId(pub Uuid);

impl FromRequest for UserId {
    type Error = ApiError;
    type Future = Ready<Result<Self, ApiError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = req
            .headers()
            .get("X-User-Id")
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing X-User-Id header".to_string()))
            .and_then(|raw| {
                raw.parse::<Uuid>()
                    .map_err(|_| ApiError::Unauthorized("Invalid user ID format".to_string()))
            })
            .map(UserId);
        ready(result)
    }
}
