use actix_web::{http::header, HttpRequest};
use basket_engine::db_types::UserAuth;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Auth token not provided.")]
    MissingToken,
    #[error("Auth token was rejected. {0}")]
    InvalidToken(String),
    #[error("Users service could not be reached. {0}")]
    Unreachable(String),
}

/// Resolves an `{id, role}` authorization context from a raw `Authorization` header value.
///
/// Token mechanics (format, validation, expiry) belong to the users service; the gateway just forwards the header
/// and acts on the answer.
#[allow(async_fn_in_trait)]
pub trait AuthResolver {
    async fn resolve(&self, auth_token: &str) -> Result<UserAuth, AuthError>;
}

pub fn auth_header(req: &HttpRequest) -> Result<&str, AuthError> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::MissingToken)
}
