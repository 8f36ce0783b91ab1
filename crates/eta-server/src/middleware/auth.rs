use crate::state::AppState;
use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use eta_token::TokenError;
use serde_json::json;

pub const AUTHORIZATION_TYPE_BEARER: &str = "bearer";

/// Why a request was refused by [`require_auth`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("authorization header is not provided")]
    MissingHeader,

    #[error("invalid authorization header format")]
    InvalidFormat,

    #[error("unsupported authorization type {0}")]
    UnsupportedType(String),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingHeader => "MISSING_AUTHORIZATION",
            AuthError::InvalidFormat => "INVALID_AUTHORIZATION_FORMAT",
            AuthError::UnsupportedType(_) => "UNSUPPORTED_AUTHORIZATION_TYPE",
            AuthError::Token(err) => err.code(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AuthError::Token(err) if !err.is_credential_error() => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string(), "code": self.code() }));
        (self.status(), body).into_response()
    }
}

/// Axum middleware requiring a valid bearer token.
///
/// On success the verified [`eta_token::Payload`] is inserted into the request
/// extensions for downstream handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer(req.headers()).inspect_err(|err| {
        tracing::debug!(code = err.code(), "rejected request: {err}");
    })?;

    let payload = state.token_maker.verify_token(token).inspect_err(|err| {
        tracing::debug!(code = err.code(), "rejected request: {err}");
    })?;

    tracing::debug!(
        principal_id = %payload.principal_id,
        token_id = %payload.id,
        "authenticated request"
    );
    req.extensions_mut().insert(payload);

    Ok(next.run(req).await)
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .map(|h| h.to_str().map_err(|_| AuthError::InvalidFormat))
        .transpose()?
        .filter(|v| !v.trim().is_empty())
        .ok_or(AuthError::MissingHeader)?;

    let fields: Vec<&str> = value.split_whitespace().collect();
    let [kind, token] = fields.as_slice() else {
        return Err(AuthError::InvalidFormat);
    };

    if !kind.eq_ignore_ascii_case(AUTHORIZATION_TYPE_BEARER) {
        return Err(AuthError::UnsupportedType(kind.to_string()));
    }

    Ok(*token)
}
