//! Authentication boundary.
//!
//! The server acts as an OAuth2 resource server behind an external IdP:
//! interactive login happens elsewhere, and this gate only verifies that a
//! bearer token is present and well-formed before a request reaches the
//! core. Requests that pass the gate are treated as authenticated.

use axum::{
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug, Clone)]
pub enum AuthError {
    MissingToken,
    InvalidToken(String),
}

impl AuthError {
    fn diagnostics(&self) -> String {
        match self {
            Self::MissingToken => "Authorization header required".to_string(),
            Self::InvalidToken(msg) => format!("Invalid authorization header: {msg}"),
        }
    }

    pub fn into_fhir_response(self) -> Response {
        let body = axum::Json(json!({
            "resourceType": "OperationOutcome",
            "issue": [{
                "severity": "error",
                "code": "login",
                "diagnostics": self.diagnostics()
            }]
        }));

        let mut response = (StatusCode::UNAUTHORIZED, body).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/fhir+json; charset=utf-8"),
        );
        response.headers_mut().insert(
            header::WWW_AUTHENTICATE,
            header::HeaderValue::from_static("Bearer"),
        );
        response
    }
}

/// Reject requests without a `Bearer` token before they reach the core
pub async fn auth_middleware(req: Request, next: Next) -> Response {
    match bearer_token(req.headers()) {
        // TODO: validate the token against the IdP's JWKS (Keycloak) once
        // the realm is provisioned.
        Ok(_token) => next.run(req).await,
        Err(e) => e.into_fhir_response(),
    }
}

fn bearer_token(headers: &HeaderMap) -> std::result::Result<&str, AuthError> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?;

    let authorization = authorization.to_str().map_err(|_| {
        AuthError::InvalidToken("header is not valid UTF-8".to_string())
    })?;

    let token = authorization
        .strip_prefix("Bearer ")
        .or_else(|| authorization.strip_prefix("bearer "))
        .ok_or_else(|| {
            AuthError::InvalidToken("expected 'Bearer <token>'".to_string())
        })?;

    if token.trim().is_empty() {
        return Err(AuthError::InvalidToken("empty token".to_string()));
    }

    Ok(token)
}
