use axum::{Extension, Json};
use eta_token::Payload;
use serde_json::json;

pub async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "ok": true, "service": "eta-server" }))
}

/// Echo the authenticated session attached by the auth middleware.
pub async fn whoami(Extension(payload): Extension<Payload>) -> Json<serde_json::Value> {
    Json(json!({
        "principal_id": payload.principal_id,
        "token_id": payload.id,
        "issued_at": payload.issued_at,
        "expired_at": payload.expired_at,
    }))
}
