use axum::{Extension, Json};
use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use uuid::Uuid;

use memotrack_core::error::Error as CoreError;
use memotrack_core::model::memo::{Memo, MemoDraft};
use memotrack_core::query::counts::MarketCountsResponse;

use crate::AppState;

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

pub struct AppError(CoreError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self.0 {
            CoreError::Validation(m) => (StatusCode::BAD_REQUEST, m.clone()),
            CoreError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.clone()),
            CoreError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
            other => {
                tracing::error!("internal error: {other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(serde_json::json!({"error": msg}))).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(e: CoreError) -> Self {
        AppError(e)
    }
}

// ---------------------------------------------------------------------------
// Session gate
// ---------------------------------------------------------------------------

/// The validated session token, stashed in request extensions by
/// [`require_session`] so handlers such as logout can reach it.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Middleware guarding the protected routes: the request must carry a
/// `Authorization: Bearer <token>` header naming a live session.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| CoreError::Unauthorized("missing session token".to_string()))?
        .to_string();

    if !state.sessions.validate(&token).await {
        return Err(CoreError::Unauthorized("invalid or expired session token".to_string()).into());
    }

    request.extensions_mut().insert(SessionToken(token));
    Ok(next.run(request).await)
}

// ---------------------------------------------------------------------------
// Login / logout
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// POST /login -- verify credentials and mint a session token.
///
/// Missing fields count as failed credentials; the login contract is
/// two-valued (token or 401).
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let username = body.username.unwrap_or_default();
    let password = body.password.unwrap_or_default();

    if !state.auth.verify(&username, &password).await {
        return Err(CoreError::Unauthorized("invalid username or password".to_string()).into());
    }

    let token = state.sessions.create().await;
    tracing::info!(%username, "login succeeded");
    Ok(Json(serde_json::json!({"token": token})))
}

/// POST /logout -- revoke the session that made this request.
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Json<serde_json::Value> {
    state.sessions.revoke(&token).await;
    Json(serde_json::json!({"message": "logged out"}))
}

// ---------------------------------------------------------------------------
// Memo CRUD
// ---------------------------------------------------------------------------

/// GET /api/memos -- all memos, most recent date+time first.
pub async fn list_memos_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Memo>>, AppError> {
    let memos = state.engine.list().await?;
    Ok(Json(memos))
}

/// POST /api/memos -- validate, assign an id, append, and return the record.
pub async fn create_memo_handler(
    State(state): State<AppState>,
    Json(draft): Json<MemoDraft>,
) -> Result<(StatusCode, Json<Memo>), AppError> {
    let memo = state.engine.create(draft).await?;
    Ok((StatusCode::CREATED, Json(memo)))
}

/// PUT /api/memos/:id -- full field replacement, id preserved.
pub async fn update_memo_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<MemoDraft>,
) -> Result<Json<Memo>, AppError> {
    let memo = state.engine.update(id, draft).await?;
    Ok(Json(memo))
}

/// DELETE /api/memos/:id -- remove the matching record.
pub async fn delete_memo_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.engine.delete(id).await?;
    Ok(Json(serde_json::json!({"message": "memo deleted"})))
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// GET /api/markets/counts -- per-market total/approved/pending tallies,
/// with every fixed market present even at zero.
pub async fn market_counts_handler(
    State(state): State<AppState>,
) -> Result<Json<MarketCountsResponse>, AppError> {
    let counts = state.engine.market_counts().await?;
    Ok(Json(counts))
}
