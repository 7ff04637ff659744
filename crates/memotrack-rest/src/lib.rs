pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post, put};
use memotrack_core::auth::Authenticator;
use memotrack_core::query::MemoEngine;
use memotrack_core::session::SessionStore;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Shared state carried by the router: the memo engine plus the session
/// and credential collaborators injected by the binary.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<MemoEngine>,
    pub sessions: Arc<dyn SessionStore>,
    pub auth: Arc<dyn Authenticator>,
}

/// Construct the full Axum router for the Memotrack API.
///
/// `/login` is public; every other route sits behind the session
/// middleware and expects `Authorization: Bearer <token>`.
///
/// CORS is restrictive by default (localhost only). Set the
/// `MEMOTRACK_CORS_ORIGINS` environment variable to a comma-separated
/// list of allowed origins to override (e.g. `https://app.example.com`).
/// Set it to `*` to allow all origins (not recommended for production).
pub fn router(state: AppState) -> Router {
    let cors = build_cors_layer();

    let protected = Router::new()
        .route(
            "/api/memos",
            get(handlers::list_memos_handler).post(handlers::create_memo_handler),
        )
        .route(
            "/api/memos/{id}",
            put(handlers::update_memo_handler).delete(handlers::delete_memo_handler),
        )
        .route("/api/markets/counts", get(handlers::market_counts_handler))
        .route("/logout", post(handlers::logout_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            handlers::require_session,
        ));

    Router::new()
        .route("/login", post(handlers::login_handler))
        .merge(protected)
        .layer(DefaultBodyLimit::max(256 * 1024)) // memos are small
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer() -> CorsLayer {
    use axum::http::{HeaderName, Method};

    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("authorization"),
        ])
        .max_age(std::time::Duration::from_secs(3600));

    match std::env::var("MEMOTRACK_CORS_ORIGINS") {
        Ok(val) if val == "*" => base.allow_origin(AllowOrigin::any()),
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            base.allow_origin(origins)
        }
        Err(_) => {
            // Default: localhost only
            let origins: Vec<_> = [
                "http://localhost:3000",
                "http://localhost:8080",
                "http://127.0.0.1:3000",
                "http://127.0.0.1:8080",
            ]
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
            base.allow_origin(origins)
        }
    }
}
