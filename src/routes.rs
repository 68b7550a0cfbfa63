use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        campaigns::campaigns_handler,
        contact_lists::lists_handler,
        milestones::{milestones_handler, referral_stats},
        newsletter::newsletter_handler,
        referral::{referral_handler, referral_redirect},
        sequences::sequences_handler,
        signup_pages::{get_public_page, pages_handler},
        subscribers::subscribers_handler,
    },
    middleware::admin_auth,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let admin_routes = Router::new()
        .nest("/milestones", milestones_handler())
        .nest("/campaigns", campaigns_handler())
        .nest("/sequences", sequences_handler())
        .nest("/lists", lists_handler())
        .nest("/pages", pages_handler())
        .nest("/subscribers", subscribers_handler())
        .route("/referral-stats", get(referral_stats))
        .layer(middleware::from_fn(admin_auth));

    let api_route = Router::new()
        .nest("/newsletter", newsletter_handler())
        .nest("/referral", referral_handler())
        .route("/pages/:slug", get(get_public_page))
        .nest("/admin", admin_routes)
        .layer(TraceLayer::new_for_http());

    Router::new()
        .route("/health", get(health_check))
        .route("/r/:code", get(referral_redirect))
        .nest("/api", api_route)
        .layer(Extension(app_state))
}
