use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

use lessen::entitlements::{
    entitlement_router, EntitlementService, PlanCatalog, SubscriptionPlan, SubscriptionStore,
};
use lessen::identity::IdentityProvider;
use lessen::progress::{
    progress_router, BadgeCatalog, BadgeView, LevelLadder, LevelView, ProgressRepository,
    ProgressService,
};

pub(crate) fn with_api_routes<R, S, I>(
    progress: Arc<ProgressService<R>>,
    entitlements: Arc<EntitlementService<S, I>>,
) -> axum::Router
where
    R: ProgressRepository + 'static,
    S: SubscriptionStore + 'static,
    I: IdentityProvider + 'static,
{
    progress_router(progress)
        .merge(entitlement_router(entitlements))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/catalog/levels",
            axum::routing::get(level_catalog_endpoint),
        )
        .route(
            "/api/v1/catalog/badges",
            axum::routing::get(badge_catalog_endpoint),
        )
        .route(
            "/api/v1/catalog/plans",
            axum::routing::get(plan_catalog_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn level_catalog_endpoint() -> Json<Vec<LevelView>> {
    let ladder = LevelLadder::standard();
    Json(ladder.levels().iter().map(LevelView::from).collect())
}

pub(crate) async fn badge_catalog_endpoint() -> Json<Vec<BadgeView>> {
    let catalog = BadgeCatalog::standard();
    Json(catalog.badges().iter().map(BadgeView::from).collect())
}

pub(crate) async fn plan_catalog_endpoint() -> Json<Vec<SubscriptionPlan>> {
    let catalog = PlanCatalog::standard();
    Json(catalog.plans().to_vec())
}
