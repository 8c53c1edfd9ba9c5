use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ContentType, Feature};
use super::service::EntitlementService;
use super::store::{StoreError, SubscriptionStore};
use crate::identity::{IdentityProvider, UserId};

/// Router builder exposing HTTP endpoints for entitlement questions.
pub fn entitlement_router<S, I>(service: Arc<EntitlementService<S, I>>) -> Router
where
    S: SubscriptionStore + 'static,
    I: IdentityProvider + 'static,
{
    Router::new()
        .route(
            "/api/v1/users/:user_id/entitlements",
            get(summary_handler::<S, I>),
        )
        .route(
            "/api/v1/users/:user_id/entitlements/features/:feature",
            get(feature_handler::<S, I>),
        )
        .route(
            "/api/v1/users/:user_id/entitlements/content/:content_type",
            get(content_handler::<S, I>),
        )
        .route(
            "/api/v1/users/:user_id/entitlements/credits",
            post(use_credit_handler::<S, I>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentQuery {
    #[serde(default)]
    pub(crate) current: u32,
}

fn store_error_response(error: StoreError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
}

pub(crate) async fn summary_handler<S, I>(
    State(service): State<Arc<EntitlementService<S, I>>>,
    Path(user_id): Path<String>,
) -> Response
where
    S: SubscriptionStore + 'static,
    I: IdentityProvider + 'static,
{
    let user_id = UserId(user_id);
    match service.summary(&user_id) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => store_error_response(error),
    }
}

pub(crate) async fn feature_handler<S, I>(
    State(service): State<Arc<EntitlementService<S, I>>>,
    Path((user_id, feature)): Path<(String, String)>,
) -> Response
where
    S: SubscriptionStore + 'static,
    I: IdentityProvider + 'static,
{
    let Some(feature) = Feature::parse(&feature) else {
        let payload = json!({ "error": format!("unknown feature '{feature}'") });
        return (StatusCode::NOT_FOUND, axum::Json(payload)).into_response();
    };

    let user_id = UserId(user_id);
    match service.has_feature(&user_id, feature) {
        Ok(allowed) => {
            let payload = json!({ "feature": feature.label(), "allowed": allowed });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => store_error_response(error),
    }
}

pub(crate) async fn content_handler<S, I>(
    State(service): State<Arc<EntitlementService<S, I>>>,
    Path((user_id, content_type)): Path<(String, String)>,
    Query(query): Query<ContentQuery>,
) -> Response
where
    S: SubscriptionStore + 'static,
    I: IdentityProvider + 'static,
{
    let Some(content) = ContentType::parse(&content_type) else {
        let payload = json!({ "error": format!("unknown content type '{content_type}'") });
        return (StatusCode::NOT_FOUND, axum::Json(payload)).into_response();
    };

    let user_id = UserId(user_id);
    match service.may_add(&user_id, content, query.current) {
        Ok(allowed) => {
            let payload = json!({
                "content_type": content.label(),
                "current": query.current,
                "allowed": allowed,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => store_error_response(error),
    }
}

pub(crate) async fn use_credit_handler<S, I>(
    State(service): State<Arc<EntitlementService<S, I>>>,
    Path(user_id): Path<String>,
) -> Response
where
    S: SubscriptionStore + 'static,
    I: IdentityProvider + 'static,
{
    let user_id = UserId(user_id);
    match service.use_credit(&user_id) {
        Ok(outcome) if outcome.accepted => {
            (StatusCode::OK, axum::Json(outcome)).into_response()
        }
        Ok(outcome) => {
            // A rejected debit is a normal answer; the client renders an
            // upgrade prompt from this payload.
            let payload = json!({
                "accepted": false,
                "credits_remaining": outcome.subscription.credits_remaining,
                "upgrade_hint": "AI design credits come with the Premium plan",
            });
            (StatusCode::PAYMENT_REQUIRED, axum::Json(payload)).into_response()
        }
        Err(error) => store_error_response(error),
    }
}
