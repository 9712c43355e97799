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

use super::domain::{OrgId, OrgSnapshot};
use super::repository::{OrgRepository, RepositoryError};
use super::service::{OrgScoringService, ScoringServiceError};

const DEFAULT_LEADERBOARD_LIMIT: usize = 20;

/// Router builder exposing scoring and rule set endpoints.
pub fn scoring_router<R>(service: Arc<OrgScoringService<R>>) -> Router
where
    R: OrgRepository + 'static,
{
    Router::new()
        .route("/api/v1/scoring/evaluate", post(evaluate_handler::<R>))
        .route("/api/v1/scoring/leaderboard", get(leaderboard_handler::<R>))
        .route("/api/v1/scoring/rule-sets", get(categories_handler::<R>))
        .route(
            "/api/v1/scoring/rule-sets/:category",
            get(rule_set_handler::<R>),
        )
        .route("/api/v1/orgs/:org_id/scoring", get(org_scoring_handler::<R>))
        .route(
            "/api/v1/orgs/:org_id/scoring/breakdown",
            get(breakdown_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LeaderboardQuery {
    pub(crate) limit: Option<usize>,
}

pub(crate) async fn evaluate_handler<R>(
    State(service): State<Arc<OrgScoringService<R>>>,
    axum::Json(org): axum::Json<OrgSnapshot>,
) -> Response
where
    R: OrgRepository + 'static,
{
    let scoring = service.evaluate(&org);
    let payload = json!({
        "orgId": org.id,
        "scoring": scoring,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn org_scoring_handler<R>(
    State(service): State<Arc<OrgScoringService<R>>>,
    Path(org_id): Path<String>,
) -> Response
where
    R: OrgRepository + 'static,
{
    let id = OrgId(org_id);
    match service.score(&id) {
        Ok(instance) => (StatusCode::OK, axum::Json(instance)).into_response(),
        Err(err) => error_response(&id, err),
    }
}

pub(crate) async fn breakdown_handler<R>(
    State(service): State<Arc<OrgScoringService<R>>>,
    Path(org_id): Path<String>,
) -> Response
where
    R: OrgRepository + 'static,
{
    let id = OrgId(org_id);
    match service.breakdown(&id) {
        Ok(Some(view)) => (StatusCode::OK, axum::Json(view)).into_response(),
        Ok(None) => {
            let payload = json!({
                "orgId": id,
                "error": "no scoring available for this organization",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(&id, err),
    }
}

pub(crate) async fn leaderboard_handler<R>(
    State(service): State<Arc<OrgScoringService<R>>>,
    Query(query): Query<LeaderboardQuery>,
) -> Response
where
    R: OrgRepository + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT);
    match service.leaderboard(limit) {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn categories_handler<R>(
    State(service): State<Arc<OrgScoringService<R>>>,
) -> Response
where
    R: OrgRepository + 'static,
{
    let payload = json!({
        "categories": service.categories(),
        "defaultCategory": service.engine().registry().default_category(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn rule_set_handler<R>(
    State(service): State<Arc<OrgScoringService<R>>>,
    Path(category): Path<String>,
) -> Response
where
    R: OrgRepository + 'static,
{
    match service.rule_set(&category) {
        Some(rule_set) => (StatusCode::OK, axum::Json(rule_set)).into_response(),
        None => {
            let payload = json!({
                "category": category,
                "error": "no rule set registered for category",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

fn error_response(id: &OrgId, err: ScoringServiceError) -> Response {
    match err {
        ScoringServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({
                "orgId": id,
                "error": "organization not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
