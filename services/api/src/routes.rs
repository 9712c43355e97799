use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use org_scoring::scoring::{scoring_router, OrgRepository, OrgScoringService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_scoring_routes<R>(service: Arc<OrgScoringService<R>>) -> axum::Router
where
    R: OrgRepository + 'static,
{
    scoring_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{demo_organizations, InMemoryOrgRepository};
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use org_scoring::scoring::{RuleSetRegistry, ScoringEngine};
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let registry = RuleSetRegistry::builtin().expect("builtin rule sets are valid");
        let engine = Arc::new(ScoringEngine::new(Arc::new(registry)));
        let repository = Arc::new(InMemoryOrgRepository::seeded(demo_organizations()));
        let service = Arc::new(OrgScoringService::new(repository, engine));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_scoring_routes(service).layer(Extension(state))
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).expect("request builds")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let response = app(false)
            .oneshot(get("/ready"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app(true)
            .oneshot(get("/ready"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ready");
    }

    #[tokio::test]
    async fn seeded_org_scoring_is_served() {
        let response = app(true)
            .oneshot(get("/api/v1/orgs/org-riverside-academy/scoring"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["org"]["id"], "org-riverside-academy");
        assert_eq!(body["scoring"]["category"], "private-school");
    }

    #[tokio::test]
    async fn uncategorized_org_has_null_scoring() {
        let response = app(true)
            .oneshot(get("/api/v1/orgs/org-city-library/scoring"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert!(json_body(response).await["scoring"].is_null());
    }

    #[tokio::test]
    async fn leaderboard_ranks_seeded_orgs() {
        let response = app(true)
            .oneshot(get("/api/v1/scoring/leaderboard?limit=2"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let entries = body.as_array().expect("leaderboard is a list");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["orgId"], "org-riverside-academy");
    }

    #[tokio::test]
    async fn metrics_endpoint_serves_text() {
        let response = app(true)
            .oneshot(get("/metrics"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }
}
