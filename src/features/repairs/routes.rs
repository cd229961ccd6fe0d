use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::repairs::handlers;
use crate::features::repairs::services::RepairService;

/// Create routes for the repairs feature
pub fn routes(service: Arc<RepairService>) -> Router {
    Router::new()
        .route("/repair/{id}", get(handlers::get_repair))
        .route(
            "/repair/{id}/transitions",
            get(handlers::get_repair_transitions),
        )
        .route("/update-repair/{id}", post(handlers::update_repair))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RepairConfig;
    use crate::features::repairs::RepairLifecycle;
    use crate::modules::store::MemoryStore;
    use crate::shared::test_helpers::sample_hazard;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    async fn server_with(config: RepairConfig) -> (TestServer, Arc<MemoryStore>, i64) {
        let store = Arc::new(MemoryStore::new());
        let hazard = store.insert_hazard(sample_hazard(None)).await;
        let service = Arc::new(RepairService::new(
            store.clone(),
            RepairLifecycle::new(config),
        ));
        let server = TestServer::new(routes(service)).unwrap();
        (server, store, hazard.id)
    }

    #[tokio::test]
    async fn test_update_repair_success_envelope() {
        let (server, _, id) = server_with(RepairConfig::default()).await;

        let response = server
            .post(&format!("/update-repair/{}", id))
            .json(&json!({ "status": "assigned", "worker_id": 7 }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["id"], id);
        assert_eq!(body["data"]["stage"], "assigned");
        assert_eq!(body["data"]["worker_id"], 7);
        assert!(body["data"]["team_assigned_at"].is_string());
        assert!(body["data"]["in_progress_at"].is_null());
    }

    #[tokio::test]
    async fn test_duplicate_update_is_400() {
        let (server, _, id) = server_with(RepairConfig::default()).await;
        let path = format!("/update-repair/{}", id);

        server
            .post(&path)
            .json(&json!({ "status": "completed" }))
            .await
            .assert_status_ok();

        let response = server
            .post(&path)
            .json(&json!({ "status": "completed" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "success": false, "error": "Already completed" }));

        let backward = server
            .post(&path)
            .json(&json!({ "status": "in_progress" }))
            .await;
        backward.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_blank_refs_still_advance_and_keep_existing_values() {
        let (server, _, id) = server_with(RepairConfig::default()).await;
        let path = format!("/update-repair/{}", id);

        let fresh = server
            .post(&path)
            .json(&json!({ "status": "assigned", "photo_url": "" }))
            .await;
        fresh.assert_status_ok();
        let body: Value = fresh.json();
        assert!(body["data"]["team_assigned_at"].is_string());
        assert!(body["data"]["photo_url"].is_null());

        server
            .post(&path)
            .json(&json!({ "status": "in_progress", "worker_id": 7, "photo_url": "repairs/before.jpg" }))
            .await
            .assert_status_ok();

        let response = server
            .post(&path)
            .json(&json!({ "status": "completed", "worker_id": 0, "photo_url": "" }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["stage"], "completed");
        assert_eq!(body["data"]["worker_id"], 7);
        assert_eq!(body["data"]["photo_url"], "repairs/before.jpg");
    }

    #[tokio::test]
    async fn test_update_missing_tracker_is_404() {
        let (server, _, _) = server_with(RepairConfig::default()).await;

        let response = server
            .post("/update-repair/999")
            .json(&json!({ "status": "assigned" }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["error"], "No repair entry found for hazard 999");
    }

    #[tokio::test]
    async fn test_update_rejects_bad_input() {
        let (server, _, id) = server_with(RepairConfig::default()).await;
        let path = format!("/update-repair/{}", id);

        server
            .post(&path)
            .json(&json!({ "status": "teleported" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .post(&path)
            .json(&json!({ "worker_id": 1 }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .post("/update-repair/abc")
            .json(&json!({ "status": "assigned" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_store_failure_is_500_with_message() {
        let (server, store, id) = server_with(RepairConfig::default()).await;
        store.set_failure(Some("connection reset".to_string())).await;

        let response = server
            .post(&format!("/update-repair/{}", id))
            .json(&json!({ "status": "assigned" }))
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "success": false, "error": "connection reset" }));
    }

    #[tokio::test]
    async fn test_get_repair_is_stable_and_empty_when_missing() {
        let (server, _, id) = server_with(RepairConfig::default()).await;
        let path = format!("/repair/{}", id);

        let first: Value = server.get(&path).await.json();
        let second: Value = server.get(&path).await.json();
        assert_eq!(first, second);
        assert_eq!(first["stage"], "reported");

        let missing = server.get("/repair/12345").await;
        missing.assert_status_ok();
        missing.assert_json(&json!({}));
    }

    #[tokio::test]
    async fn test_transitions_follow_lifecycle() {
        let (server, _, id) = server_with(RepairConfig {
            allow_stage_skip: false,
            enable_on_the_way: true,
        })
        .await;

        let body: Value = server
            .get(&format!("/repair/{}/transitions", id))
            .await
            .json();
        assert_eq!(body["current_stage"], "reported");
        assert_eq!(body["allowed"], json!(["assigned"]));
        assert_eq!(
            body["stages"],
            json!(["reported", "assigned", "on_the_way", "in_progress", "completed"])
        );

        server
            .get("/repair/777/transitions")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
