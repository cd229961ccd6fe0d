use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::workers::handlers;
use crate::features::workers::services::WorkerService;

/// Create routes for the workers feature
pub fn routes(service: Arc<WorkerService>) -> Router {
    Router::new()
        .route("/workers", get(handlers::list_workers))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::store::MemoryStore;
    use axum_test::TestServer;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_workers_sorted_by_name() {
        let store = Arc::new(MemoryStore::new());
        store.insert_worker("Zainab").await;
        store.insert_worker("Arjun").await;

        let server = TestServer::new(routes(Arc::new(WorkerService::new(store)))).unwrap();

        let response = server.get("/workers").await;
        response.assert_status_ok();
        response.assert_json(&json!([
            { "id": 2, "name": "Arjun" },
            { "id": 1, "name": "Zainab" }
        ]));
    }
}
