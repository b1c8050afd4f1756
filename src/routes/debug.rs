use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /debug/health - Check if the store and cache are reachable
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut status = json!({
        "status": "ok",
        "checks": {}
    });

    if state.tour_repo.health_check().await {
        status["checks"]["database"] = json!({
            "status": "ok",
            "backend": state.tour_repo.backend_name(),
        });
    } else {
        status["checks"]["database"] = json!({"error": "unreachable"});
        status["status"] = json!("error");
    }

    // A degraded cache does not fail the service
    match state.cache {
        Some(ref cache) => {
            let healthy = cache.health_check().await;
            status["checks"]["cache"] = json!({
                "status": if healthy { "ok" } else { "degraded" },
                "backend": cache.backend_name(),
                "stats": cache.get_stats().await,
            });
        }
        None => {
            status["checks"]["cache"] = json!("disabled");
        }
    }

    Json(status)
}
