use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Returns a simple status object for deployment liveness probes.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "interview-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
