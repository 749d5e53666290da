//! Service status endpoint

use axum::Json;
use serde_json::{Value, json};

/// Root status report; device firmware probes this on boot
pub async fn status() -> Json<Value> {
    Json(json!({
        "status": "aria relay running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": ["/voice"],
    }))
}
