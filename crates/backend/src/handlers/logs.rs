use axum::{extract::Query, http::StatusCode, Json};

use contracts::shared::logger::{CreateLogRequest, LogEntry, LogQuery};

use crate::shared::error::log_and_status;
use crate::shared::logger;

/// GET /api/logs?source=client&category=...&limit=100
pub async fn list_all(Query(query): Query<LogQuery>) -> Result<Json<Vec<LogEntry>>, StatusCode> {
    logger::repository::list(&query)
        .await
        .map(Json)
        .map_err(|e| log_and_status("list logs", e))
}

/// POST /api/logs
pub async fn create(Json(req): Json<CreateLogRequest>) -> StatusCode {
    match logger::repository::log_event(req.source, &req.category, &req.message).await {
        Ok(_) => StatusCode::OK,
        Err(e) => log_and_status("write log", e),
    }
}

/// DELETE /api/logs
pub async fn clear_all() -> StatusCode {
    match logger::repository::clear_all_logs().await {
        Ok(removed) => {
            tracing::info!("system_log cleared, {} entries removed", removed);
            StatusCode::OK
        }
        Err(e) => log_and_status("clear logs", e),
    }
}
