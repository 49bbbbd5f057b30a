use axum::{http::StatusCode, Json};
use serde_json::json;

use contracts::domain::a003_employee::aggregate::{Employee, EmployeeDto};

use crate::domain::a003_employee;
use crate::shared::error::log_and_status;

/// GET /api/employee
pub async fn list_all() -> Result<Json<Vec<Employee>>, StatusCode> {
    a003_employee::service::list_all()
        .await
        .map(Json)
        .map_err(|e| log_and_status("list employees", e))
}

/// POST /api/employee
pub async fn upsert(Json(dto): Json<EmployeeDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = match dto.id.clone() {
        Some(id) => a003_employee::service::update(dto).await.map(|_| id),
        None => a003_employee::service::create(dto)
            .await
            .map(|id| id.to_string()),
    };

    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => Err(log_and_status("save employee", e)),
    }
}
