use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use serde_json::json;

use contracts::domain::a001_cost_center::aggregate::{CostCenter, CostCenterDto};
use contracts::domain::a001_cost_center::analysis::CostCenterAnalysis;
use contracts::domain::a001_cost_center::tree::{CostCenterTree, CostCenterTreeQuery};

use crate::domain::a001_cost_center;
use crate::shared::error::{log_and_status, parse_uuid};

/// GET /api/cost_center
pub async fn list_all() -> Result<Json<Vec<CostCenter>>, StatusCode> {
    a001_cost_center::service::list_all()
        .await
        .map(Json)
        .map_err(|e| log_and_status("list cost centers", e))
}

/// GET /api/cost_center/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<CostCenter>, StatusCode> {
    let uuid = parse_uuid(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match a001_cost_center::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(log_and_status("get cost center", e)),
    }
}

/// POST /api/cost_center
pub async fn upsert(Json(dto): Json<CostCenterDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = match dto.id.clone() {
        Some(id) => a001_cost_center::service::update(dto).await.map(|_| id),
        None => a001_cost_center::service::create(dto)
            .await
            .map(|id| id.to_string()),
    };

    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => Err(log_and_status("save cost center", e)),
    }
}

/// DELETE /api/cost_center/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = parse_uuid(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match a001_cost_center::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(log_and_status("delete cost center", e)),
    }
}

/// GET /api/cost_center/analysis
pub async fn analysis() -> Result<Json<CostCenterAnalysis>, StatusCode> {
    a001_cost_center::service::analysis()
        .await
        .map(Json)
        .map_err(|e| log_and_status("cost center analysis", e))
}

/// GET /api/cost_center/tree?search=...&parent=all|has_parent|no_parent
pub async fn tree(Query(query): Query<CostCenterTreeQuery>) -> Result<Json<CostCenterTree>, StatusCode> {
    a001_cost_center::service::tree(&query)
        .await
        .map(Json)
        .map_err(|e| log_and_status("cost center tree", e))
}

/// POST /api/cost_center/testdata
pub async fn insert_test_data() -> Result<Json<serde_json::Value>, StatusCode> {
    match a001_cost_center::service::insert_test_data().await {
        Ok(inserted) => Ok(Json(json!({"inserted": inserted}))),
        Err(e) => Err(log_and_status("cost center test data", e)),
    }
}
