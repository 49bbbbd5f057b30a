use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use serde_json::json;

use contracts::domain::a002_warehouse::aggregate::{Warehouse, WarehouseDto};
use contracts::domain::a002_warehouse::inventory::{InventorySnapshot, StockLinesDto};
use contracts::domain::a002_warehouse::list::{WarehouseFilter, WarehouseSummary};

use crate::domain::a002_warehouse;
use crate::shared::error::{log_and_status, parse_uuid};

/// GET /api/warehouse?search=...&warehouseType=...&activeOnly=true
pub async fn list_all(
    Query(filter): Query<WarehouseFilter>,
) -> Result<Json<Vec<Warehouse>>, StatusCode> {
    a002_warehouse::service::list(&filter)
        .await
        .map(Json)
        .map_err(|e| log_and_status("list warehouses", e))
}

/// GET /api/warehouse/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Warehouse>, StatusCode> {
    let uuid = parse_uuid(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match a002_warehouse::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(log_and_status("get warehouse", e)),
    }
}

/// POST /api/warehouse
pub async fn upsert(Json(dto): Json<WarehouseDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = match dto.id.clone() {
        Some(id) => a002_warehouse::service::update(dto).await.map(|_| id),
        None => a002_warehouse::service::create(dto)
            .await
            .map(|id| id.to_string()),
    };

    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => Err(log_and_status("save warehouse", e)),
    }
}

/// DELETE /api/warehouse/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = parse_uuid(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match a002_warehouse::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(log_and_status("delete warehouse", e)),
    }
}

/// GET /api/warehouse/summary
pub async fn summary() -> Result<Json<WarehouseSummary>, StatusCode> {
    a002_warehouse::service::summary()
        .await
        .map(Json)
        .map_err(|e| log_and_status("warehouse summary", e))
}

/// GET /api/warehouse/:id/inventory
pub async fn get_inventory(Path(id): Path<String>) -> Result<Json<InventorySnapshot>, StatusCode> {
    let uuid = parse_uuid(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    a002_warehouse::service::inventory(uuid)
        .await
        .map(Json)
        .map_err(|e| log_and_status("warehouse inventory", e))
}

/// PUT /api/warehouse/:id/inventory
pub async fn replace_inventory(
    Path(id): Path<String>,
    Json(dto): Json<StockLinesDto>,
) -> Result<Json<InventorySnapshot>, StatusCode> {
    let uuid = parse_uuid(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    a002_warehouse::service::replace_inventory(uuid, dto)
        .await
        .map(Json)
        .map_err(|e| log_and_status("replace warehouse inventory", e))
}

/// POST /api/warehouse/testdata
pub async fn insert_test_data() -> Result<Json<serde_json::Value>, StatusCode> {
    match a002_warehouse::service::insert_test_data().await {
        Ok(inserted) => Ok(Json(json!({"inserted": inserted}))),
        Err(e) => Err(log_and_status("warehouse test data", e)),
    }
}
