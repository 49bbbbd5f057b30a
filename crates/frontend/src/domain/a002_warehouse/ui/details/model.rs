use crate::shared::api_utils::{delete, get_json, post_empty, send_json};
use contracts::domain::a002_warehouse::aggregate::{Warehouse, WarehouseDto};
use contracts::domain::a002_warehouse::inventory::{InventorySnapshot, StockLinesDto};
use contracts::domain::a002_warehouse::list::WarehouseSummary;
use contracts::domain::common::AggregateRoot;
use serde::Deserialize;

#[derive(Deserialize)]
struct SavedId {
    id: String,
}

pub async fn fetch_all() -> Result<Vec<Warehouse>, String> {
    get_json(&Warehouse::api_path()).await
}

pub async fn fetch_by_id(id: String) -> Result<Warehouse, String> {
    get_json(&format!("{}/{}", Warehouse::api_path(), id)).await
}

pub async fn fetch_summary() -> Result<WarehouseSummary, String> {
    get_json(&format!("{}/summary", Warehouse::api_path())).await
}

pub async fn fetch_inventory(id: &str) -> Result<InventorySnapshot, String> {
    get_json(&format!("{}/{}/inventory", Warehouse::api_path(), id)).await
}

/// Полная замена остатков; сервер возвращает новый снимок
pub async fn replace_inventory(id: &str, lines: &StockLinesDto) -> Result<InventorySnapshot, String> {
    send_json("PUT", &format!("{}/{}/inventory", Warehouse::api_path(), id), lines).await
}

pub async fn save_form(dto: &WarehouseDto) -> Result<String, String> {
    let saved: SavedId = send_json("POST", &Warehouse::api_path(), dto).await?;
    Ok(saved.id)
}

pub async fn delete_by_id(id: &str) -> Result<(), String> {
    delete(&format!("{}/{}", Warehouse::api_path(), id)).await
}

pub async fn insert_test_data() -> Result<(), String> {
    post_empty(&format!("{}/testdata", Warehouse::api_path())).await
}
