use crate::shared::api_utils::{delete, get_json, post_empty, send_json};
use contracts::domain::a001_cost_center::aggregate::{CostCenter, CostCenterDto};
use contracts::domain::a001_cost_center::analysis::CostCenterAnalysis;
use contracts::domain::common::AggregateRoot;
use serde::Deserialize;

#[derive(Deserialize)]
struct SavedId {
    id: String,
}

pub async fn fetch_all() -> Result<Vec<CostCenter>, String> {
    get_json(&CostCenter::api_path()).await
}

pub async fn fetch_by_id(id: String) -> Result<CostCenter, String> {
    get_json(&format!("{}/{}", CostCenter::api_path(), id)).await
}

pub async fn fetch_analysis() -> Result<CostCenterAnalysis, String> {
    get_json(&format!("{}/analysis", CostCenter::api_path())).await
}

/// Сохраняет форму и возвращает id записи
pub async fn save_form(dto: &CostCenterDto) -> Result<String, String> {
    let saved: SavedId = send_json("POST", &CostCenter::api_path(), dto).await?;
    Ok(saved.id)
}

pub async fn delete_by_id(id: &str) -> Result<(), String> {
    delete(&format!("{}/{}", CostCenter::api_path(), id)).await
}

pub async fn insert_test_data() -> Result<(), String> {
    post_empty(&format!("{}/testdata", CostCenter::api_path())).await
}
