use crate::shared::api_utils::get_json;
use contracts::domain::a003_employee::aggregate::{name_lookup, Employee};
use contracts::domain::common::AggregateRoot;
use std::collections::HashMap;

pub async fn fetch_all() -> Result<Vec<Employee>, String> {
    get_json(&Employee::api_path()).await
}

/// Id → ФИО; при ошибке загрузки ответственные просто не подставляются
pub async fn fetch_name_lookup() -> HashMap<String, String> {
    match fetch_all().await {
        Ok(list) => name_lookup(&list),
        Err(e) => {
            log::warn!("Не удалось загрузить сотрудников: {}", e);
            HashMap::new()
        }
    }
}
