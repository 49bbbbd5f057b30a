use super::{repository, stock_repository};
use crate::shared::error::ServiceError;
use crate::shared::logger;
use contracts::domain::a002_warehouse::aggregate::{Warehouse, WarehouseDto, WarehouseType};
use contracts::domain::a002_warehouse::inventory::{InventorySnapshot, StockLine, StockLinesDto};
use contracts::domain::a002_warehouse::list::{
    filter_warehouses, summarize, WarehouseFilter, WarehouseSummary,
};
use contracts::domain::common::AggregateRoot;
use uuid::Uuid;

pub async fn create(dto: WarehouseDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("WH-{}", &Uuid::new_v4().simple().to_string()[..8]));
    let mut aggregate = Warehouse::new_for_insert(&dto, code);

    aggregate.validate().map_err(ServiceError::Validation)?;
    check_code_free(&aggregate).await?;
    aggregate.before_write();

    let id = repository::insert(&aggregate).await?;
    logger::log(&Warehouse::full_name(), &format!("Создан склад {}", aggregate.base.code));
    Ok(id)
}

pub async fn update(dto: WarehouseDto) -> anyhow::Result<()> {
    let raw_id = dto.id.clone().unwrap_or_default();
    let id = Uuid::parse_str(raw_id.trim()).map_err(|_| ServiceError::InvalidId(raw_id))?;

    let mut aggregate = get_existing(id).await?;
    aggregate.update(&dto);

    aggregate.validate().map_err(ServiceError::Validation)?;
    check_code_free(&aggregate).await?;
    aggregate.before_write();

    repository::update(&aggregate).await?;
    logger::log(&Warehouse::full_name(), &format!("Изменён склад {}", aggregate.base.code));
    Ok(())
}

async fn check_code_free(aggregate: &Warehouse) -> anyhow::Result<()> {
    let holder = repository::get_by_code(&aggregate.base.code).await?;
    aggregate
        .base
        .ensure_code_free(holder.as_ref().map(|h| &h.base))
        .map_err(ServiceError::Validation)?;
    Ok(())
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    let deleted = repository::soft_delete(id).await?;
    if deleted {
        logger::log(&Warehouse::full_name(), &format!("Удалён склад {}", id));
    }
    Ok(deleted)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Warehouse>> {
    Ok(repository::get_by_id(id)
        .await?
        .filter(|w| !w.base.metadata.is_deleted))
}

async fn get_existing(id: Uuid) -> anyhow::Result<Warehouse> {
    let warehouse = get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("{} {}", Warehouse::element_name(), id)))?;
    Ok(warehouse)
}

pub async fn list(filter: &WarehouseFilter) -> anyhow::Result<Vec<Warehouse>> {
    let items = repository::list_all().await?;
    Ok(filter_warehouses(&items, filter))
}

pub async fn summary() -> anyhow::Result<WarehouseSummary> {
    let items = repository::list_all().await?;
    Ok(summarize(&items))
}

pub async fn inventory(id: Uuid) -> anyhow::Result<InventorySnapshot> {
    let warehouse = get_existing(id).await?;
    let lines = stock_repository::list_by_warehouse(&warehouse.to_string_id()).await?;
    Ok(InventorySnapshot::build(&warehouse, lines))
}

pub async fn replace_inventory(id: Uuid, dto: StockLinesDto) -> anyhow::Result<InventorySnapshot> {
    let warehouse = get_existing(id).await?;
    dto.validate().map_err(ServiceError::Validation)?;

    stock_repository::replace_for_warehouse(&warehouse.to_string_id(), &dto.lines).await?;
    logger::log(
        &Warehouse::full_name(),
        &format!(
            "Остатки склада {} заменены: {} строк",
            warehouse.base.code,
            dto.lines.len()
        ),
    );
    Ok(InventorySnapshot::build(&warehouse, dto.lines))
}

fn stock(code: &str, name: &str, quantity: f64, unit_cost: f64) -> StockLine {
    StockLine {
        item_code: code.into(),
        item_name: name.into(),
        quantity,
        unit_cost,
    }
}

fn seed() -> Vec<(WarehouseDto, Vec<StockLine>)> {
    let warehouse = |code: &str, name: &str, address: &str, t: WarehouseType, capacity: f64| {
        WarehouseDto {
            code: Some(code.into()),
            description: name.into(),
            address: address.into(),
            warehouse_type: t,
            capacity,
            ..Default::default()
        }
    };

    vec![
        (
            warehouse("WH-MAIN", "Центральный склад", "Москва, ул. Складская, 1", WarehouseType::Main, 5000.0),
            vec![
                stock("NM-001", "Коробка картонная 40x30", 1200.0, 18.5),
                stock("NM-002", "Плёнка стрейч", 340.0, 420.0),
                stock("NM-010", "Паллета деревянная", 150.0, 650.0),
            ],
        ),
        (
            warehouse("WH-TR1", "Транзитный склад Север", "Химки, Ленинградское ш., 12", WarehouseType::Transit, 800.0),
            vec![stock("NM-001", "Коробка картонная 40x30", 300.0, 18.5)],
        ),
        (
            warehouse("WH-RET", "Магазин на Тверской", "Москва, Тверская, 7", WarehouseType::Retail, 120.0),
            Vec::new(),
        ),
        (
            WarehouseDto {
                is_active: false,
                ..warehouse("WH-RTN", "Склад возвратов", "Подольск, ул. Заводская, 3", WarehouseType::Returns, 400.0)
            },
            vec![stock("NM-002", "Плёнка стрейч", 12.0, 420.0)],
        ),
    ]
}

/// Демонстрационные склады с остатками; уже существующие коды пропускаются
pub async fn insert_test_data() -> anyhow::Result<usize> {
    let mut inserted = 0;
    for (dto, lines) in seed() {
        if let Some(code) = dto.code.as_deref() {
            if repository::get_by_code(code).await?.is_some() {
                continue;
            }
        }
        let id = create(dto).await?;
        stock_repository::replace_for_warehouse(&id.to_string(), &lines).await?;
        inserted += 1;
    }
    tracing::info!("Warehouse test data: {} records inserted", inserted);
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_valid() {
        for (dto, lines) in seed() {
            let code = dto.code.clone().unwrap_or_default();
            assert!(Warehouse::new_for_insert(&dto, code).validate().is_ok());
            assert!(StockLinesDto { lines }.validate().is_ok());
        }
    }
}
