//! Остатки номенклатуры по складу (таблица a002_warehouse_stock)

use contracts::domain::a002_warehouse::inventory::StockLine;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a002_warehouse_stock")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub warehouse_id: String,
    pub item_code: String,
    pub item_name: String,
    pub quantity: f64,
    pub unit_cost: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for StockLine {
    fn from(m: Model) -> Self {
        StockLine {
            item_code: m.item_code,
            item_name: m.item_name,
            quantity: m.quantity,
            unit_cost: m.unit_cost,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_by_warehouse(warehouse_id: &str) -> anyhow::Result<Vec<StockLine>> {
    let lines = Entity::find()
        .filter(Column::WarehouseId.eq(warehouse_id))
        .order_by_asc(Column::ItemCode)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(lines)
}

/// Полная замена остатков склада одной транзакцией
pub async fn replace_for_warehouse(warehouse_id: &str, lines: &[StockLine]) -> anyhow::Result<()> {
    let txn = conn().begin().await?;

    Entity::delete_many()
        .filter(Column::WarehouseId.eq(warehouse_id))
        .exec(&txn)
        .await?;

    for line in lines {
        let active = ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            warehouse_id: Set(warehouse_id.to_string()),
            item_code: Set(line.item_code.trim().to_string()),
            item_name: Set(line.item_name.clone()),
            quantity: Set(line.quantity),
            unit_cost: Set(line.unit_cost),
        };
        active.insert(&txn).await?;
    }

    txn.commit().await?;
    Ok(())
}
