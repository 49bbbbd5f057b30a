use chrono::Utc;
use contracts::shared::logger::{LogEntry, LogQuery, LogSource};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use crate::shared::data::db::get_connection;

/// Сколько записей журнала остаётся после очистки при старте
pub const RETAINED_ENTRIES: u64 = 10_000;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "system_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub timestamp: String,
    pub source: String,
    pub category: String,
    pub message: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for LogEntry {
    fn from(m: Model) -> Self {
        LogEntry {
            id: m.id,
            timestamp: m.timestamp,
            source: m.source,
            category: m.category,
            message: m.message,
        }
    }
}

/// Write without awaiting; a failed insert only produces a tracing warning.
pub fn log_event_internal(source: LogSource, category: &str, message: &str) {
    let category = category.to_string();
    let message = message.to_string();

    tokio::spawn(async move {
        if let Err(e) = log_event(source, &category, &message).await {
            tracing::warn!(%category, "system_log insert failed: {}", e);
        }
    });
}

pub async fn log_event(source: LogSource, category: &str, message: &str) -> anyhow::Result<()> {
    ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        timestamp: Set(Utc::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()),
        source: Set(source.as_str().to_string()),
        category: Set(category.trim().to_string()),
        message: Set(message.to_string()),
    }
    .insert(get_connection())
    .await?;
    Ok(())
}

/// Последние записи по фильтру, новые сверху
pub async fn list(query: &LogQuery) -> anyhow::Result<Vec<LogEntry>> {
    let mut select = Entity::find();
    if let Some(source) = query.source {
        select = select.filter(Column::Source.eq(source.as_str()));
    }
    if let Some(category) = query.category_filter() {
        select = select.filter(Column::Category.eq(category));
    }

    let rows = select
        .order_by_desc(Column::Id)
        .limit(query.effective_limit())
        .all(get_connection())
        .await?;
    Ok(rows.into_iter().map(LogEntry::from).collect())
}

/// Удаляет всё, кроме `keep` последних записей. Возвращает число удалённых.
pub async fn prune(keep: u64) -> anyhow::Result<u64> {
    let threshold = Entity::find()
        .order_by_desc(Column::Id)
        .offset(keep)
        .one(get_connection())
        .await?;

    let Some(oldest_dropped) = threshold else {
        return Ok(0);
    };
    let result = Entity::delete_many()
        .filter(Column::Id.lte(oldest_dropped.id))
        .exec(get_connection())
        .await?;
    Ok(result.rows_affected)
}

pub async fn clear_all_logs() -> anyhow::Result<u64> {
    let result = Entity::delete_many().exec(get_connection()).await?;
    Ok(result.rows_affected)
}
