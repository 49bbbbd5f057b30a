use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Таблицы справочников (минимальный bootstrap схемы)
const SCHEMA: &[(&str, &str)] = &[
    (
        "a001_cost_center",
        r#"
        CREATE TABLE IF NOT EXISTS a001_cost_center (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            parent_id TEXT,
            manager_id TEXT,
            employee_count INTEGER NOT NULL DEFAULT 0,
            budget REAL NOT NULL DEFAULT 0,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a002_warehouse",
        r#"
        CREATE TABLE IF NOT EXISTS a002_warehouse (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            address TEXT NOT NULL DEFAULT '',
            warehouse_type TEXT NOT NULL DEFAULT 'main',
            capacity REAL NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1,
            manager_id TEXT,
            cost_center_id TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a002_warehouse_stock",
        r#"
        CREATE TABLE IF NOT EXISTS a002_warehouse_stock (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            warehouse_id TEXT NOT NULL,
            item_code TEXT NOT NULL,
            item_name TEXT NOT NULL DEFAULT '',
            quantity REAL NOT NULL DEFAULT 0,
            unit_cost REAL NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a003_employee",
        r#"
        CREATE TABLE IF NOT EXISTS a003_employee (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            position TEXT NOT NULL DEFAULT '',
            is_active INTEGER NOT NULL DEFAULT 1,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "system_log",
        r#"
        CREATE TABLE IF NOT EXISTS system_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            source TEXT NOT NULL,
            category TEXT NOT NULL,
            message TEXT NOT NULL
        );
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_a001_cost_center_parent ON a001_cost_center(parent_id);",
    "CREATE INDEX IF NOT EXISTS idx_a002_warehouse_stock_wh ON a002_warehouse_stock(warehouse_id);",
];

/// Код уникален среди неудалённых записей
const UNIQUE_CODE_INDEXES: &[&str] = &[
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_a001_cost_center_code ON a001_cost_center(code) WHERE is_deleted = 0;",
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_a002_warehouse_code ON a002_warehouse(code) WHERE is_deleted = 0;",
];

/// Построить sqlite URL из пути к файлу (с учётом путей Windows)
pub fn sqlite_url(absolute_path: &std::path::Path) -> String {
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/app.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    let db_url = sqlite_url(&absolute_path);
    tracing::info!("Connecting to database: {}", db_url);
    let conn = Database::connect(&db_url).await?;

    for (table, ddl) in SCHEMA {
        tracing::debug!("Ensuring table {}", table);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            ddl.to_string(),
        ))
        .await?;
    }
    for ddl in INDEXES {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            ddl.to_string(),
        ))
        .await?;
    }
    // A database that already holds duplicate codes still starts; the
    // services reject new duplicates either way.
    for ddl in UNIQUE_CODE_INDEXES {
        if let Err(e) = conn
            .execute(Statement::from_string(DatabaseBackend::Sqlite, ddl.to_string()))
            .await
        {
            tracing::warn!("Unique code index was not created ({}): {}", ddl, e);
        }
    }

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_sqlite_url_unix_path() {
        assert_eq!(
            sqlite_url(Path::new("/var/lib/app.db")),
            "sqlite:///var/lib/app.db?mode=rwc"
        );
    }

    #[test]
    fn test_sqlite_url_windows_path() {
        assert_eq!(
            sqlite_url(Path::new(r"C:\data\app.db")),
            "sqlite:///C:/data/app.db?mode=rwc"
        );
    }

    #[test]
    fn test_unique_code_indexes_cover_live_rows_only() {
        for ddl in UNIQUE_CODE_INDEXES {
            assert!(ddl.contains("UNIQUE INDEX"));
            assert!(ddl.ends_with("WHERE is_deleted = 0;"));
        }
    }

    #[test]
    fn test_schema_has_every_table() {
        let tables: Vec<&str> = SCHEMA.iter().map(|(t, _)| *t).collect();
        assert_eq!(
            tables,
            vec![
                "a001_cost_center",
                "a002_warehouse",
                "a002_warehouse_stock",
                "a003_employee",
                "system_log"
            ]
        );
    }
}
