use serde::{Deserialize, Serialize};

/// Источник записи журнала
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSource {
    Client,
    Server,
}

impl LogSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogSource::Client => "client",
            LogSource::Server => "server",
        }
    }
}

/// Запись журнала событий
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub timestamp: String,
    pub source: String,
    pub category: String,
    pub message: String,
}

/// DTO для создания новой записи журнала
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLogRequest {
    pub source: LogSource,
    pub category: String,
    pub message: String,
}

impl CreateLogRequest {
    pub fn client(category: &str, message: impl Into<String>) -> Self {
        Self {
            source: LogSource::Client,
            category: category.to_string(),
            message: message.into(),
        }
    }
}

/// Параметры GET /api/logs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogQuery {
    #[serde(default)]
    pub source: Option<LogSource>,
    #[serde(default)]
    pub category: Option<String>,
    /// Не больше стольких последних записей
    #[serde(default)]
    pub limit: Option<u64>,
}

impl LogQuery {
    pub const DEFAULT_LIMIT: u64 = 500;

    pub fn effective_limit(&self) -> u64 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT).clamp(1, 10_000)
    }

    /// Пустая или пробельная категория не фильтрует
    pub fn category_filter(&self) -> Option<&str> {
        self.category.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_query_defaults() {
        let q: LogQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.effective_limit(), LogQuery::DEFAULT_LIMIT);
        assert_eq!(q.category_filter(), None);

        let q: LogQuery =
            serde_json::from_str(r#"{"source":"client","category":" ","limit":0}"#).unwrap();
        assert_eq!(q.source, Some(LogSource::Client));
        assert_eq!(q.category_filter(), None);
        assert_eq!(q.effective_limit(), 1);
    }
}
