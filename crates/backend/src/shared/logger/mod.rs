pub mod repository;

use contracts::shared::logger::LogSource;
use repository::log_event_internal;

/// Логирование события на сервере в таблицу system_log
///
/// ```ignore
/// logger::log("startup", "Сервер запущен");
/// logger::log("cost_center", "Центр затрат CC-010 сохранён");
/// ```
pub fn log(category: &str, message: &str) {
    log_event_internal(LogSource::Server, category, message);
}
