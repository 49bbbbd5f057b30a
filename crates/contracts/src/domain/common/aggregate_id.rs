use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Пустой GUID из 1С, эквивалент NULL в ссылках
pub const NIL_REFERENCE: &str = "00000000-0000-0000-0000-000000000000";

/// Трейт для типов идентификаторов агрегатов
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Преобразовать ID в строку
    fn as_string(&self) -> String;

    /// Создать ID из строки
    fn from_string(s: &str) -> Result<Self, String>;
}

impl AggregateId for uuid::Uuid {
    fn as_string(&self) -> String {
        ToString::to_string(self)
    }

    fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s).map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Normalizes a stored reference to another aggregate.
///
/// Empty strings, whitespace and the nil GUID all mean "no reference".
pub fn normalize_reference(value: Option<&str>) -> Option<&str> {
    match value.map(str::trim) {
        None | Some("") => None,
        Some(v) if v == NIL_REFERENCE => None,
        Some(v) => Some(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_reference() {
        assert_eq!(normalize_reference(None), None);
        assert_eq!(normalize_reference(Some("  ")), None);
        assert_eq!(normalize_reference(Some(NIL_REFERENCE)), None);
        assert_eq!(normalize_reference(Some(" abc ")), Some("abc"));
    }
}
