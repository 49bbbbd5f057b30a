use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub Uuid);

impl EmployeeId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for EmployeeId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(EmployeeId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Сотрудник. Для центров затрат и складов используется только как справочник ответственных.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(flatten)]
    pub base: BaseAggregate<EmployeeId>,

    #[serde(default)]
    pub position: String,

    #[serde(rename = "isActive", default)]
    pub is_active: bool,
}

impl Employee {
    pub fn new_for_insert(code: String, full_name: String, position: String) -> Self {
        Self {
            base: BaseAggregate::new(EmployeeId::new_v4(), code, full_name),
            position,
            is_active: true,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &EmployeeDto) {
        if let Some(code) = dto.code.as_ref() {
            self.base.code = code.trim().to_string();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.position = dto.position.clone();
        self.is_active = dto.is_active;
    }

    pub fn validate(&self) -> Result<(), String> {
        self.base.validate_identity()
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Employee {
    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "employee"
    }

    fn element_name() -> &'static str {
        "Сотрудник"
    }

    fn list_name() -> &'static str {
        "Сотрудники"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EmployeeDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    #[serde(default)]
    pub position: String,
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
    pub comment: Option<String>,
}

/// Id → ФИО для подстановки ответственных в таблицы
pub fn name_lookup(employees: &[Employee]) -> HashMap<String, String> {
    employees
        .iter()
        .map(|e| (e.to_string_id(), e.base.description.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_lookup() {
        let a = Employee::new_for_insert("E-1".into(), "Иванов И.И.".into(), "Кладовщик".into());
        let b = Employee::new_for_insert("E-2".into(), "Петров П.П.".into(), "Экономист".into());
        let lookup = name_lookup(&[a.clone(), b]);

        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get(&a.to_string_id()).map(String::as_str), Some("Иванов И.И."));
        assert_eq!(lookup.get("unknown"), None);
    }
}
