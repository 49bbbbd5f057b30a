use crate::domain::common::aggregate_id::normalize_reference;
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate};
use crate::shared::hierarchy::HierarchyRecord;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CostCenterId(pub Uuid);

impl CostCenterId {
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

impl AggregateId for CostCenterId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CostCenterId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCenter {
    #[serde(flatten)]
    pub base: BaseAggregate<CostCenterId>,

    /// Ссылка на родительский центр затрат
    #[serde(rename = "parentId", default)]
    pub parent_id: Option<String>,

    /// Ответственный сотрудник (a003_employee)
    #[serde(rename = "managerId", default)]
    pub manager_id: Option<String>,

    #[serde(rename = "employeeCount", default)]
    pub employee_count: u32,

    /// Годовой бюджет
    #[serde(default)]
    pub budget: f64,
}

impl CostCenter {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        description: String,
        parent_id: Option<String>,
        manager_id: Option<String>,
        employee_count: u32,
        budget: f64,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(CostCenterId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            parent_id,
            manager_id,
            employee_count,
            budget,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &CostCenterDto) {
        if let Some(code) = dto.code.as_ref() {
            self.base.code = code.trim().to_string();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.parent_id = normalize_reference(dto.parent_id.as_deref()).map(str::to_string);
        self.manager_id = normalize_reference(dto.manager_id.as_deref()).map(str::to_string);
        self.employee_count = dto.employee_count;
        self.budget = dto.budget;
    }

    pub fn validate(&self) -> Result<(), String> {
        self.base.validate_identity()?;
        if self.parent_id.as_deref() == Some(self.to_string_id().as_str()) {
            return Err("Центр затрат не может быть родителем самого себя".into());
        }
        if !self.budget.is_finite() || self.budget < 0.0 {
            return Err("Бюджет должен быть неотрицательным числом".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for CostCenter {
    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "cost_center"
    }

    fn element_name() -> &'static str {
        "Центр затрат"
    }

    fn list_name() -> &'static str {
        "Центры затрат"
    }
}

impl HierarchyRecord for CostCenter {
    type Key = String;

    fn key(&self) -> String {
        self.to_string_id()
    }

    fn parent_key(&self) -> Option<String> {
        normalize_reference(self.parent_id.as_deref()).map(str::to_string)
    }

    fn record_code(&self) -> &str {
        &self.base.code
    }

    fn record_name(&self) -> &str {
        &self.base.description
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CostCenterDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    #[serde(rename = "parentId", default)]
    pub parent_id: Option<String>,
    #[serde(rename = "managerId", default)]
    pub manager_id: Option<String>,
    #[serde(rename = "employeeCount", default)]
    pub employee_count: u32,
    #[serde(default)]
    pub budget: f64,
    pub comment: Option<String>,
}

impl From<&CostCenter> for CostCenterDto {
    fn from(c: &CostCenter) -> Self {
        Self {
            id: Some(c.to_string_id()),
            code: Some(c.base.code.clone()),
            description: c.base.description.clone(),
            parent_id: c.parent_id.clone(),
            manager_id: c.manager_id.clone(),
            employee_count: c.employee_count,
            budget: c.budget,
            comment: c.base.comment.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::aggregate_id::NIL_REFERENCE;

    fn center(code: &str, description: &str) -> CostCenter {
        CostCenter::new_for_insert(
            code.to_string(),
            description.to_string(),
            None,
            None,
            3,
            1000.0,
            None,
        )
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        assert!(center("CC-1", "Склад").validate().is_ok());
        assert!(center(" ", "Склад").validate().is_err());
        assert!(center("CC-1", "").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_self_parent_and_negative_budget() {
        let mut c = center("CC-1", "Производство");
        c.parent_id = Some(c.to_string_id());
        assert!(c.validate().is_err());

        let mut c = center("CC-2", "Логистика");
        c.budget = -1.0;
        assert!(c.validate().is_err());
        c.budget = f64::NAN;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_nil_parent_counts_as_root() {
        let mut c = center("CC-1", "Офис");
        c.parent_id = Some(NIL_REFERENCE.to_string());
        assert_eq!(c.parent_key(), None);
        assert!(!c.has_parent());
    }

    #[test]
    fn test_update_from_dto_keeps_code_when_absent() {
        let mut c = center("CC-7", "Old");
        let dto = CostCenterDto {
            id: Some(c.to_string_id()),
            code: None,
            description: "New".into(),
            parent_id: Some(String::new()),
            manager_id: Some("m-1".into()),
            employee_count: 12,
            budget: 5.5,
            comment: Some("note".into()),
        };

        c.update(&dto);

        assert_eq!(c.base.code, "CC-7");
        assert_eq!(c.base.description, "New");
        assert_eq!(c.parent_id, None);
        assert_eq!(c.manager_id.as_deref(), Some("m-1"));
        assert_eq!(c.employee_count, 12);
    }

    #[test]
    fn test_json_uses_dashboard_field_names() {
        let mut c = center("CC-1", "Офис");
        c.parent_id = Some("p".into());
        let value = serde_json::to_value(&c).unwrap();
        assert_eq!(value["parentId"], "p");
        assert_eq!(value["employeeCount"], 3);
        assert_eq!(value["code"], "CC-1");

        let back: CostCenter = serde_json::from_value(value).unwrap();
        assert_eq!(back, c);
    }
}
