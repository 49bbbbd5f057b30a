use crate::domain::common::aggregate_id::normalize_reference;
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WarehouseId(pub Uuid);

impl WarehouseId {
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

impl AggregateId for WarehouseId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(WarehouseId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Тип склада
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarehouseType {
    #[default]
    Main,
    Transit,
    Retail,
    Returns,
}

impl WarehouseType {
    pub const ALL: [WarehouseType; 4] = [
        WarehouseType::Main,
        WarehouseType::Transit,
        WarehouseType::Retail,
        WarehouseType::Returns,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WarehouseType::Main => "main",
            WarehouseType::Transit => "transit",
            WarehouseType::Retail => "retail",
            WarehouseType::Returns => "returns",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WarehouseType::Main => "Основной",
            WarehouseType::Transit => "Транзитный",
            WarehouseType::Retail => "Розничный",
            WarehouseType::Returns => "Склад возвратов",
        }
    }
}

impl FromStr for WarehouseType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WarehouseType::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| anyhow::anyhow!("Unknown warehouse type: {}", s))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    #[serde(flatten)]
    pub base: BaseAggregate<WarehouseId>,

    #[serde(default)]
    pub address: String,

    #[serde(rename = "warehouseType", default)]
    pub warehouse_type: WarehouseType,

    /// Вместимость в единицах хранения
    #[serde(default)]
    pub capacity: f64,

    #[serde(rename = "isActive", default = "default_active")]
    pub is_active: bool,

    #[serde(rename = "managerId", default)]
    pub manager_id: Option<String>,

    /// Центр затрат, на который относятся расходы склада
    #[serde(rename = "costCenterId", default)]
    pub cost_center_id: Option<String>,
}

fn default_active() -> bool {
    true
}

impl Warehouse {
    pub fn new_for_insert(dto: &WarehouseDto, code: String) -> Self {
        let mut aggregate = Self {
            base: BaseAggregate::new(WarehouseId::new_v4(), code, dto.description.clone()),
            address: String::new(),
            warehouse_type: WarehouseType::default(),
            capacity: 0.0,
            is_active: true,
            manager_id: None,
            cost_center_id: None,
        };
        aggregate.update(dto);
        aggregate
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &WarehouseDto) {
        if let Some(code) = dto.code.as_ref() {
            self.base.code = code.trim().to_string();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.address = dto.address.clone();
        self.warehouse_type = dto.warehouse_type;
        self.capacity = dto.capacity;
        self.is_active = dto.is_active;
        self.manager_id = normalize_reference(dto.manager_id.as_deref()).map(str::to_string);
        self.cost_center_id =
            normalize_reference(dto.cost_center_id.as_deref()).map(str::to_string);
    }

    pub fn validate(&self) -> Result<(), String> {
        self.base.validate_identity()?;
        if !self.capacity.is_finite() || self.capacity < 0.0 {
            return Err("Вместимость должна быть неотрицательным числом".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Warehouse {
    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "warehouse"
    }

    fn element_name() -> &'static str {
        "Склад"
    }

    fn list_name() -> &'static str {
        "Склады"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "warehouseType", default)]
    pub warehouse_type: WarehouseType,
    #[serde(default)]
    pub capacity: f64,
    #[serde(rename = "isActive", default = "default_active")]
    pub is_active: bool,
    #[serde(rename = "managerId", default)]
    pub manager_id: Option<String>,
    #[serde(rename = "costCenterId", default)]
    pub cost_center_id: Option<String>,
    pub comment: Option<String>,
}

impl Default for WarehouseDto {
    fn default() -> Self {
        Self {
            id: None,
            code: None,
            description: String::new(),
            address: String::new(),
            warehouse_type: WarehouseType::default(),
            capacity: 0.0,
            is_active: true,
            manager_id: None,
            cost_center_id: None,
            comment: None,
        }
    }
}

impl From<&Warehouse> for WarehouseDto {
    fn from(w: &Warehouse) -> Self {
        Self {
            id: Some(w.to_string_id()),
            code: Some(w.base.code.clone()),
            description: w.base.description.clone(),
            address: w.address.clone(),
            warehouse_type: w.warehouse_type,
            capacity: w.capacity,
            is_active: w.is_active,
            manager_id: w.manager_id.clone(),
            cost_center_id: w.cost_center_id.clone(),
            comment: w.base.comment.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_for_insert_copies_dto() {
        let dto = WarehouseDto {
            description: "Центральный склад".into(),
            address: "Москва, ул. Складская, 1".into(),
            warehouse_type: WarehouseType::Transit,
            capacity: 1200.0,
            manager_id: Some(String::new()),
            ..Default::default()
        };

        let w = Warehouse::new_for_insert(&dto, "WH-001".into());

        assert_eq!(w.base.code, "WH-001");
        assert_eq!(w.warehouse_type, WarehouseType::Transit);
        assert_eq!(w.capacity, 1200.0);
        assert!(w.is_active);
        assert_eq!(w.manager_id, None);
        assert!(w.validate().is_ok());
    }

    #[test]
    fn test_validate_capacity() {
        let dto = WarehouseDto {
            description: "Склад".into(),
            capacity: -5.0,
            ..Default::default()
        };
        assert!(Warehouse::new_for_insert(&dto, "WH".into()).validate().is_err());
    }

    #[test]
    fn test_missing_is_active_defaults_to_true() {
        let dto: WarehouseDto = serde_json::from_str(r#"{"description":"X"}"#).unwrap();
        assert!(dto.is_active);
        assert_eq!(dto.warehouse_type, WarehouseType::Main);
    }

    #[test]
    fn test_parse_warehouse_type() {
        assert_eq!("retail".parse::<WarehouseType>().unwrap(), WarehouseType::Retail);
        assert!("cold".parse::<WarehouseType>().is_err());
    }
}
