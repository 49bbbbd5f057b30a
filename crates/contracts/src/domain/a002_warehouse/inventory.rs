use super::aggregate::Warehouse;
use serde::{Deserialize, Serialize};

/// Строка остатков на складе
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLine {
    #[serde(rename = "itemCode")]
    pub item_code: String,
    #[serde(rename = "itemName")]
    pub item_name: String,
    pub quantity: f64,
    #[serde(rename = "unitCost")]
    pub unit_cost: f64,
}

impl StockLine {
    pub fn value(&self) -> f64 {
        self.quantity * self.unit_cost
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.item_code.trim().is_empty() {
            return Err("Код номенклатуры не может быть пустым".into());
        }
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(format!("Отрицательный остаток: {}", self.item_code));
        }
        if !self.unit_cost.is_finite() || self.unit_cost < 0.0 {
            return Err(format!("Отрицательная себестоимость: {}", self.item_code));
        }
        Ok(())
    }
}

/// Тело PUT /api/warehouse/:id/inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StockLinesDto {
    pub lines: Vec<StockLine>,
}

impl StockLinesDto {
    pub fn validate(&self) -> Result<(), String> {
        for line in &self.lines {
            line.validate()?;
        }
        let mut codes: Vec<&str> = self.lines.iter().map(|l| l.item_code.trim()).collect();
        codes.sort_unstable();
        if let Some(pair) = codes.windows(2).find(|p| p[0] == p[1]) {
            return Err(format!("Номенклатура указана дважды: {}", pair[0]));
        }
        Ok(())
    }
}

/// Снимок остатков склада
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    #[serde(rename = "warehouseId")]
    pub warehouse_id: String,
    #[serde(rename = "warehouseCode")]
    pub warehouse_code: String,
    #[serde(rename = "warehouseName")]
    pub warehouse_name: String,
    pub capacity: f64,
    pub lines: Vec<StockLine>,
    #[serde(rename = "totalQuantity")]
    pub total_quantity: f64,
    #[serde(rename = "totalValue")]
    pub total_value: f64,
    /// Заполненность в процентах; None, если вместимость не задана
    #[serde(rename = "utilizationPercent")]
    pub utilization_percent: Option<f64>,
    #[serde(rename = "takenAt")]
    pub taken_at: chrono::DateTime<chrono::Utc>,
}

impl InventorySnapshot {
    /// Lines are ordered by item code.
    pub fn build(warehouse: &Warehouse, mut lines: Vec<StockLine>) -> Self {
        lines.sort_by(|a, b| a.item_code.cmp(&b.item_code));
        let total_quantity: f64 = lines.iter().map(|l| l.quantity).sum();
        let total_value: f64 = lines.iter().map(StockLine::value).sum();
        let utilization_percent = if warehouse.capacity > 0.0 {
            Some(total_quantity * 100.0 / warehouse.capacity)
        } else {
            None
        };

        Self {
            warehouse_id: warehouse.to_string_id(),
            warehouse_code: warehouse.base.code.clone(),
            warehouse_name: warehouse.base.description.clone(),
            capacity: warehouse.capacity,
            lines,
            total_quantity,
            total_value,
            utilization_percent,
            taken_at: chrono::Utc::now(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_over_capacity(&self) -> bool {
        self.utilization_percent.is_some_and(|p| p > 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_warehouse::aggregate::WarehouseDto;

    fn line(code: &str, quantity: f64, unit_cost: f64) -> StockLine {
        StockLine {
            item_code: code.into(),
            item_name: format!("Товар {}", code),
            quantity,
            unit_cost,
        }
    }

    fn warehouse(capacity: f64) -> Warehouse {
        let dto = WarehouseDto {
            description: "Склад".into(),
            capacity,
            ..Default::default()
        };
        Warehouse::new_for_insert(&dto, "WH-1".into())
    }

    #[test]
    fn test_snapshot_totals_and_utilization() {
        let snapshot = InventorySnapshot::build(
            &warehouse(200.0),
            vec![line("B-2", 50.0, 10.0), line("A-1", 30.0, 2.5)],
        );

        assert_eq!(snapshot.line_count(), 2);
        assert_eq!(snapshot.lines[0].item_code, "A-1");
        assert_eq!(snapshot.total_quantity, 80.0);
        assert_eq!(snapshot.total_value, 575.0);
        assert_eq!(snapshot.utilization_percent, Some(40.0));
        assert!(!snapshot.is_over_capacity());
    }

    #[test]
    fn test_snapshot_without_capacity() {
        let snapshot = InventorySnapshot::build(&warehouse(0.0), vec![line("A", 1.0, 1.0)]);
        assert_eq!(snapshot.utilization_percent, None);
        assert!(!snapshot.is_over_capacity());
    }

    #[test]
    fn test_over_capacity() {
        let snapshot = InventorySnapshot::build(&warehouse(10.0), vec![line("A", 11.0, 1.0)]);
        assert!(snapshot.is_over_capacity());
    }

    #[test]
    fn test_lines_validation() {
        let ok = StockLinesDto {
            lines: vec![line("A", 1.0, 1.0), line("B", 0.0, 0.0)],
        };
        assert!(ok.validate().is_ok());

        let negative = StockLinesDto {
            lines: vec![line("A", -1.0, 1.0)],
        };
        assert!(negative.validate().is_err());

        let duplicate = StockLinesDto {
            lines: vec![line("A", 1.0, 1.0), line(" A ", 2.0, 1.0)],
        };
        assert!(duplicate.validate().is_err());
    }
}
