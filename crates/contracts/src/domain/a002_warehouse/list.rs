use super::aggregate::{Warehouse, WarehouseType};
use serde::{Deserialize, Serialize};

/// Фильтр списка складов
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WarehouseFilter {
    #[serde(default)]
    pub search: String,
    #[serde(rename = "warehouseType", default)]
    pub warehouse_type: Option<WarehouseType>,
    #[serde(rename = "activeOnly", default)]
    pub active_only: bool,
}

impl WarehouseFilter {
    pub fn matches(&self, w: &Warehouse) -> bool {
        if self.active_only && !w.is_active {
            return false;
        }
        if let Some(t) = self.warehouse_type {
            if w.warehouse_type != t {
                return false;
            }
        }
        let term = self.search.trim().to_lowercase();
        term.is_empty()
            || w.base.code.to_lowercase().contains(&term)
            || w.base.description.to_lowercase().contains(&term)
            || w.address.to_lowercase().contains(&term)
    }
}

pub fn filter_warehouses(items: &[Warehouse], filter: &WarehouseFilter) -> Vec<Warehouse> {
    items.iter().filter(|w| filter.matches(w)).cloned().collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseTypeCount {
    #[serde(rename = "warehouseType")]
    pub warehouse_type: WarehouseType,
    pub count: usize,
}

/// Сводка по складам для карточек над таблицей
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WarehouseSummary {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    /// Суммарная вместимость активных складов
    #[serde(rename = "activeCapacity")]
    pub active_capacity: f64,
    #[serde(rename = "byType")]
    pub by_type: Vec<WarehouseTypeCount>,
}

pub fn summarize(items: &[Warehouse]) -> WarehouseSummary {
    let active = items.iter().filter(|w| w.is_active).count();
    let active_capacity = items
        .iter()
        .filter(|w| w.is_active)
        .map(|w| w.capacity)
        .sum::<f64>();
    let by_type = WarehouseType::ALL
        .into_iter()
        .map(|t| WarehouseTypeCount {
            warehouse_type: t,
            count: items.iter().filter(|w| w.warehouse_type == t).count(),
        })
        .filter(|c| c.count > 0)
        .collect();

    WarehouseSummary {
        total: items.len(),
        active,
        inactive: items.len() - active,
        active_capacity,
        by_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_warehouse::aggregate::WarehouseDto;

    fn warehouse(code: &str, name: &str, t: WarehouseType, capacity: f64, active: bool) -> Warehouse {
        let dto = WarehouseDto {
            description: name.into(),
            address: format!("{} street", code),
            warehouse_type: t,
            capacity,
            is_active: active,
            ..Default::default()
        };
        Warehouse::new_for_insert(&dto, code.into())
    }

    fn sample() -> Vec<Warehouse> {
        vec![
            warehouse("WH-1", "Main hub", WarehouseType::Main, 1000.0, true),
            warehouse("WH-2", "Transit north", WarehouseType::Transit, 300.0, true),
            warehouse("WH-3", "Old returns", WarehouseType::Returns, 50.0, false),
            warehouse("WH-4", "Transit south", WarehouseType::Transit, 200.0, true),
        ]
    }

    #[test]
    fn test_filter_by_search_type_and_activity() {
        let items = sample();

        let f = WarehouseFilter {
            search: "transit".into(),
            ..Default::default()
        };
        assert_eq!(filter_warehouses(&items, &f).len(), 2);

        let f = WarehouseFilter {
            warehouse_type: Some(WarehouseType::Returns),
            active_only: true,
            ..Default::default()
        };
        assert!(filter_warehouses(&items, &f).is_empty());

        let f = WarehouseFilter {
            search: "wh-3 STREET".into(),
            ..Default::default()
        };
        let found = filter_warehouses(&items, &f);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].base.code, "WH-3");
    }

    #[test]
    fn test_summary_counts() {
        let s = summarize(&sample());
        assert_eq!(s.total, 4);
        assert_eq!(s.active, 3);
        assert_eq!(s.inactive, 1);
        assert_eq!(s.active_capacity, 1500.0);
        assert_eq!(
            s.by_type,
            vec![
                WarehouseTypeCount { warehouse_type: WarehouseType::Main, count: 1 },
                WarehouseTypeCount { warehouse_type: WarehouseType::Transit, count: 2 },
                WarehouseTypeCount { warehouse_type: WarehouseType::Returns, count: 1 },
            ]
        );
    }

    #[test]
    fn test_summary_of_empty_list() {
        assert_eq!(summarize(&[]), WarehouseSummary::default());
    }
}
