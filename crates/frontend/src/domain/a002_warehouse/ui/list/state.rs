use crate::shared::list_utils::{cmp_f64, cmp_ignore_case, sort_list, SortState, Sortable};
use contracts::domain::a002_warehouse::aggregate::Warehouse;
use contracts::domain::a002_warehouse::list::{filter_warehouses, WarehouseFilter};
use leptos::prelude::*;
use std::cmp::Ordering;

impl Sortable for Warehouse {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "code" => cmp_ignore_case(&self.base.code, &other.base.code),
            "name" => cmp_ignore_case(&self.base.description, &other.base.description),
            "type" => self.warehouse_type.label().cmp(other.warehouse_type.label()),
            "capacity" => cmp_f64(self.capacity, other.capacity),
            "active" => self.is_active.cmp(&other.is_active),
            _ => Ordering::Equal,
        }
    }
}

#[derive(Clone, Debug)]
pub struct WarehouseListState {
    pub items: Vec<Warehouse>,
    pub filter: WarehouseFilter,
    pub sort: SortState,
    pub is_loaded: bool,
}

impl Default for WarehouseListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            filter: WarehouseFilter::default(),
            sort: SortState::new("code"),
            is_loaded: false,
        }
    }
}

impl WarehouseListState {
    pub fn rows(&self) -> Vec<Warehouse> {
        let mut rows = filter_warehouses(&self.items, &self.filter);
        sort_list(&mut rows, self.sort.field, self.sort.ascending);
        rows
    }
}

pub fn create_state() -> RwSignal<WarehouseListState> {
    RwSignal::new(WarehouseListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_warehouse::aggregate::{WarehouseDto, WarehouseType};

    fn warehouse(code: &str, name: &str, t: WarehouseType, capacity: f64, active: bool) -> Warehouse {
        let dto = WarehouseDto {
            description: name.into(),
            warehouse_type: t,
            capacity,
            is_active: active,
            ..Default::default()
        };
        Warehouse::new_for_insert(&dto, code.into())
    }

    fn state() -> WarehouseListState {
        WarehouseListState {
            items: vec![
                warehouse("WH-3", "Возвраты", WarehouseType::Returns, 50.0, false),
                warehouse("WH-1", "Центральный", WarehouseType::Main, 1000.0, true),
                warehouse("WH-2", "Транзит", WarehouseType::Transit, 300.0, true),
            ],
            ..Default::default()
        }
    }

    fn codes(rows: &[Warehouse]) -> Vec<String> {
        rows.iter().map(|w| w.base.code.clone()).collect()
    }

    #[test]
    fn test_rows_sorted_by_code() {
        assert_eq!(codes(&state().rows()), vec!["WH-1", "WH-2", "WH-3"]);
    }

    #[test]
    fn test_rows_sorted_by_capacity_descending() {
        let mut s = state();
        s.sort.toggle("capacity");
        s.sort.toggle("capacity");
        assert_eq!(codes(&s.rows()), vec!["WH-1", "WH-2", "WH-3"]);
        s.sort.toggle("capacity");
        assert_eq!(codes(&s.rows()), vec!["WH-3", "WH-2", "WH-1"]);
    }

    #[test]
    fn test_active_only_filter() {
        let mut s = state();
        s.filter.active_only = true;
        s.sort.toggle("name");
        assert_eq!(codes(&s.rows()), vec!["WH-2", "WH-1"]);
    }
}
