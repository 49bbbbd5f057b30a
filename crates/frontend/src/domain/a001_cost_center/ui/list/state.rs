use crate::shared::list_utils::{cmp_f64, cmp_ignore_case, sort_list, SortState, Sortable};
use contracts::domain::a001_cost_center::aggregate::CostCenter;
use contracts::shared::hierarchy::{filter_records, ParentFilter};
use leptos::prelude::*;
use std::cmp::Ordering;

/// Режим отображения списка
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Tree,
    Table,
}

impl Sortable for CostCenter {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "code" => cmp_ignore_case(&self.base.code, &other.base.code),
            "name" => cmp_ignore_case(&self.base.description, &other.base.description),
            "employees" => self.employee_count.cmp(&other.employee_count),
            "budget" => cmp_f64(self.budget, other.budget),
            _ => Ordering::Equal,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CostCenterListState {
    pub items: Vec<CostCenter>,
    pub search: String,
    pub parent_filter: ParentFilter,
    pub sort: SortState,
    pub view_mode: ViewMode,
    pub is_loaded: bool,
}

impl Default for CostCenterListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search: String::new(),
            parent_filter: ParentFilter::All,
            sort: SortState::new("code"),
            view_mode: ViewMode::default(),
            is_loaded: false,
        }
    }
}

impl CostCenterListState {
    /// Записи, прошедшие поиск и фильтр по родителю, в исходном порядке
    pub fn filtered(&self) -> Vec<CostCenter> {
        filter_records(&self.items, &self.search, self.parent_filter)
    }

    /// Строки плоской таблицы: отфильтрованные и отсортированные
    pub fn table_rows(&self) -> Vec<CostCenter> {
        let mut rows = self.filtered();
        sort_list(&mut rows, self.sort.field, self.sort.ascending);
        rows
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search.trim().is_empty() || self.parent_filter != ParentFilter::All
    }
}

pub fn create_state() -> RwSignal<CostCenterListState> {
    RwSignal::new(CostCenterListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center(code: &str, name: &str, parent: Option<&CostCenter>, employees: u32, budget: f64) -> CostCenter {
        CostCenter::new_for_insert(
            code.into(),
            name.into(),
            parent.map(|p| p.to_string_id()),
            None,
            employees,
            budget,
            None,
        )
    }

    fn state() -> CostCenterListState {
        let prod = center("CC-200", "Производство", None, 40, 900_000.0);
        let shop = center("CC-210", "цех сборки", Some(&prod), 25, 300_000.0);
        let adm = center("CC-100", "Администрация", None, 10, 300_000.0);
        CostCenterListState {
            items: vec![prod, shop, adm],
            ..Default::default()
        }
    }

    fn codes(rows: &[CostCenter]) -> Vec<&str> {
        rows.iter().map(|c| c.base.code.as_str()).collect()
    }

    #[test]
    fn test_table_rows_sorted_by_code_by_default() {
        let s = state();
        assert_eq!(codes(&s.table_rows()), vec!["CC-100", "CC-200", "CC-210"]);
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let mut s = state();
        s.sort.toggle("name");
        assert_eq!(codes(&s.table_rows()), vec!["CC-100", "CC-200", "CC-210"]);
        s.sort.toggle("name");
        assert_eq!(codes(&s.table_rows()), vec!["CC-210", "CC-200", "CC-100"]);
    }

    #[test]
    fn test_budget_ties_keep_previous_order() {
        let mut s = state();
        s.sort.toggle("budget");
        // CC-210 и CC-100 с одинаковым бюджетом остаются в исходном порядке
        assert_eq!(codes(&s.table_rows()), vec!["CC-210", "CC-100", "CC-200"]);
    }

    #[test]
    fn test_filters_apply_before_sort() {
        let mut s = state();
        s.parent_filter = ParentFilter::NoParent;
        s.sort.toggle("employees");
        s.sort.toggle("employees");
        assert_eq!(codes(&s.table_rows()), vec!["CC-200", "CC-100"]);
        assert!(s.has_active_filters());

        s.parent_filter = ParentFilter::All;
        s.search = "  СБОРК ".into();
        assert_eq!(codes(&s.filtered()), vec!["CC-210"]);
    }

    #[test]
    fn test_default_state_has_no_filters() {
        let s = CostCenterListState::default();
        assert!(!s.has_active_filters());
        assert_eq!(s.view_mode, ViewMode::Tree);
    }
}
