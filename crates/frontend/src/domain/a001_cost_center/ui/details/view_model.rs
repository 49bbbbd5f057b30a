use super::model;
use crate::domain::a003_employee;
use contracts::domain::a001_cost_center::aggregate::{CostCenter, CostCenterDto};
use contracts::domain::a003_employee::aggregate::Employee;
use contracts::shared::hierarchy::{build_forest, preorder};
use leptos::prelude::*;
use std::rc::Rc;

/// Вариант выпадающего списка родителя: отступ по глубине дерева
#[derive(Debug, Clone, PartialEq)]
pub struct ParentOption {
    pub id: String,
    pub label: String,
}

/// Parents offered for `self_id`: every placed record except the edited one
/// and its descendants, in tree order.
pub fn parent_options(records: &[CostCenter], self_id: Option<&str>) -> Vec<ParentOption> {
    let forest = build_forest(records);
    let mut options = Vec::new();
    let mut skip_below: Option<usize> = None;

    for (node, depth) in preorder(&forest) {
        if let Some(limit) = skip_below {
            if depth > limit {
                continue;
            }
            skip_below = None;
        }
        let id = node.record.to_string_id();
        if Some(id.as_str()) == self_id {
            skip_below = Some(depth);
            continue;
        }
        options.push(ParentOption {
            label: format!(
                "{}{} — {}",
                "\u{00a0}\u{00a0}".repeat(depth),
                node.record.base.code,
                node.record.base.description
            ),
            id,
        });
    }
    options
}

/// ViewModel формы центра затрат
#[derive(Clone)]
pub struct CostCenterDetailsViewModel {
    pub form: RwSignal<CostCenterDto>,
    pub error: RwSignal<Option<String>>,
    pub parents: RwSignal<Vec<ParentOption>>,
    pub employees: RwSignal<Vec<Employee>>,
    pub saving: RwSignal<bool>,
}

impl CostCenterDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(CostCenterDto::default()),
            error: RwSignal::new(None),
            parents: RwSignal::new(Vec::new()),
            employees: RwSignal::new(Vec::new()),
            saving: RwSignal::new(false),
        }
    }

    pub fn is_edit_mode(&self) -> impl Fn() -> bool + '_ {
        move || self.form.get().id.is_some()
    }

    pub fn is_form_valid(&self) -> impl Fn() -> bool + '_ {
        move || {
            let f = self.form.get();
            !f.description.trim().is_empty() && f.budget.is_finite() && f.budget >= 0.0
        }
    }

    /// Загрузка записи (если передан id) и справочников для выпадающих списков
    pub fn load(&self, id: Option<String>) {
        let form = self.form;
        let error = self.error;
        let parents = self.parents;
        let employees = self.employees;

        wasm_bindgen_futures::spawn_local(async move {
            if let Some(existing_id) = id.clone() {
                match model::fetch_by_id(existing_id).await {
                    Ok(aggregate) => form.set(CostCenterDto::from(&aggregate)),
                    Err(e) => error.set(Some(format!("Ошибка загрузки: {}", e))),
                }
            }
            match model::fetch_all().await {
                Ok(list) => parents.set(parent_options(&list, id.as_deref())),
                Err(e) => error.set(Some(format!("Ошибка загрузки списка: {}", e))),
            }
            match a003_employee::model::fetch_all().await {
                Ok(list) => employees.set(list),
                Err(e) => log::warn!("Не удалось загрузить сотрудников: {}", e),
            }
        });
    }

    pub fn save_command(&self, on_saved: Rc<dyn Fn(())>) {
        let current = self.form.get();

        if current.description.trim().is_empty() {
            self.error
                .set(Some("Наименование обязательно для заполнения".to_string()));
            return;
        }
        if !current.budget.is_finite() || current.budget < 0.0 {
            self.error
                .set(Some("Бюджет должен быть неотрицательным числом".to_string()));
            return;
        }

        let error = self.error;
        let saving = self.saving;
        saving.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match model::save_form(&current).await {
                Ok(_) => (on_saved)(()),
                Err(e) => error.set(Some(format!("Ошибка сохранения: {}", e))),
            }
            saving.set(false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center(code: &str, parent: Option<&CostCenter>) -> CostCenter {
        CostCenter::new_for_insert(
            code.into(),
            format!("Центр {}", code),
            parent.map(|p| p.to_string_id()),
            None,
            0,
            0.0,
            None,
        )
    }

    #[test]
    fn test_parent_options_exclude_self_and_descendants() {
        let root = center("A", None);
        let child = center("A1", Some(&root));
        let grandchild = center("A11", Some(&child));
        let sibling = center("A2", Some(&root));
        let other = center("B", None);
        let records = vec![
            root.clone(),
            child.clone(),
            grandchild,
            sibling.clone(),
            other.clone(),
        ];

        let options = parent_options(&records, Some(&child.to_string_id()));
        let ids: Vec<String> = options.iter().map(|o| o.id.clone()).collect();
        assert_eq!(
            ids,
            vec![root.to_string_id(), sibling.to_string_id(), other.to_string_id()]
        );
        assert!(options[1].label.starts_with("\u{00a0}\u{00a0}A2"));
    }

    #[test]
    fn test_parent_options_for_new_record() {
        let root = center("A", None);
        let child = center("A1", Some(&root));
        assert_eq!(parent_options(&[root, child], None).len(), 2);
    }
}
