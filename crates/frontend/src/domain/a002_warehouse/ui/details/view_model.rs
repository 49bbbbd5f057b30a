use super::model;
use crate::domain::a001_cost_center::ui::details::model as cost_center_model;
use crate::domain::a001_cost_center::ui::details::view_model::{parent_options, ParentOption};
use crate::domain::a003_employee;
use contracts::domain::a002_warehouse::aggregate::WarehouseDto;
use contracts::domain::a003_employee::aggregate::Employee;
use leptos::prelude::*;
use std::rc::Rc;

/// Проверка формы до отправки на сервер
pub fn validate_form(dto: &WarehouseDto) -> Result<(), String> {
    if dto.description.trim().is_empty() {
        return Err("Наименование обязательно для заполнения".to_string());
    }
    if !dto.capacity.is_finite() || dto.capacity < 0.0 {
        return Err("Вместимость должна быть неотрицательным числом".to_string());
    }
    Ok(())
}

#[derive(Clone)]
pub struct WarehouseDetailsViewModel {
    pub form: RwSignal<WarehouseDto>,
    pub error: RwSignal<Option<String>>,
    pub cost_centers: RwSignal<Vec<ParentOption>>,
    pub employees: RwSignal<Vec<Employee>>,
    pub saving: RwSignal<bool>,
}

impl WarehouseDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(WarehouseDto::default()),
            error: RwSignal::new(None),
            cost_centers: RwSignal::new(Vec::new()),
            employees: RwSignal::new(Vec::new()),
            saving: RwSignal::new(false),
        }
    }

    pub fn is_edit_mode(&self) -> impl Fn() -> bool + '_ {
        move || self.form.get().id.is_some()
    }

    pub fn is_form_valid(&self) -> impl Fn() -> bool + '_ {
        move || self.form.with(|f| validate_form(f).is_ok())
    }

    pub fn load(&self, id: Option<String>) {
        let form = self.form;
        let error = self.error;
        let cost_centers = self.cost_centers;
        let employees = self.employees;

        wasm_bindgen_futures::spawn_local(async move {
            if let Some(existing_id) = id {
                match model::fetch_by_id(existing_id).await {
                    Ok(aggregate) => form.set(WarehouseDto::from(&aggregate)),
                    Err(e) => error.set(Some(format!("Ошибка загрузки: {}", e))),
                }
            }
            match cost_center_model::fetch_all().await {
                Ok(list) => cost_centers.set(parent_options(&list, None)),
                Err(e) => log::warn!("Не удалось загрузить центры затрат: {}", e),
            }
            match a003_employee::model::fetch_all().await {
                Ok(list) => employees.set(list),
                Err(e) => log::warn!("Не удалось загрузить сотрудников: {}", e),
            }
        });
    }

    pub fn save_command(&self, on_saved: Rc<dyn Fn(())>) {
        let current = self.form.get();
        if let Err(msg) = validate_form(&current) {
            self.error.set(Some(msg));
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

    #[test]
    fn test_validate_form() {
        let mut dto = WarehouseDto::default();
        assert!(validate_form(&dto).is_err());

        dto.description = "Склад №1".into();
        assert!(validate_form(&dto).is_ok());

        dto.capacity = f64::NAN;
        assert!(validate_form(&dto).is_err());

        dto.capacity = -1.0;
        assert!(validate_form(&dto).is_err());
    }
}
