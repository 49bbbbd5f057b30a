use super::view_model::CostCenterDetailsViewModel;
use crate::shared::icons::icon;
use leptos::prelude::*;
use std::rc::Rc;

fn blank_to_none(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[component]
pub fn CostCenterDetails(
    id: Option<String>,
    on_saved: Rc<dyn Fn(())>,
    on_cancel: Rc<dyn Fn(())>,
) -> impl IntoView {
    let vm = CostCenterDetailsViewModel::new();
    vm.load(id);

    let vm_clone = vm.clone();

    view! {
        <div class="details-container cost-center-details">
            {
                let vm = vm_clone.clone();
                move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })
            }

            <div class="details-form">
                <div class="form-group">
                    <label for="code">{"Код"}</label>
                    <input
                        type="text"
                        id="code"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().code.unwrap_or_default()
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| vm.form.update(|f| f.code = blank_to_none(event_target_value(&ev)))
                        }
                        placeholder="CC-100 (пусто — сгенерировать)"
                    />
                </div>

                <div class="form-group">
                    <label for="description">{"Наименование"}</label>
                    <input
                        type="text"
                        id="description"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().description
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| vm.form.update(|f| f.description = event_target_value(&ev))
                        }
                        placeholder="Например: Цех сборки"
                    />
                </div>

                <div class="form-group">
                    <label for="parent">{"Родительский центр затрат"}</label>
                    <select
                        id="parent"
                        on:change={
                            let vm = vm_clone.clone();
                            move |ev| vm.form.update(|f| f.parent_id = blank_to_none(event_target_value(&ev)))
                        }
                    >
                        <option value="" selected={
                            let vm = vm_clone.clone();
                            move || vm.form.get().parent_id.is_none()
                        }>{"— верхний уровень —"}</option>
                        {
                            let vm = vm_clone.clone();
                            move || {
                                let current = vm.form.get().parent_id;
                                vm.parents
                                    .get()
                                    .into_iter()
                                    .map(|p| {
                                        let selected = current.as_deref() == Some(p.id.as_str());
                                        view! { <option value=p.id selected=selected>{p.label}</option> }
                                    })
                                    .collect_view()
                            }
                        }
                    </select>
                </div>

                <div class="form-group">
                    <label for="manager">{"Ответственный"}</label>
                    <select
                        id="manager"
                        on:change={
                            let vm = vm_clone.clone();
                            move |ev| vm.form.update(|f| f.manager_id = blank_to_none(event_target_value(&ev)))
                        }
                    >
                        <option value="">{"—"}</option>
                        {
                            let vm = vm_clone.clone();
                            move || {
                                let current = vm.form.get().manager_id;
                                vm.employees
                                    .get()
                                    .into_iter()
                                    .map(|e| {
                                        let id = e.to_string_id();
                                        let selected = current.as_deref() == Some(id.as_str());
                                        view! { <option value=id selected=selected>{e.base.description}</option> }
                                    })
                                    .collect_view()
                            }
                        }
                    </select>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="employee_count">{"Численность"}</label>
                        <input
                            type="number"
                            id="employee_count"
                            min="0"
                            prop:value={
                                let vm = vm_clone.clone();
                                move || vm.form.get().employee_count.to_string()
                            }
                            on:input={
                                let vm = vm_clone.clone();
                                move |ev| {
                                    let value = event_target_value(&ev).trim().parse::<u32>().unwrap_or(0);
                                    vm.form.update(|f| f.employee_count = value);
                                }
                            }
                        />
                    </div>

                    <div class="form-group">
                        <label for="budget">{"Годовой бюджет, ₽"}</label>
                        <input
                            type="number"
                            id="budget"
                            min="0"
                            step="1000"
                            prop:value={
                                let vm = vm_clone.clone();
                                move || vm.form.get().budget.to_string()
                            }
                            on:input={
                                let vm = vm_clone.clone();
                                move |ev| {
                                    let value = event_target_value(&ev)
                                        .trim()
                                        .replace(',', ".")
                                        .parse::<f64>()
                                        .unwrap_or(f64::NAN);
                                    vm.form.update(|f| f.budget = value);
                                }
                            }
                        />
                    </div>
                </div>

                <div class="form-group">
                    <label for="comment">{"Комментарий"}</label>
                    <textarea
                        id="comment"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().comment.clone().unwrap_or_default()
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| vm.form.update(|f| f.comment = blank_to_none(event_target_value(&ev)))
                        }
                        rows="3"
                    />
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="button button--primary"
                    on:click={
                        let vm = vm_clone.clone();
                        let on_saved = on_saved.clone();
                        move |_| vm.save_command(on_saved.clone())
                    }
                    disabled={
                        let vm = vm_clone.clone();
                        move || !vm.is_form_valid()() || vm.saving.get()
                    }
                >
                    {icon("save")}
                    {
                        let vm = vm_clone.clone();
                        move || if vm.is_edit_mode()() { "Сохранить" } else { "Создать" }
                    }
                </button>
                <button class="button button--secondary" on:click=move |_| (on_cancel)(())>
                    {icon("cancel")}
                    {"Отмена"}
                </button>
            </div>
        </div>
    }
}
