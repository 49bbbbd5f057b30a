use super::view_model::WarehouseDetailsViewModel;
use crate::shared::icons::icon;
use contracts::domain::a002_warehouse::aggregate::WarehouseType;
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
pub fn WarehouseDetails(
    id: Option<String>,
    on_saved: Rc<dyn Fn(())>,
    on_cancel: Rc<dyn Fn(())>,
) -> impl IntoView {
    let vm = WarehouseDetailsViewModel::new();
    vm.load(id);

    let vm_clone = vm.clone();

    view! {
        <div class="details-container warehouse-details">
            {
                let vm = vm_clone.clone();
                move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })
            }

            <div class="details-form">
                <div class="form-row">
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
                            placeholder="WH-001 (пусто — сгенерировать)"
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
                        />
                    </div>
                </div>

                <div class="form-group">
                    <label for="address">{"Адрес"}</label>
                    <input
                        type="text"
                        id="address"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().address
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| vm.form.update(|f| f.address = event_target_value(&ev))
                        }
                    />
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="warehouse_type">{"Тип склада"}</label>
                        <select
                            id="warehouse_type"
                            on:change={
                                let vm = vm_clone.clone();
                                move |ev| {
                                    let value = event_target_value(&ev).parse::<WarehouseType>().unwrap_or_default();
                                    vm.form.update(|f| f.warehouse_type = value);
                                }
                            }
                        >
                            {
                                let vm = vm_clone.clone();
                                move || {
                                    let current = vm.form.get().warehouse_type;
                                    WarehouseType::ALL
                                        .into_iter()
                                        .map(|t| view! {
                                            <option value=t.as_str() selected={current == t}>{t.label()}</option>
                                        })
                                        .collect_view()
                                }
                            }
                        </select>
                    </div>

                    <div class="form-group">
                        <label for="capacity">{"Вместимость, ед."}</label>
                        <input
                            type="number"
                            id="capacity"
                            min="0"
                            prop:value={
                                let vm = vm_clone.clone();
                                move || vm.form.get().capacity.to_string()
                            }
                            on:input={
                                let vm = vm_clone.clone();
                                move |ev| {
                                    let value = event_target_value(&ev)
                                        .trim()
                                        .replace(',', ".")
                                        .parse::<f64>()
                                        .unwrap_or(f64::NAN);
                                    vm.form.update(|f| f.capacity = value);
                                }
                            }
                        />
                    </div>

                    <div class="form-group form-group--checkbox">
                        <label>
                            <input
                                type="checkbox"
                                prop:checked={
                                    let vm = vm_clone.clone();
                                    move || vm.form.get().is_active
                                }
                                on:change={
                                    let vm = vm_clone.clone();
                                    move |ev| {
                                        let checked = event_target_checked(&ev);
                                        vm.form.update(|f| f.is_active = checked);
                                    }
                                }
                            />
                            {" Активен"}
                        </label>
                    </div>
                </div>

                <div class="form-row">
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

                    <div class="form-group">
                        <label for="cost_center">{"Центр затрат"}</label>
                        <select
                            id="cost_center"
                            on:change={
                                let vm = vm_clone.clone();
                                move |ev| vm.form.update(|f| f.cost_center_id = blank_to_none(event_target_value(&ev)))
                            }
                        >
                            <option value="">{"—"}</option>
                            {
                                let vm = vm_clone.clone();
                                move || {
                                    let current = vm.form.get().cost_center_id;
                                    vm.cost_centers
                                        .get()
                                        .into_iter()
                                        .map(|c| {
                                            let selected = current.as_deref() == Some(c.id.as_str());
                                            view! { <option value=c.id selected=selected>{c.label}</option> }
                                        })
                                        .collect_view()
                                }
                            }
                        </select>
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
