pub mod state;

use self::state::create_state;
use super::details::model;
use super::details::WarehouseDetails;
use super::inventory::WarehouseInventory;
use crate::domain::a003_employee;
use crate::shared::components::stat_card::{format_value, StatCard, ValueFormat};
use crate::shared::api_utils::log_to_server;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::modal::Modal;
use contracts::domain::a002_warehouse::aggregate::{Warehouse, WarehouseType};
use contracts::domain::a002_warehouse::list::WarehouseSummary;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use std::collections::HashMap;
use std::rc::Rc;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn WarehouseList() -> impl IntoView {
    let state = create_state();
    let summary = RwSignal::new(None::<WarehouseSummary>);
    let managers = RwSignal::new(HashMap::<String, String>::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let (show_modal, set_show_modal) = signal(false);
    let (editing_id, set_editing_id) = signal::<Option<String>>(None);
    let inventory_id = RwSignal::new(None::<String>);
    let selected = RwSignal::new(None::<String>);

    let fetch = move || {
        set_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match model::fetch_all().await {
                Ok(items) => {
                    state.update(|s| {
                        s.items = items;
                        s.is_loaded = true;
                    });
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
            match model::fetch_summary().await {
                Ok(s) => summary.set(Some(s)),
                Err(e) => log::warn!("Сводка по складам недоступна: {}", e),
            }
            managers.set(a003_employee::model::fetch_name_lookup().await);
            set_loading.set(false);
        });
    };

    let open_details = move |id: Option<String>| {
        set_editing_id.set(id);
        set_show_modal.set(true);
    };

    let delete_selected = move || {
        let Some(id) = selected.get_untracked() else {
            return;
        };
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message("Удалить выбранный склад?").ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            match model::delete_by_id(&id).await {
                Ok(()) => {
                    selected.set(None);
                    fetch();
                }
                Err(e) => {
                    log_to_server(&Warehouse::full_name(), format!("delete {}: {}", id, e));
                    set_error.set(Some(format!("Ошибка удаления: {}", e)));
                }
            }
        });
    };

    let insert_test_data = move || {
        wasm_bindgen_futures::spawn_local(async move {
            match model::insert_test_data().await {
                Ok(()) => fetch(),
                Err(e) => set_error.set(Some(format!("Ошибка заполнения: {}", e))),
            }
        });
    };

    // Поля фильтра thaw; изменения переносятся в состояние списка
    let type_value = RwSignal::new(String::new());
    let active_only = RwSignal::new(false);
    Effect::new(move |_| {
        let warehouse_type = type_value.get().parse::<WarehouseType>().ok();
        let active = active_only.get();
        untrack(move || {
            state.update(|s| {
                s.filter.warehouse_type = warehouse_type;
                s.filter.active_only = active;
            })
        });
    });

    let search = Signal::derive(move || state.with(|s| s.filter.search.clone()));
    let rows = Signal::derive(move || state.with(|s| s.rows()));
    let toggle_sort = move |field: &'static str| state.update(|s| s.sort.toggle(field));
    let sort_indicator = move |field: &'static str| state.with(|s| s.sort.indicator(field));

    let summary_metric = move |f: fn(&WarehouseSummary) -> f64| {
        Signal::derive(move || summary.with(|s| s.as_ref().map(f)))
    };

    fetch();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{Warehouse::list_name()}</h1>
                </div>
                <div class="header__actions">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_details(None)>
                        {icon("plus")}
                        " Новый склад"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| fetch()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Загрузка..." } else { " Обновить" }}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| delete_selected()
                        disabled=Signal::derive(move || selected.get().is_none())
                    >
                        {icon("delete")}
                        " Удалить"
                    </Button>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| insert_test_data()>
                        " Тестовые данные"
                    </Button>
                </div>
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div class="stat-cards">
                <StatCard
                    label="Складов"
                    icon_name="warehouse"
                    value=summary_metric(|s| s.total as f64)
                    format=ValueFormat::Integer
                    subtitle=Signal::derive(move || summary.with(|s| s.as_ref().map(|s| {
                        s.by_type
                            .iter()
                            .map(|c| format!("{}: {}", c.warehouse_type.label(), c.count))
                            .collect::<Vec<_>>()
                            .join(", ")
                    })))
                />
                <StatCard
                    label="Активных"
                    icon_name="warehouse"
                    value=summary_metric(|s| s.active as f64)
                    format=ValueFormat::Integer
                />
                <StatCard
                    label="Неактивных"
                    icon_name="alert"
                    value=summary_metric(|s| s.inactive as f64)
                    format=ValueFormat::Integer
                    warning=Signal::derive(move || summary.with(|s| s.as_ref().is_some_and(|s| s.inactive > 0)))
                />
                <StatCard
                    label="Вместимость активных"
                    icon_name="inventory"
                    value=summary_metric(|s| s.active_capacity)
                    format=ValueFormat::Integer
                />
            </div>

            <div class="filter-panel">
                <Flex gap=FlexGap::Medium align=FlexAlign::End>
                    <div style="flex: 1; max-width: 360px;">
                        <SearchInput
                            value=search
                            on_change=Callback::new(move |v: String| state.update(|s| s.filter.search = v))
                            placeholder="Код, наименование или адрес..."
                        />
                    </div>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Тип:"</Label>
                        <Select value=type_value>
                            <option value="">"Все"</option>
                            {WarehouseType::ALL
                                .into_iter()
                                .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                                .collect_view()}
                        </Select>
                    </Flex>
                    <Checkbox checked=active_only label="Только активные" />
                </Flex>
            </div>

            <div class="table-wrapper">
                <Table attr:style="width: 100%; min-width: 900px;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>
                                <div class="table__sortable-header" on:click=move |_| toggle_sort("code")>
                                    "Код" {move || sort_indicator("code")}
                                </div>
                            </TableHeaderCell>
                            <TableHeaderCell>
                                <div class="table__sortable-header" on:click=move |_| toggle_sort("name")>
                                    "Наименование" {move || sort_indicator("name")}
                                </div>
                            </TableHeaderCell>
                            <TableHeaderCell>
                                <div class="table__sortable-header" on:click=move |_| toggle_sort("type")>
                                    "Тип" {move || sort_indicator("type")}
                                </div>
                            </TableHeaderCell>
                            <TableHeaderCell>"Адрес"</TableHeaderCell>
                            <TableHeaderCell>"Ответственный"</TableHeaderCell>
                            <TableHeaderCell>
                                <div class="table__sortable-header" on:click=move |_| toggle_sort("capacity")>
                                    "Вместимость" {move || sort_indicator("capacity")}
                                </div>
                            </TableHeaderCell>
                            <TableHeaderCell>
                                <div class="table__sortable-header" on:click=move |_| toggle_sort("active")>
                                    "Активен" {move || sort_indicator("active")}
                                </div>
                            </TableHeaderCell>
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let filter = search.get();
                            let lookup = managers.get();
                            let rows = rows.get();
                            if rows.is_empty() {
                                return view! {
                                    <TableRow>
                                        <TableCell attr:colspan="8">"Нет складов"</TableCell>
                                    </TableRow>
                                }.into_any();
                            }
                            rows.into_iter().map(|w| {
                                let id = w.to_string_id();
                                let id_for_click = id.clone();
                                let id_for_open = id.clone();
                                let id_for_inventory = id.clone();
                                let manager = w.manager_id.as_ref()
                                    .and_then(|m| lookup.get(m).cloned())
                                    .unwrap_or_default();
                                let code_view = highlight_matches(&w.base.code, &filter);
                                let description_view = highlight_matches(&w.base.description, &filter);
                                let address_view = highlight_matches(&w.address, &filter);
                                view! {
                                    <TableRow
                                        class=Signal::derive(move || {
                                            if selected.get().as_deref() == Some(id.as_str()) {
                                                "table__row table__row--selected".to_string()
                                            } else {
                                                "table__row".to_string()
                                            }
                                        })
                                        on:click=move |_| selected.set(Some(id_for_click.clone()))
                                        on:dblclick=move |_| open_details(Some(id_for_open.clone()))
                                    >
                                        <TableCell>{code_view}</TableCell>
                                        <TableCell>{description_view}</TableCell>
                                        <TableCell>{w.warehouse_type.label()}</TableCell>
                                        <TableCell>{address_view}</TableCell>
                                        <TableCell>{manager}</TableCell>
                                        <TableCell class="text-right">{format_value(w.capacity, ValueFormat::Integer)}</TableCell>
                                        <TableCell>{if w.is_active { "Да" } else { "Нет" }}</TableCell>
                                        <TableCell>
                                            <button
                                                class="button button--icon"
                                                title="Остатки"
                                                on:click=move |ev| {
                                                    ev.stop_propagation();
                                                    inventory_id.set(Some(id_for_inventory.clone()));
                                                }
                                            >
                                                {icon("inventory")}
                                            </button>
                                        </TableCell>
                                    </TableRow>
                                }
                            }).collect_view().into_any()
                        }}
                    </TableBody>
                </Table>
            </div>

            <Show when=move || show_modal.get()>
                {move || {
                    let id = editing_id.get();
                    let title = if id.is_some() { "Склад" } else { "Новый склад" };
                    view! {
                        <Modal title=title on_close=Callback::new(move |_: ()| set_show_modal.set(false))>
                            <WarehouseDetails
                                id=id.clone()
                                on_saved=Rc::new(move |_: ()| {
                                    set_show_modal.set(false);
                                    fetch();
                                })
                                on_cancel=Rc::new(move |_: ()| set_show_modal.set(false))
                            />
                        </Modal>
                    }
                }}
            </Show>

            {move || inventory_id.get().map(|id| view! {
                <Modal title="Остатки склада" wide=true on_close=Callback::new(move |_: ()| inventory_id.set(None))>
                    <WarehouseInventory warehouse_id=id.clone() />
                </Modal>
            })}
        </div>
    }
}
