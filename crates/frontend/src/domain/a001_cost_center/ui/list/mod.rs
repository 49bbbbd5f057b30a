pub mod state;

use self::state::{create_state, ViewMode};
use super::analysis::CostCenterAnalysisPanel;
use super::details::model;
use super::details::CostCenterDetails;
use super::tree::CostCenterTree;
use crate::domain::a003_employee;
use crate::shared::components::stat_card::{format_value, ValueFormat};
use crate::shared::api_utils::log_to_server;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::modal::Modal;
use contracts::domain::a001_cost_center::aggregate::CostCenter;
use contracts::domain::common::AggregateRoot;
use contracts::shared::hierarchy::{ExpansionState, ParentFilter};
use leptos::prelude::*;
use std::collections::HashMap;
use std::rc::Rc;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn CostCenterList() -> impl IntoView {
    let state = create_state();
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let (show_modal, set_show_modal) = signal(false);
    let (editing_id, set_editing_id) = signal::<Option<String>>(None);
    let managers = RwSignal::new(HashMap::<String, String>::new());
    let expansion = RwSignal::new(ExpansionState::<String>::new());
    let selected = RwSignal::new(None::<String>);
    // Увеличивается после каждой загрузки, панель анализа перечитывает данные
    let analysis_version = RwSignal::new(0u32);

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
            managers.set(a003_employee::model::fetch_name_lookup().await);
            analysis_version.update(|v| *v += 1);
            set_loading.set(false);
        });
    };

    let open_details = move |id: Option<String>| {
        set_editing_id.set(id);
        set_show_modal.set(true);
    };

    let close_details = Callback::new(move |_: ()| set_show_modal.set(false));

    let delete_selected = move || {
        let Some(id) = selected.get_untracked() else {
            return;
        };
        let title = state.with_untracked(|s| {
            s.items
                .iter()
                .find(|c| c.to_string_id() == id)
                .map(|c| format!("{} {}", c.base.code, c.base.description))
                .unwrap_or_default()
        });
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!("Удалить центр затрат {}?", title))
                    .ok()
            })
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
                    log_to_server(&CostCenter::full_name(), format!("delete {}: {}", id, e));
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

    // thaw Select работает со строкой
    let parent_filter_value = RwSignal::new(ParentFilter::All.as_str().to_string());
    Effect::new(move |_| {
        let raw = parent_filter_value.get();
        let filter = raw.parse::<ParentFilter>().unwrap_or_default();
        untrack(move || state.update(|s| s.parent_filter = filter));
    });

    let search = Signal::derive(move || state.with(|s| s.search.clone()));
    let filtered = Signal::derive(move || state.with(|s| s.filtered()));
    let table_rows = Signal::derive(move || state.with(|s| s.table_rows()));
    let managers_signal: Signal<HashMap<String, String>> = managers.into();

    let toggle_sort = move |field: &'static str| state.update(|s| s.sort.toggle(field));
    let sort_indicator = move |field: &'static str| state.with(|s| s.sort.indicator(field));

    fetch();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{CostCenter::list_name()}</h1>
                    <span class="header__badge">
                        {move || {
                            let total = state.with(|s| s.items.len());
                            let shown = filtered.with(|f| f.len());
                            if shown == total { total.to_string() } else { format!("{} из {}", shown, total) }
                        }}
                    </span>
                </div>
                <div class="header__actions">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_details(None)>
                        {icon("plus")}
                        " Новый центр затрат"
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

            <CostCenterAnalysisPanel version=analysis_version />

            <div class="filter-panel">
                <Flex gap=FlexGap::Medium align=FlexAlign::End>
                    <div style="flex: 1; max-width: 360px;">
                        <SearchInput
                            value=search
                            on_change=Callback::new(move |v: String| state.update(|s| s.search = v))
                        />
                    </div>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Родитель:"</Label>
                        <Select value=parent_filter_value>
                            {ParentFilter::ALL
                                .into_iter()
                                .map(|f| view! { <option value=f.as_str()>{f.label()}</option> })
                                .collect_view()}
                        </Select>
                    </Flex>
                    <div class="view-switch">
                        <button
                            class=move || if state.with(|s| s.view_mode) == ViewMode::Tree { "button button--small button--active" } else { "button button--small" }
                            on:click=move |_| state.update(|s| s.view_mode = ViewMode::Tree)
                            title="Дерево"
                        >
                            {icon("tree")}
                        </button>
                        <button
                            class=move || if state.with(|s| s.view_mode) == ViewMode::Table { "button button--small button--active" } else { "button button--small" }
                            on:click=move |_| state.update(|s| s.view_mode = ViewMode::Table)
                            title="Таблица"
                        >
                            {icon("table")}
                        </button>
                    </div>
                </Flex>
            </div>

            {move || match state.with(|s| s.view_mode) {
                ViewMode::Tree => view! {
                    <CostCenterTree
                        records=filtered
                        search=search
                        managers=managers_signal
                        expansion=expansion
                        selected=selected
                        on_open=Callback::new(move |id: String| open_details(Some(id)))
                    />
                }.into_any(),
                ViewMode::Table => view! {
                    <div class="table-wrapper">
                        <Table attr:style="width: 100%; min-width: 800px;">
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
                                    <TableHeaderCell>"Родитель"</TableHeaderCell>
                                    <TableHeaderCell>"Ответственный"</TableHeaderCell>
                                    <TableHeaderCell>
                                        <div class="table__sortable-header" on:click=move |_| toggle_sort("employees")>
                                            "Численность" {move || sort_indicator("employees")}
                                        </div>
                                    </TableHeaderCell>
                                    <TableHeaderCell>
                                        <div class="table__sortable-header" on:click=move |_| toggle_sort("budget")>
                                            "Бюджет" {move || sort_indicator("budget")}
                                        </div>
                                    </TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                {move || {
                                    let filter = search.get();
                                    let lookup = managers.get();
                                    let codes: HashMap<String, String> = state.with(|s| {
                                        s.items.iter().map(|c| (c.to_string_id(), c.base.code.clone())).collect()
                                    });
                                    table_rows.get().into_iter().map(|c| {
                                        let id = c.to_string_id();
                                        let id_for_click = id.clone();
                                        let id_for_open = id.clone();
                                        let parent = c.parent_id.as_ref()
                                            .map(|p| codes.get(p).cloned().unwrap_or_else(|| "?".to_string()))
                                            .unwrap_or_default();
                                        let manager = c.manager_id.as_ref()
                                            .and_then(|m| lookup.get(m).cloned())
                                            .unwrap_or_default();
                                        let code_view = highlight_matches(&c.base.code, &filter);
                                        let description_view = highlight_matches(&c.base.description, &filter);
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
                                                <TableCell>{parent}</TableCell>
                                                <TableCell>{manager}</TableCell>
                                                <TableCell class="text-right">{c.employee_count}</TableCell>
                                                <TableCell class="text-right">{format_value(c.budget, ValueFormat::Money)}</TableCell>
                                            </TableRow>
                                        }
                                    }).collect_view()
                                }}
                            </TableBody>
                        </Table>
                    </div>
                }.into_any(),
            }}

            <Show when=move || show_modal.get()>
                {move || {
                    let id = editing_id.get();
                    let title = if id.is_some() { "Центр затрат" } else { "Новый центр затрат" };
                    view! {
                        <Modal title=title on_close=close_details>
                            <CostCenterDetails
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
        </div>
    }
}
