use super::details::model;
use crate::shared::components::stat_card::{format_value, ValueFormat};
use crate::shared::icons::icon;
use contracts::domain::a002_warehouse::inventory::{InventorySnapshot, StockLine, StockLinesDto};
use leptos::prelude::*;

/// Число из поля ввода: допускается запятая, пустое поле = 0
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let value = raw.trim().replace(',', ".").replace(' ', "");
    if value.is_empty() {
        return Some(0.0);
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn empty_line() -> StockLine {
    StockLine {
        item_code: String::new(),
        item_name: String::new(),
        quantity: 0.0,
        unit_cost: 0.0,
    }
}

/// Остатки склада: просмотр снимка и замена строк
#[component]
pub fn WarehouseInventory(warehouse_id: String) -> impl IntoView {
    let snapshot = RwSignal::new(None::<InventorySnapshot>);
    let draft = RwSignal::new(None::<Vec<StockLine>>);
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);
    let warehouse_id = StoredValue::new(warehouse_id);

    let load = move || {
        let id = warehouse_id.get_value();
        wasm_bindgen_futures::spawn_local(async move {
            match model::fetch_inventory(&id).await {
                Ok(s) => {
                    snapshot.set(Some(s));
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(format!("Ошибка загрузки остатков: {}", e))),
            }
        });
    };

    let start_edit = move || {
        let lines = snapshot.with_untracked(|s| s.as_ref().map(|s| s.lines.clone()).unwrap_or_default());
        draft.set(Some(lines));
    };

    let save = move || {
        let Some(lines) = draft.get_untracked() else {
            return;
        };
        let dto = StockLinesDto { lines };
        if let Err(msg) = dto.validate() {
            set_error.set(Some(msg));
            return;
        }
        let id = warehouse_id.get_value();
        set_saving.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match model::replace_inventory(&id, &dto).await {
                Ok(s) => {
                    snapshot.set(Some(s));
                    draft.set(None);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(format!("Ошибка сохранения: {}", e))),
            }
            set_saving.set(false);
        });
    };

    let update_line = move |index: usize, f: Box<dyn FnOnce(&mut StockLine)>| {
        draft.update(|d| {
            if let Some(line) = d.as_mut().and_then(|lines| lines.get_mut(index)) {
                f(line);
            }
        });
    };

    load();

    view! {
        <div class="inventory">
            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            {move || snapshot.get().map(|s| {
                let utilization = s
                    .utilization_percent
                    .map(|p| format_value(p, ValueFormat::Percent))
                    .unwrap_or_else(|| "вместимость не задана".to_string());
                let over = s.is_over_capacity();
                view! {
                    <div class="inventory__summary">
                        <div><b>{format!("{} {}", s.warehouse_code, s.warehouse_name)}</b></div>
                        <div>{format!("Позиций: {}", s.line_count())}</div>
                        <div>{format!("Количество: {}", format_value(s.total_quantity, ValueFormat::Integer))}</div>
                        <div>{format!("Стоимость: {}", format_value(s.total_value, ValueFormat::Money))}</div>
                        <div class={if over { "inventory__utilization inventory__utilization--over" } else { "inventory__utilization" }}>
                            {if over { icon("alert") } else { view! { <></> }.into_any() }}
                            {format!("Заполненность: {}", utilization)}
                        </div>
                        <div class="inventory__taken-at">
                            {format!("Снимок на {}", s.taken_at.format("%Y-%m-%d %H:%M:%S"))}
                        </div>
                    </div>
                }
            })}

            {move || match draft.get() {
                None => {
                    let lines = snapshot.with(|s| s.as_ref().map(|s| s.lines.clone()).unwrap_or_default());
                    view! {
                        <table class="table__data table--striped">
                            <thead class="table__head">
                                <tr>
                                    <th class="table__header-cell">{"Код"}</th>
                                    <th class="table__header-cell">{"Номенклатура"}</th>
                                    <th class="table__header-cell text-right">{"Количество"}</th>
                                    <th class="table__header-cell text-right">{"Себестоимость"}</th>
                                    <th class="table__header-cell text-right">{"Сумма"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {if lines.is_empty() {
                                    view! { <tr><td colspan="5" class="table__empty">{"Остатков нет"}</td></tr> }.into_any()
                                } else {
                                    lines.into_iter().map(|l| view! {
                                        <tr class="table__row">
                                            <td class="table__cell">{l.item_code.clone()}</td>
                                            <td class="table__cell">{l.item_name.clone()}</td>
                                            <td class="table__cell text-right">{format_value(l.quantity, ValueFormat::Integer)}</td>
                                            <td class="table__cell text-right">{format_value(l.unit_cost, ValueFormat::Money)}</td>
                                            <td class="table__cell text-right">{format_value(l.value(), ValueFormat::Money)}</td>
                                        </tr>
                                    }).collect_view().into_any()
                                }}
                            </tbody>
                        </table>
                        <div class="details-actions">
                            <button class="button button--secondary" on:click=move |_| start_edit()>
                                {"Изменить остатки"}
                            </button>
                            <button class="button button--secondary" on:click=move |_| load()>
                                {icon("refresh")}
                                {"Обновить"}
                            </button>
                        </div>
                    }.into_any()
                }
                Some(lines) => view! {
                    <table class="table__data">
                        <thead class="table__head">
                            <tr>
                                <th class="table__header-cell">{"Код"}</th>
                                <th class="table__header-cell">{"Номенклатура"}</th>
                                <th class="table__header-cell">{"Количество"}</th>
                                <th class="table__header-cell">{"Себестоимость"}</th>
                                <th class="table__header-cell"></th>
                            </tr>
                        </thead>
                        <tbody>
                            {lines.into_iter().enumerate().map(|(index, l)| view! {
                                <tr class="table__row">
                                    <td class="table__cell">
                                        <input type="text" prop:value=l.item_code
                                            on:change=move |ev| {
                                                let v = event_target_value(&ev);
                                                update_line(index, Box::new(move |line| line.item_code = v));
                                            }
                                        />
                                    </td>
                                    <td class="table__cell">
                                        <input type="text" prop:value=l.item_name
                                            on:change=move |ev| {
                                                let v = event_target_value(&ev);
                                                update_line(index, Box::new(move |line| line.item_name = v));
                                            }
                                        />
                                    </td>
                                    <td class="table__cell">
                                        <input type="text" prop:value=l.quantity.to_string()
                                            on:change=move |ev| {
                                                let v = parse_decimal(&event_target_value(&ev)).unwrap_or(f64::NAN);
                                                update_line(index, Box::new(move |line| line.quantity = v));
                                            }
                                        />
                                    </td>
                                    <td class="table__cell">
                                        <input type="text" prop:value=l.unit_cost.to_string()
                                            on:change=move |ev| {
                                                let v = parse_decimal(&event_target_value(&ev)).unwrap_or(f64::NAN);
                                                update_line(index, Box::new(move |line| line.unit_cost = v));
                                            }
                                        />
                                    </td>
                                    <td class="table__cell">
                                        <button
                                            class="button button--icon"
                                            title="Удалить строку"
                                            on:click=move |_| draft.update(|d| {
                                                if let Some(lines) = d.as_mut() {
                                                    if index < lines.len() {
                                                        lines.remove(index);
                                                    }
                                                }
                                            })
                                        >
                                            {icon("delete")}
                                        </button>
                                    </td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                    </table>
                    <div class="details-actions">
                        <button
                            class="button button--secondary"
                            on:click=move |_| draft.update(|d| {
                                if let Some(lines) = d.as_mut() {
                                    lines.push(empty_line());
                                }
                            })
                        >
                            {icon("plus")}
                            {"Добавить строку"}
                        </button>
                        <button
                            class="button button--primary"
                            on:click=move |_| save()
                            disabled=move || saving.get()
                        >
                            {icon("save")}
                            {"Сохранить остатки"}
                        </button>
                        <button class="button button--secondary" on:click=move |_| draft.set(None)>
                            {icon("cancel")}
                            {"Отмена"}
                        </button>
                    </div>
                }.into_any(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("12,5"), Some(12.5));
        assert_eq!(parse_decimal(" 1 000 "), Some(1000.0));
        assert_eq!(parse_decimal(""), Some(0.0));
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("inf"), None);
    }
}
