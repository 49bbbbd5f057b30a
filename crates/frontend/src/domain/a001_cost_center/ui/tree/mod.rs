use crate::shared::icons::icon;
use crate::shared::list_utils::highlight_matches;
use crate::shared::components::stat_card::{format_value, ValueFormat};
use contracts::domain::a001_cost_center::aggregate::CostCenter;
use contracts::shared::hierarchy::{
    build_forest, forest_size, visible_rows, ExpansionState, TreeNode,
};
use leptos::prelude::*;
use std::collections::HashMap;

/// Данные одной отрисовываемой строки дерева
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRowData {
    pub id: String,
    pub code: String,
    pub name: String,
    pub manager: String,
    pub employee_count: u32,
    pub budget: f64,
    pub depth: usize,
    pub expanded: bool,
    pub has_children: bool,
}

pub fn tree_rows(
    forest: &[TreeNode<CostCenter>],
    state: &ExpansionState<String>,
    managers: &HashMap<String, String>,
) -> Vec<TreeRowData> {
    visible_rows(forest, state)
        .into_iter()
        .map(|row| {
            let c = row.record();
            TreeRowData {
                id: c.to_string_id(),
                code: c.base.code.clone(),
                name: c.base.description.clone(),
                manager: c
                    .manager_id
                    .as_ref()
                    .and_then(|id| managers.get(id))
                    .cloned()
                    .unwrap_or_default(),
                employee_count: c.employee_count,
                budget: c.budget,
                depth: row.depth,
                expanded: row.expanded,
                has_children: row.has_children(),
            }
        })
        .collect()
}

/// Древовидное представление центров затрат.
///
/// `records` are already filtered; a record whose parent did not pass the
/// filter is left out of the tree.
#[component]
pub fn CostCenterTree(
    #[prop(into)] records: Signal<Vec<CostCenter>>,
    #[prop(into)] search: Signal<String>,
    #[prop(into)] managers: Signal<HashMap<String, String>>,
    expansion: RwSignal<ExpansionState<String>>,
    selected: RwSignal<Option<String>>,
    on_open: Callback<String>,
) -> impl IntoView {
    let forest = Memo::new(move |_| build_forest(&records.get()));

    // Выбор пользователя для исчезнувших узлов больше не нужен
    Effect::new(move |_| {
        forest.with(|f| expansion.update(|s| s.retain_present(f)));
    });

    let hidden_count = move || {
        let total = records.with(|r| r.len());
        total - forest.with(|f| forest_size(f))
    };

    let rows = move || {
        let state = expansion.get();
        let lookup = managers.get();
        forest.with(|f| tree_rows(f, &state, &lookup))
    };

    view! {
        <div class="tree-panel">
            <div class="tree-panel__toolbar">
                <button
                    class="button button--secondary button--small"
                    on:click=move |_| forest.with_untracked(|f| expansion.update(|s| s.expand_all(f)))
                >
                    {icon("expand-all")}
                    {"Развернуть всё"}
                </button>
                <button
                    class="button button--secondary button--small"
                    on:click=move |_| forest.with_untracked(|f| expansion.update(|s| s.collapse_all(f)))
                >
                    {icon("collapse-all")}
                    {"Свернуть всё"}
                </button>
                <button
                    class="button button--secondary button--small"
                    on:click=move |_| expansion.update(|s| s.reset())
                    title="Раскрыты два верхних уровня"
                >
                    {"По умолчанию"}
                </button>
                {move || {
                    let hidden = hidden_count();
                    (hidden > 0).then(|| view! {
                        <span class="tree-panel__note">
                            {icon("alert")}
                            {format!("Не показано записей: {} (родитель не попал в выборку или не найден)", hidden)}
                        </span>
                    })
                }}
            </div>

            <div class="table-container">
                <table class="tree-table">
                    <thead>
                        <tr>
                            <th class="th-w-50p">{"Наименование"}</th>
                            <th>{"Код"}</th>
                            <th>{"Ответственный"}</th>
                            <th class="text-right">{"Численность"}</th>
                            <th class="text-right">{"Бюджет"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let rows = rows();
                            if rows.is_empty() {
                                let msg = if records.with(|r| r.is_empty()) {
                                    "Нет данных. Нажмите 'Обновить' или 'Тестовые данные'."
                                } else {
                                    "По фильтру ничего не найдено"
                                };
                                return view! {
                                    <tr><td colspan="5" class="table__empty">{msg}</td></tr>
                                }.into_any();
                            }
                            let filter = search.get();
                            rows.into_iter()
                                .map(|row| render_row(row, &filter, expansion, selected, on_open))
                                .collect_view()
                                .into_any()
                        }}
                    </tbody>
                </table>
            </div>
        </div>
    }
}

fn render_row(
    row: TreeRowData,
    filter: &str,
    expansion: RwSignal<ExpansionState<String>>,
    selected: RwSignal<Option<String>>,
    on_open: Callback<String>,
) -> AnyView {
    let toggle: AnyView = if row.has_children {
        let id = row.id.clone();
        let depth = row.depth;
        view! {
            <button
                class="tree-toggle"
                on:click=move |ev| {
                    ev.stop_propagation();
                    expansion.update(|s| {
                        s.toggle(id.clone(), depth);
                    });
                }
            >
                {if row.expanded { icon("chevron-down") } else { icon("chevron-right") }}
            </button>
        }
        .into_any()
    } else {
        view! { <span class="tree-toggle tree-toggle--empty"></span> }.into_any()
    };

    let node_icon = match (row.has_children, row.expanded) {
        (true, true) => icon("folder-open"),
        (true, false) => icon("folder-closed"),
        _ => icon("item"),
    };

    let id_for_select = row.id.clone();
    let id_for_open = row.id.clone();
    let id_for_class = row.id.clone();

    view! {
        <tr
            class=move || {
                if selected.get().as_deref() == Some(id_for_class.as_str()) {
                    "tree-row tree-row--selected"
                } else {
                    "tree-row"
                }
            }
            on:click=move |_| selected.set(Some(id_for_select.clone()))
            on:dblclick=move |_| on_open.run(id_for_open.clone())
        >
            <td class="cell-truncate">
                <div class="tree-cell" style=format!("padding-left: {}px;", row.depth * 16)>
                    {toggle}
                    <span class="tree-cell__icon">{node_icon}</span>
                    <span class="tree-label">{highlight_matches(&row.name, filter)}</span>
                </div>
            </td>
            <td class="cell-truncate">{highlight_matches(&row.code, filter)}</td>
            <td class="cell-truncate">{row.manager}</td>
            <td class="text-right">{row.employee_count}</td>
            <td class="text-right">{format_value(row.budget, ValueFormat::Money)}</td>
        </tr>
    }
    .into_any()
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
            1,
            10.0,
            None,
        )
    }

    #[test]
    fn test_rows_follow_expansion_state() {
        let root = center("A", None);
        let child = center("A1", Some(&root));
        let grandchild = center("A11", Some(&child));
        let leaf = center("A111", Some(&grandchild));
        let forest = build_forest(&[root.clone(), child.clone(), grandchild.clone(), leaf]);
        let managers = HashMap::new();

        let mut state = ExpansionState::new();
        let codes = |state: &ExpansionState<String>| -> Vec<String> {
            tree_rows(&forest, state, &managers)
                .into_iter()
                .map(|r| r.code)
                .collect()
        };

        // depth 0 and 1 are open by default, depth 2 is closed
        assert_eq!(codes(&state), vec!["A", "A1", "A11"]);

        state.toggle(grandchild.to_string_id(), 2);
        assert_eq!(codes(&state), vec!["A", "A1", "A11", "A111"]);

        state.toggle(root.to_string_id(), 0);
        assert_eq!(codes(&state), vec!["A"]);
    }

    #[test]
    fn test_rows_resolve_manager_names() {
        let mut root = center("A", None);
        root.manager_id = Some("emp-1".into());
        let forest = build_forest(&[root]);
        let managers = HashMap::from([("emp-1".to_string(), "Иванов И.И.".to_string())]);

        let rows = tree_rows(&forest, &ExpansionState::new(), &managers);
        assert_eq!(rows[0].manager, "Иванов И.И.");
        assert!(!rows[0].has_children);
        assert_eq!(rows[0].depth, 0);
    }
}
