use super::details::model;
use crate::shared::components::stat_card::{format_value, StatCard, ValueFormat};
use crate::shared::icons::icon;
use contracts::domain::a001_cost_center::analysis::CostCenterAnalysis;
use contracts::shared::hierarchy::IntegrityIssue;
use leptos::prelude::*;

/// Текст предупреждения о записи, не попавшей в дерево
pub fn describe_issue(issue: &IntegrityIssue<String>) -> String {
    match issue {
        IntegrityIssue::DanglingParent { id, parent_id } => {
            format!("{}: родитель {} не найден", id, parent_id)
        }
        IntegrityIssue::DuplicateId { id, position } => {
            format!("{}: повторный id (позиция {})", id, position + 1)
        }
        IntegrityIssue::Unreachable { id } => {
            format!("{}: цепочка родителей не ведёт к корню", id)
        }
    }
}

/// Карточки и свод бюджета по поддеревьям
#[component]
pub fn CostCenterAnalysisPanel(#[prop(into)] version: Signal<u32>) -> impl IntoView {
    let analysis = RwSignal::new(None::<CostCenterAnalysis>);
    let (error, set_error) = signal::<Option<String>>(None);
    let (expanded, set_expanded) = signal(false);

    Effect::new(move |_| {
        version.track();
        wasm_bindgen_futures::spawn_local(async move {
            match model::fetch_analysis().await {
                Ok(a) => {
                    analysis.set(Some(a));
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    });

    let metric = move |f: fn(&CostCenterAnalysis) -> f64| {
        Signal::derive(move || analysis.with(|a| a.as_ref().map(f)))
    };

    view! {
        <div class="analysis-panel">
            <div class="stat-cards">
                <StatCard
                    label="Центров затрат"
                    icon_name="layers"
                    value=metric(|a| a.total_count as f64)
                    format=ValueFormat::Integer
                    subtitle=Signal::derive(move || analysis.with(|a| a.as_ref().map(|a| {
                        format!("верхний уровень: {}, с родителем: {}", a.root_count, a.with_parent_count)
                    })))
                />
                <StatCard
                    label="Уровней"
                    icon_name="tree"
                    value=metric(|a| a.level_count as f64)
                    format=ValueFormat::Integer
                />
                <StatCard
                    label="Численность"
                    icon_name="users"
                    value=metric(|a| a.total_employees as f64)
                    format=ValueFormat::Integer
                />
                <StatCard
                    label="Бюджет"
                    icon_name="payments"
                    value=metric(|a| a.total_budget)
                    format=ValueFormat::Money
                />
                <StatCard
                    label="Вне дерева"
                    icon_name="alert"
                    value=metric(|a| a.dropped_count as f64)
                    format=ValueFormat::Integer
                    warning=Signal::derive(move || analysis.with(|a| a.as_ref().is_some_and(|a| a.dropped_count > 0)))
                />
            </div>

            {move || error.get().map(|e| view! { <div class="error">{format!("Анализ недоступен: {}", e)}</div> })}

            {move || analysis.with(|a| {
                a.as_ref()
                    .filter(|a| !a.issues.is_empty())
                    .map(|a| {
                        let items = a.issues.iter().map(|i| view! { <li>{describe_issue(i)}</li> }).collect_view();
                        view! {
                            <div class="warning-box">
                                <span class="warning-box__icon">{icon("alert")}</span>
                                <ul class="warning-box__list">{items}</ul>
                            </div>
                        }
                    })
            })}

            <button class="button button--secondary button--small" on:click=move |_| set_expanded.update(|e| *e = !*e)>
                {move || if expanded.get() { icon("chevron-down") } else { icon("chevron-right") }}
                {"Бюджет по поддеревьям"}
            </button>

            <Show when=move || expanded.get()>
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">{"Центр затрат"}</th>
                            <th class="table__header-cell text-right">{"Подчинённых"}</th>
                            <th class="table__header-cell text-right">{"Численность (своя / всего)"}</th>
                            <th class="table__header-cell text-right">{"Бюджет (свой / всего)"}</th>
                            <th class="table__header-cell text-right">{"На сотрудника"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || analysis.with(|a| {
                            a.as_ref().map(|a| a.rows.clone()).unwrap_or_default()
                        }).into_iter().map(|row| {
                            let per_employee = row
                                .budget_per_employee()
                                .map(|v| format_value(v, ValueFormat::Money))
                                .unwrap_or_else(|| "—".to_string());
                            view! {
                                <tr class="table__row">
                                    <td class="table__cell">
                                        <span style=format!("padding-left: {}px;", row.depth * 16)>
                                            {format!("{} {}", row.code, row.description)}
                                        </span>
                                    </td>
                                    <td class="table__cell text-right">{row.child_count}</td>
                                    <td class="table__cell text-right">
                                        {format!("{} / {}", row.own_employees, row.total_employees)}
                                    </td>
                                    <td class="table__cell text-right">
                                        {format!(
                                            "{} / {}",
                                            format_value(row.own_budget, ValueFormat::Money),
                                            format_value(row.total_budget, ValueFormat::Money)
                                        )}
                                    </td>
                                    <td class="table__cell text-right">{per_employee}</td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_issue() {
        let dangling = IntegrityIssue::DanglingParent {
            id: "a".to_string(),
            parent_id: "b".to_string(),
        };
        assert_eq!(describe_issue(&dangling), "a: родитель b не найден");

        let duplicate = IntegrityIssue::DuplicateId {
            id: "a".to_string(),
            position: 0,
        };
        assert_eq!(describe_issue(&duplicate), "a: повторный id (позиция 1)");
    }
}
