use crate::domain::a001_cost_center::ui::list::CostCenterList;
use crate::domain::a002_warehouse::ui::list::WarehouseList;
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Страница в основной области
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    CostCenters,
    Warehouses,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::CostCenters, Page::Warehouses];

    pub fn title(&self) -> &'static str {
        match self {
            Page::CostCenters => "Центры затрат",
            Page::Warehouses => "Склады",
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            Page::CostCenters => "tree",
            Page::Warehouses => "warehouse",
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let active = RwSignal::new(Page::CostCenters);

    view! {
        <div class="app">
            <nav class="main-nav-bar">
                <ul>
                    {Page::ALL.into_iter().map(|page| view! {
                        <li
                            class:active=move || active.get() == page
                            on:click=move |_| active.set(page)
                        >
                            {icon(page.icon_name())}
                            <span>{page.title()}</span>
                        </li>
                    }).collect_view()}
                </ul>
            </nav>
            <main class="app__content">
                {move || match active.get() {
                    Page::CostCenters => view! { <CostCenterList /> }.into_any(),
                    Page::Warehouses => view! { <WarehouseList /> }.into_any(),
                }}
            </main>
        </div>
    }
}
