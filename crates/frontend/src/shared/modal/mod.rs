use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

/// Модальное окно карточки. Escape, клик по подложке и крестик вызывают `on_close`.
#[component]
pub fn Modal(
    #[prop(into)] title: String,
    on_close: Callback<()>,
    /// Широкий вариант для табличного содержимого (остатки склада)
    #[prop(optional)]
    wide: bool,
    children: Children,
) -> impl IntoView {
    let escape = window_event_listener(ev::keydown, move |e: ev::KeyboardEvent| {
        if e.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || escape.remove());

    let dialog_class = if wide { "modal modal--wide" } else { "modal" };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class=dialog_class on:click=|e: ev::MouseEvent| e.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <button class="button button--icon modal__close" on:click=move |_| on_close.run(())>
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body">{children()}</div>
            </div>
        </div>
    }
}
