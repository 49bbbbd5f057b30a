/// Утилиты для таблиц: сортировка, подсветка совпадений, поле поиска
use leptos::prelude::*;
use std::cmp::Ordering;
use wasm_bindgen::JsCast;

/// Trait для строк таблицы, поддерживающих сортировку
pub trait Sortable {
    /// Сравнивает два объекта по указанному полю
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Текущая сортировка таблицы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: &'static str,
    pub ascending: bool,
}

impl SortState {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            ascending: true,
        }
    }

    /// Повторный клик по тому же полю меняет направление
    pub fn toggle(&mut self, field: &'static str) {
        if self.field == field {
            self.ascending = !self.ascending;
        } else {
            self.field = field;
            self.ascending = true;
        }
    }

    pub fn indicator(&self, field: &str) -> &'static str {
        get_sort_indicator(self.field, field, self.ascending)
    }
}

/// Stable: rows that compare equal keep their previous order.
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Сравнение строк без учёта регистра
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

pub fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Получить индикатор сортировки для заголовка
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// Разбивает текст на фрагменты (фрагмент, совпадение?) без учёта регистра
pub fn split_matches(text: &str, filter: &str) -> Vec<(String, bool)> {
    let term = filter.trim().to_lowercase();
    if term.is_empty() {
        return vec![(text.to_string(), false)];
    }

    // Сопоставление по символам: to_lowercase может менять длину строки в байтах
    let chars: Vec<char> = text.chars().collect();
    let lower: Vec<String> = chars.iter().map(|c| c.to_lowercase().collect()).collect();
    let term_chars: Vec<String> = term.chars().map(|c| c.to_string()).collect();

    let mut parts: Vec<(String, bool)> = Vec::new();
    let mut plain = String::new();
    let mut i = 0;
    while i < chars.len() {
        let is_match = i + term_chars.len() <= chars.len()
            && lower[i..i + term_chars.len()] == term_chars[..];
        if is_match {
            if !plain.is_empty() {
                parts.push((std::mem::take(&mut plain), false));
            }
            parts.push((chars[i..i + term_chars.len()].iter().collect(), true));
            i += term_chars.len();
        } else {
            plain.push(chars[i]);
            i += 1;
        }
    }
    if !plain.is_empty() {
        parts.push((plain, false));
    }
    parts
}

/// Подсветка совпадений в тексте (case-insensitive)
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let parts: Vec<AnyView> = split_matches(text, filter)
        .into_iter()
        .map(|(part, is_match)| {
            if is_match {
                view! { <span class="search-highlight">{part}</span> }.into_any()
            } else {
                view! { <span>{part}</span> }.into_any()
            }
        })
        .collect();
    view! { <>{parts}</> }.into_any()
}

/// Поле поиска с debounce и кнопкой очистки
#[component]
pub fn SearchInput(
    /// Текущее значение фильтра (для подсветки поля)
    #[prop(into)]
    value: Signal<String>,
    /// Callback для обновления значения фильтра
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Поиск по коду или наименованию...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());
    let debounce_timeout = StoredValue::new(None::<i32>);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());

        let Some(window) = web_sys::window() else {
            on_change.run(new_value);
            return;
        };
        if let Some(timeout_id) = debounce_timeout.get_value() {
            window.clear_timeout_with_handle(timeout_id);
        }

        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
            on_change.run(new_value.clone());
        }) as Box<dyn Fn()>);

        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref::<js_sys::Function>(),
            300,
        ) {
            Ok(timeout_id) => debounce_timeout.set_value(Some(timeout_id)),
            Err(e) => log::warn!("setTimeout failed: {:?}", e),
        }
        closure.forget();
    };

    let clear_filter = move |_| {
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                placeholder=placeholder
                class=move || {
                    if value.get().trim().is_empty() {
                        "search-input__field"
                    } else {
                        "search-input__field search-input__field--active"
                    }
                }
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            {move || if !input_value.get().is_empty() {
                view! {
                    <button class="search-input__clear" on:click=clear_filter title="Очистить">
                        {crate::shared::icons::icon("x")}
                    </button>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(&'static str, u32);

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "name" => cmp_ignore_case(self.0, other.0),
                _ => self.1.cmp(&other.1),
            }
        }
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let mut rows = vec![Row("b", 1), Row("a", 2), Row("c", 1)];
        sort_list(&mut rows, "count", true);
        assert_eq!(rows, vec![Row("b", 1), Row("c", 1), Row("a", 2)]);

        sort_list(&mut rows, "count", false);
        assert_eq!(rows, vec![Row("a", 2), Row("b", 1), Row("c", 1)]);
    }

    #[test]
    fn test_sort_state_toggle() {
        let mut s = SortState::new("code");
        s.toggle("code");
        assert!(!s.ascending);
        s.toggle("name");
        assert_eq!(s, SortState { field: "name", ascending: true });
        assert_eq!(s.indicator("name"), " ▲");
        assert_eq!(s.indicator("code"), " ⇅");
    }

    #[test]
    fn test_split_matches() {
        assert_eq!(
            split_matches("Производство", "вод"),
            vec![
                ("Произ".to_string(), false),
                ("вод".to_string(), true),
                ("ство".to_string(), false)
            ]
        );
        assert_eq!(split_matches("CC-100", "  "), vec![("CC-100".to_string(), false)]);
        assert_eq!(
            split_matches("Prod-PROD", "prod"),
            vec![("Prod".to_string(), true), ("-".to_string(), false), ("PROD".to_string(), true)]
        );
    }
}
