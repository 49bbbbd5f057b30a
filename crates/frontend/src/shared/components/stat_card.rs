use crate::shared::icons::icon;
use leptos::prelude::*;

/// Формат значения карточки
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueFormat {
    Integer,
    Money,
    Percent,
}

pub fn format_value(val: f64, fmt: ValueFormat) -> String {
    match fmt {
        ValueFormat::Integer => format_thousands(val.round() as i64),
        ValueFormat::Money => {
            let abs = val.abs();
            if abs >= 1_000_000.0 {
                format!("{:.1}M ₽", val / 1_000_000.0).replace('.', ",")
            } else {
                format!("{} ₽", format_thousands(val.round() as i64))
            }
        }
        ValueFormat::Percent => format!("{:.1}%", val).replace('.', ","),
    }
}

pub fn format_thousands(n: i64) -> String {
    let s = n.unsigned_abs().to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('\u{00a0}');
        }
        result.push(ch);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    #[prop(into)]
    icon_name: String,
    /// None = loading/error
    #[prop(into)]
    value: Signal<Option<f64>>,
    format: ValueFormat,
    /// Подсветить карточку как предупреждение
    #[prop(into, optional)]
    warning: Signal<bool>,
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let class = move || {
        if warning.get() {
            "stat-card stat-card--warning"
        } else {
            "stat-card"
        }
    };

    let formatted = move || match value.get() {
        Some(v) => format_value(v, format),
        None => "—".to_string(),
    };

    view! {
        <div class=class>
            <div class="stat-card__icon">
                {icon(&icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{formatted}</div>
                {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1234567.0, ValueFormat::Integer), "1\u{00a0}234\u{00a0}567");
        assert_eq!(format_value(-1200.0, ValueFormat::Integer), "-1\u{00a0}200");
        assert_eq!(format_value(4_500_000.0, ValueFormat::Money), "4,5M ₽");
        assert_eq!(format_value(950.4, ValueFormat::Money), "950 ₽");
        assert_eq!(format_value(40.0, ValueFormat::Percent), "40,0%");
    }
}
