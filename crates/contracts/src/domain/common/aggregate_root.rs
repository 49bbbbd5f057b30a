/// Статические сведения об агрегате: имена для БД, REST, журнала и UI
pub trait AggregateRoot {
    /// Индекс агрегата в системе (например, "a001")
    fn aggregate_index() -> &'static str;

    /// Имя коллекции для БД и REST (например, "cost_center")
    fn collection_name() -> &'static str;

    /// Имя элемента для UI (единственное число)
    fn element_name() -> &'static str;

    /// Имя списка для UI (множественное число)
    fn list_name() -> &'static str;

    /// Категория журнала событий, например "a001_cost_center"
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    fn api_path() -> String {
        format!("/api/{}", Self::collection_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Depot;

    impl AggregateRoot for Depot {
        fn aggregate_index() -> &'static str {
            "a009"
        }
        fn collection_name() -> &'static str {
            "depot"
        }
        fn element_name() -> &'static str {
            "Депо"
        }
        fn list_name() -> &'static str {
            "Депо"
        }
    }

    #[test]
    fn test_derived_names() {
        assert_eq!(Depot::full_name(), "a009_depot");
        assert_eq!(Depot::api_path(), "/api/depot");
    }
}
