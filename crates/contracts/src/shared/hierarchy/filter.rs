use super::HierarchyRecord;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Фильтр по наличию родителя (только прямая ссылка `parent_id`, без учёта глубины)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentFilter {
    #[default]
    All,
    HasParent,
    NoParent,
}

impl ParentFilter {
    pub const ALL: [ParentFilter; 3] = [
        ParentFilter::All,
        ParentFilter::HasParent,
        ParentFilter::NoParent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParentFilter::All => "all",
            ParentFilter::HasParent => "has_parent",
            ParentFilter::NoParent => "no_parent",
        }
    }

    /// Подпись для выпадающего списка
    pub fn label(&self) -> &'static str {
        match self {
            ParentFilter::All => "Все",
            ParentFilter::HasParent => "Есть родитель",
            ParentFilter::NoParent => "Верхний уровень",
        }
    }

    pub fn accepts<R: HierarchyRecord>(&self, record: &R) -> bool {
        match self {
            ParentFilter::All => true,
            ParentFilter::HasParent => record.has_parent(),
            ParentFilter::NoParent => !record.has_parent(),
        }
    }
}

impl FromStr for ParentFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(ParentFilter::All),
            "has_parent" => Ok(ParentFilter::HasParent),
            "no_parent" => Ok(ParentFilter::NoParent),
            other => Err(anyhow::anyhow!("Unknown parent filter: {}", other)),
        }
    }
}

impl std::fmt::Display for ParentFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive substring match on code or name.
///
/// The term is trimmed first, unlike a plain substring test: `"prod "` matches
/// `"Production"` and a whitespace-only term matches everything. Inner
/// whitespace is kept, so `"information tech"` still needs the space.
pub fn matches_search<R: HierarchyRecord>(record: &R, search_term: &str) -> bool {
    let term = search_term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    record.record_code().to_lowercase().contains(&term)
        || record.record_name().to_lowercase().contains(&term)
}

/// Фильтрация плоского списка до построения дерева
pub fn filter_records<R>(records: &[R], search_term: &str, parent_filter: ParentFilter) -> Vec<R>
where
    R: HierarchyRecord + Clone,
{
    records
        .iter()
        .filter(|r| parent_filter.accepts(*r) && matches_search(*r, search_term))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::hierarchy::build_forest;
    use crate::shared::hierarchy::test_support::{named, rec, Rec};

    fn sample() -> Vec<Rec> {
        vec![
            named(1, "PRD", "Production", None),
            named(2, "PRD-S", "Production-Sub", Some(1)),
            named(3, "ADM", "Administration", None),
            named(4, "IT", "Information technology", Some(3)),
        ]
    }

    #[test]
    fn test_no_parent_excludes_matching_child() {
        let result = filter_records(&sample(), "prod", ParentFilter::NoParent);
        let ids: Vec<u32> = result.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_search_matches_code_or_name_case_insensitive() {
        let by_code = filter_records(&sample(), "it", ParentFilter::All);
        let ids: Vec<u32> = by_code.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![4]);

        let by_either = filter_records(&sample(), "Ad", ParentFilter::All);
        let ids: Vec<u32> = by_either.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3]);

        let by_name = filter_records(&sample(), "PRODUCTION-", ParentFilter::All);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, 2);
    }

    #[test]
    fn test_has_parent_checks_direct_reference_only() {
        let mut records = sample();
        records.push(rec(5, "DEEP", Some(4)));
        let ids: Vec<u32> = filter_records(&records, "", ParentFilter::HasParent)
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![2, 4, 5]);
    }

    #[test]
    fn test_blank_term_keeps_everything() {
        assert_eq!(filter_records(&sample(), "   ", ParentFilter::All), sample());
    }

    #[test]
    fn test_search_term_is_trimmed_at_the_ends_only() {
        let prd = named(1, "PRD", "Production", None);
        assert!(matches_search(&prd, "prod "));
        assert!(matches_search(&prd, "  PRD"));

        let it = named(4, "IT", "Information technology", None);
        assert!(matches_search(&it, " information tech "));
        assert!(!matches_search(&it, "informationtech"));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let once = filter_records(&sample(), "pro", ParentFilter::All);
        let twice = filter_records(&once, "pro", ParentFilter::All);
        assert_eq!(once, twice);

        let once = filter_records(&sample(), "", ParentFilter::HasParent);
        let twice = filter_records(&once, "", ParentFilter::HasParent);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_child_without_matching_parent_leaves_forest() {
        // Only the child matches; its parent is filtered out before the tree is built.
        let filtered = filter_records(&sample(), "technology", ParentFilter::All);
        assert_eq!(filtered.len(), 1);
        assert!(build_forest(&filtered).is_empty());
    }

    #[test]
    fn test_parse_parent_filter() {
        assert_eq!("no_parent".parse::<ParentFilter>().unwrap(), ParentFilter::NoParent);
        assert_eq!("".parse::<ParentFilter>().unwrap(), ParentFilter::All);
        assert!("grandparent".parse::<ParentFilter>().is_err());
        for f in ParentFilter::ALL {
            assert_eq!(f.as_str().parse::<ParentFilter>().unwrap(), f);
        }
    }
}
