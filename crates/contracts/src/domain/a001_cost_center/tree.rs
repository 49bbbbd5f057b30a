use super::aggregate::CostCenter;
use crate::shared::hierarchy::{
    build_forest, build_forest_with_report, filter_records, level_count, preorder,
    IntegrityReport, ParentFilter, TreeNode,
};
use serde::{Deserialize, Serialize};

/// Query-параметры GET /api/cost_center/tree
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CostCenterTreeQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub parent: ParentFilter,
}

/// Узел дерева в плоском виде
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCenterTreeRow {
    pub record: CostCenter,
    pub depth: usize,
    #[serde(rename = "childCount")]
    pub child_count: usize,
}

/// Дерево центров затрат вместе с отчётом о записях, не попавших в дерево.
///
/// `rows` is the forest in depth-first pre-order, so every parent comes
/// before its children and siblings keep their order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCenterTree {
    pub rows: Vec<CostCenterTreeRow>,
    pub report: IntegrityReport<String>,
    /// Записей после фильтрации (до построения дерева)
    pub matched: usize,
    /// Узлов в дереве
    pub size: usize,
    pub levels: usize,
}

impl CostCenterTree {
    /// Filtering runs first, so a matching child whose parent was filtered out
    /// shows up in `report` as a dangling parent.
    pub fn build(records: &[CostCenter], query: &CostCenterTreeQuery) -> Self {
        let filtered = filter_records(records, &query.search, query.parent);
        let (roots, report) = build_forest_with_report(&filtered);
        let rows: Vec<CostCenterTreeRow> = preorder(&roots)
            .into_iter()
            .map(|(node, depth)| CostCenterTreeRow {
                record: node.record.clone(),
                depth,
                child_count: node.children.len(),
            })
            .collect();

        Self {
            size: rows.len(),
            levels: level_count(&roots),
            matched: filtered.len(),
            rows,
            report,
        }
    }

    pub fn root_count(&self) -> usize {
        self.rows.iter().filter(|r| r.depth == 0).count()
    }

    /// Собирает лес обратно из строк
    pub fn to_forest(&self) -> Vec<TreeNode<CostCenter>> {
        let records: Vec<CostCenter> = self.rows.iter().map(|r| r.record.clone()).collect();
        build_forest(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center(code: &str, name: &str, parent: Option<&CostCenter>) -> CostCenter {
        CostCenter::new_for_insert(
            code.into(),
            name.into(),
            parent.map(|p| p.to_string_id()),
            None,
            0,
            0.0,
            None,
        )
    }

    fn chain(depth: usize) -> Vec<CostCenter> {
        let mut records: Vec<CostCenter> = Vec::with_capacity(depth);
        for i in 0..depth {
            let next = center(&format!("CC-{i}"), "Уровень", records.last());
            records.push(next);
        }
        records
    }

    #[test]
    fn test_unfiltered_tree() {
        let root = center("CC-100", "Производство", None);
        let child = center("CC-110", "Цех 1", Some(&root));
        let records = vec![root, child];

        let tree = CostCenterTree::build(&records, &CostCenterTreeQuery::default());

        assert_eq!(tree.root_count(), 1);
        assert_eq!(tree.rows[0].depth, 0);
        assert_eq!(tree.rows[0].child_count, 1);
        assert_eq!(tree.rows[1].depth, 1);
        assert_eq!(tree.matched, 2);
        assert_eq!(tree.size, 2);
        assert_eq!(tree.levels, 2);
        assert!(tree.report.is_clean());
    }

    #[test]
    fn test_child_of_filtered_parent_is_reported() {
        let root = center("CC-100", "Производство", None);
        let child = center("CC-110", "Цех 1", Some(&root));
        let records = vec![root, child];

        let query = CostCenterTreeQuery {
            search: "цех".into(),
            parent: ParentFilter::All,
        };
        let tree = CostCenterTree::build(&records, &query);

        assert!(tree.rows.is_empty());
        assert_eq!(tree.matched, 1);
        assert_eq!(tree.size, 0);
        assert_eq!(tree.report.dangling_count(), 1);
    }

    #[test]
    fn test_rows_rebuild_the_same_forest() {
        let a = center("CC-1", "A", None);
        let b = center("CC-2", "B", None);
        let a1 = center("CC-11", "A1", Some(&a));
        let b1 = center("CC-21", "B1", Some(&b));
        let a2 = center("CC-12", "A2", Some(&a));
        let records = vec![a1, b, a, b1, a2];

        let tree = CostCenterTree::build(&records, &CostCenterTreeQuery::default());

        let codes: Vec<&str> = tree.rows.iter().map(|r| r.record.base.code.as_str()).collect();
        assert_eq!(codes, vec!["CC-2", "CC-21", "CC-1", "CC-11", "CC-12"]);
        assert_eq!(tree.to_forest(), build_forest(&records));
    }

    #[test]
    fn test_deep_chain_goes_over_json() {
        let records = chain(20_000);

        let tree = CostCenterTree::build(&records, &CostCenterTreeQuery::default());
        let json = serde_json::to_string(&tree).unwrap();
        let back: CostCenterTree = serde_json::from_str(&json).unwrap();

        assert_eq!(back.size, 20_000);
        assert_eq!(back.levels, 20_000);
        assert_eq!(back.rows.last().map(|r| r.depth), Some(19_999));
        assert_eq!(back.to_forest().len(), 1);
        assert_eq!(back, tree);
    }

    #[test]
    fn test_query_deserializes_parent_filter() {
        let q: CostCenterTreeQuery =
            serde_json::from_str(r#"{"search":"prod","parent":"no_parent"}"#).unwrap();
        assert_eq!(q.parent, ParentFilter::NoParent);
        let empty: CostCenterTreeQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, CostCenterTreeQuery::default());
    }
}
