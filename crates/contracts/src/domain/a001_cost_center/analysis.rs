//! Cost analysis over the cost-center hierarchy.
//!
//! Every figure is computed from the forest, so records that cannot be placed
//! in the tree (dangling parent, duplicate id, cycle) are counted in
//! `dropped_count` and listed in `issues`, never in the roll-ups.

use super::aggregate::CostCenter;
use crate::shared::hierarchy::{
    build_forest_with_report, level_count, preorder, HierarchyRecord, IntegrityIssue,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Свод по одному центру затрат с учётом всех потомков
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCenterRollup {
    pub id: String,
    pub code: String,
    pub description: String,
    pub depth: usize,
    pub child_count: usize,
    pub own_employees: u32,
    pub total_employees: u64,
    pub own_budget: f64,
    pub total_budget: f64,
}

impl CostCenterRollup {
    /// Бюджет на одного сотрудника по поддереву
    pub fn budget_per_employee(&self) -> Option<f64> {
        if self.total_employees == 0 {
            None
        } else {
            Some(self.total_budget / self.total_employees as f64)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CostCenterAnalysis {
    pub total_count: usize,
    pub root_count: usize,
    pub with_parent_count: usize,
    pub dropped_count: usize,
    pub level_count: usize,
    pub total_employees: u64,
    pub total_budget: f64,
    /// Строки в порядке обхода дерева (pre-order)
    pub rows: Vec<CostCenterRollup>,
    pub issues: Vec<IntegrityIssue<String>>,
}

pub fn analyze(records: &[CostCenter]) -> CostCenterAnalysis {
    let (forest, report) = build_forest_with_report(records);
    let nodes = preorder(&forest);

    // Reverse pre-order visits every child before its parent.
    let mut totals: HashMap<String, (u64, f64)> = HashMap::with_capacity(nodes.len());
    for (node, _) in nodes.iter().rev() {
        let mut employees = node.record.employee_count as u64;
        let mut budget = node.record.budget;
        for child in &node.children {
            if let Some((e, b)) = totals.get(&child.record.key()) {
                employees += e;
                budget += b;
            }
        }
        totals.insert(node.record.key(), (employees, budget));
    }

    let rows: Vec<CostCenterRollup> = nodes
        .iter()
        .map(|(node, depth)| {
            let c = &node.record;
            let (total_employees, total_budget) =
                totals.get(&c.key()).copied().unwrap_or_default();
            CostCenterRollup {
                id: c.key(),
                code: c.base.code.clone(),
                description: c.base.description.clone(),
                depth: *depth,
                child_count: node.children.len(),
                own_employees: c.employee_count,
                total_employees,
                own_budget: c.budget,
                total_budget,
            }
        })
        .collect();

    let (total_employees, total_budget) = forest
        .iter()
        .filter_map(|root| totals.get(&root.record.key()))
        .fold((0u64, 0.0f64), |(e, b), (re, rb)| (e + re, b + rb));

    CostCenterAnalysis {
        total_count: records.len(),
        root_count: forest.len(),
        with_parent_count: records.iter().filter(|c| c.has_parent()).count(),
        dropped_count: records.len() - rows.len(),
        level_count: level_count(&forest),
        total_employees,
        total_budget,
        rows,
        issues: report.issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center(code: &str, parent: Option<&CostCenter>, employees: u32, budget: f64) -> CostCenter {
        CostCenter::new_for_insert(
            code.to_string(),
            format!("Центр {}", code),
            parent.map(|p| p.to_string_id()),
            None,
            employees,
            budget,
            None,
        )
    }

    #[test]
    fn test_rollup_sums_subtree() {
        let root = center("ROOT", None, 2, 100.0);
        let a = center("A", Some(&root), 5, 50.0);
        let a1 = center("A1", Some(&a), 1, 10.0);
        let b = center("B", Some(&root), 3, 30.0);
        let other = center("OTHER", None, 4, 0.0);
        let records = vec![root, a, a1, b, other];

        let analysis = analyze(&records);

        assert_eq!(analysis.total_count, 5);
        assert_eq!(analysis.root_count, 2);
        assert_eq!(analysis.with_parent_count, 3);
        assert_eq!(analysis.dropped_count, 0);
        assert_eq!(analysis.level_count, 3);
        assert_eq!(analysis.total_employees, 15);
        assert_eq!(analysis.total_budget, 190.0);

        let codes: Vec<&str> = analysis.rows.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["ROOT", "A", "A1", "B", "OTHER"]);

        let root_row = &analysis.rows[0];
        assert_eq!(root_row.total_employees, 11);
        assert_eq!(root_row.total_budget, 190.0);
        assert_eq!(root_row.child_count, 2);

        let a_row = &analysis.rows[1];
        assert_eq!(a_row.depth, 1);
        assert_eq!(a_row.total_employees, 6);
        assert_eq!(a_row.total_budget, 60.0);
        assert_eq!(a_row.budget_per_employee(), Some(10.0));

        assert_eq!(analysis.rows[4].budget_per_employee(), Some(0.0));
    }

    #[test]
    fn test_dangling_records_are_reported_not_summed() {
        let root = center("ROOT", None, 1, 1.0);
        let mut lost = center("LOST", None, 100, 100.0);
        lost.parent_id = Some("missing".into());
        let records = vec![root, lost];

        let analysis = analyze(&records);

        assert_eq!(analysis.dropped_count, 1);
        assert_eq!(analysis.total_employees, 1);
        assert_eq!(
            analysis.issues,
            vec![IntegrityIssue::DanglingParent {
                id: records[1].to_string_id(),
                parent_id: "missing".into(),
            }]
        );
    }

    #[test]
    fn test_empty_analysis() {
        let analysis = analyze(&[]);
        assert_eq!(analysis, CostCenterAnalysis::default());
    }
}
