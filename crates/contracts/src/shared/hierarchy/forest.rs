use super::HierarchyRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Узел дерева: запись и её дочерние узлы в порядке исходного списка.
///
/// Not serializable: over the wire a forest travels as flat pre-order rows
/// and is rebuilt with [`build_forest`].
pub struct TreeNode<R> {
    pub record: R,
    pub children: Vec<TreeNode<R>>,
}

impl<R> TreeNode<R> {
    pub fn leaf(record: R) -> Self {
        Self {
            record,
            children: Vec::new(),
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

// The derived drop would recurse once per level.
impl<R> Drop for TreeNode<R> {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl<R: PartialEq> PartialEq for TreeNode<R> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.record != b.record || a.children.len() != b.children.len() {
                return false;
            }
            pending.extend(a.children.iter().zip(b.children.iter()));
        }
        true
    }
}

// Only the top of the subtree: a full dump of a deep chain would recurse.
impl<R: fmt::Debug> fmt::Debug for TreeNode<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeNode")
            .field("record", &self.record)
            .field("child_count", &self.children.len())
            .field("subtree_size", &count_nodes(self))
            .finish()
    }
}

/// Аномалия исходных данных, из-за которой запись не попала в дерево
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityIssue<K> {
    /// `parent_id` не найден среди записей
    DanglingParent { id: K, parent_id: K },
    /// Запись перекрыта более поздней записью с тем же id
    DuplicateId { id: K, position: usize },
    /// Родитель найден, но цепочка предков не ведёт к корню
    /// (потомок отброшенной записи или цикл)
    Unreachable { id: K },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport<K> {
    pub issues: Vec<IntegrityIssue<K>>,
}

impl<K> Default for IntegrityReport<K> {
    fn default() -> Self {
        Self { issues: Vec::new() }
    }
}

impl<K> IntegrityReport<K> {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn dangling_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, IntegrityIssue::DanglingParent { .. }))
            .count()
    }

    pub fn duplicate_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, IntegrityIssue::DuplicateId { .. }))
            .count()
    }

    pub fn unreachable_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, IntegrityIssue::Unreachable { .. }))
            .count()
    }
}

/// Строит лес из плоского списка.
///
/// Records with an unresolved parent are dropped silently, together with
/// their descendants. When several records share an id the last one wins.
/// Roots and siblings keep the input order.
pub fn build_forest<R>(records: &[R]) -> Vec<TreeNode<R>>
where
    R: HierarchyRecord + Clone,
{
    build_forest_with_report(records).0
}

/// Same forest as [`build_forest`], plus the list of records that were left out.
pub fn build_forest_with_report<R>(
    records: &[R],
) -> (Vec<TreeNode<R>>, IntegrityReport<R::Key>)
where
    R: HierarchyRecord + Clone,
{
    let mut report = IntegrityReport::default();
    if records.is_empty() {
        return (Vec::new(), report);
    }

    // Первый проход: id -> позиция, поздняя запись перекрывает раннюю
    let mut position_by_key: HashMap<R::Key, usize> = HashMap::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        position_by_key.insert(record.key(), idx);
    }

    // Второй проход: связи родитель -> дети в порядке входа
    let mut root_positions: Vec<usize> = Vec::new();
    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut parent_of: Vec<Option<usize>> = vec![None; records.len()];
    let mut is_winner = vec![false; records.len()];
    let mut is_dangling = vec![false; records.len()];

    for (idx, record) in records.iter().enumerate() {
        let key = record.key();
        if position_by_key.get(&key) != Some(&idx) {
            report
                .issues
                .push(IntegrityIssue::DuplicateId { id: key, position: idx });
            continue;
        }
        is_winner[idx] = true;

        match record.parent_key() {
            None => root_positions.push(idx),
            Some(parent_key) => match position_by_key.get(&parent_key) {
                Some(&parent_idx) => {
                    children_of[parent_idx].push(idx);
                    parent_of[idx] = Some(parent_idx);
                }
                None => {
                    is_dangling[idx] = true;
                    report.issues.push(IntegrityIssue::DanglingParent {
                        id: key,
                        parent_id: parent_key,
                    });
                }
            },
        }
    }

    // Pre-order over everything reachable from a root. Every position sits in
    // at most one child list, so nothing is visited twice.
    let mut order: Vec<usize> = Vec::with_capacity(records.len());
    let mut stack: Vec<usize> = root_positions.iter().rev().copied().collect();
    while let Some(idx) = stack.pop() {
        order.push(idx);
        stack.extend(children_of[idx].iter().rev().copied());
    }

    let mut reached = vec![false; records.len()];
    for &idx in &order {
        reached[idx] = true;
    }
    for (idx, record) in records.iter().enumerate() {
        if is_winner[idx] && !reached[idx] && !is_dangling[idx] {
            report
                .issues
                .push(IntegrityIssue::Unreachable { id: record.key() });
        }
    }

    // Сборка снизу вверх: в обратном pre-order потомки обрабатываются
    // раньше предков, поэтому узел целиком готов к моменту переноса в родителя.
    let mut slots: Vec<Option<TreeNode<R>>> = (0..records.len()).map(|_| None).collect();
    for &idx in &order {
        slots[idx] = Some(TreeNode::leaf(records[idx].clone()));
    }

    let mut forest: Vec<TreeNode<R>> = Vec::with_capacity(root_positions.len());
    for &idx in order.iter().rev() {
        let Some(mut node) = slots[idx].take() else {
            continue;
        };
        // Siblings arrive last-first.
        node.children.reverse();
        match parent_of[idx] {
            Some(parent_idx) => {
                if let Some(parent) = slots[parent_idx].as_mut() {
                    parent.children.push(node);
                }
            }
            None => forest.push(node),
        }
    }
    forest.reverse();

    (forest, report)
}

/// Количество узлов в поддереве, включая сам узел
pub fn count_nodes<R>(node: &TreeNode<R>) -> usize {
    let mut count = 0;
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        count += 1;
        stack.extend(current.children.iter());
    }
    count
}

pub fn forest_size<R>(forest: &[TreeNode<R>]) -> usize {
    forest.iter().map(count_nodes).sum()
}

/// Number of levels in the forest: 0 when empty, 1 when it only has roots.
pub fn level_count<R>(forest: &[TreeNode<R>]) -> usize {
    preorder(forest)
        .into_iter()
        .map(|(_, depth)| depth + 1)
        .max()
        .unwrap_or(0)
}

/// Every node with its depth, depth-first pre-order, ignoring expansion.
pub fn preorder<R>(forest: &[TreeNode<R>]) -> Vec<(&TreeNode<R>, usize)> {
    let mut out = Vec::new();
    let mut stack: Vec<(&TreeNode<R>, usize)> = forest.iter().rev().map(|n| (n, 0)).collect();
    while let Some((node, depth)) = stack.pop() {
        out.push((node, depth));
        stack.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::hierarchy::test_support::{rec, Rec};
    use std::collections::HashSet;

    fn ids(nodes: &[TreeNode<Rec>]) -> Vec<u32> {
        nodes.iter().map(|n| n.record.id).collect()
    }

    fn count_dangling(records: &[Rec]) -> usize {
        let present: HashSet<u32> = records.iter().map(|r| r.id).collect();
        records
            .iter()
            .filter(|r| matches!(r.parent, Some(p) if !present.contains(&p)))
            .count()
    }

    #[test]
    fn test_dangling_parent_is_dropped() {
        let records = vec![
            rec(1, "A", None),
            rec(2, "B", Some(1)),
            rec(3, "C", Some(99)),
        ];

        let forest = build_forest(&records);

        assert_eq!(ids(&forest), vec![1]);
        assert_eq!(ids(&forest[0].children), vec![2]);
        assert!(forest[0].children[0].children.is_empty());
        assert_eq!(forest_size(&forest), 2);
    }

    #[test]
    fn test_duplicate_id_last_wins() {
        let first = crate::shared::hierarchy::test_support::named(5, "OLD", "Old", None);
        let second = crate::shared::hierarchy::test_support::named(5, "NEW", "New", None);
        let records = vec![first, rec(6, "X", Some(5)), second];

        let (forest, report) = build_forest_with_report(&records);

        let fives: Vec<_> = preorder(&forest)
            .into_iter()
            .filter(|(n, _)| n.record.id == 5)
            .collect();
        assert_eq!(fives.len(), 1);
        assert_eq!(fives[0].0.record.code, "NEW");
        assert_eq!(ids(&fives[0].0.children), vec![6]);
        assert_eq!(
            report.issues,
            vec![IntegrityIssue::DuplicateId { id: 5, position: 0 }]
        );
    }

    #[test]
    fn test_node_count_plus_dropped_equals_input() {
        let records = vec![
            rec(10, "R1", None),
            rec(11, "A", Some(10)),
            rec(12, "B", Some(10)),
            rec(13, "C", Some(11)),
            rec(20, "R2", None),
            rec(21, "D", Some(20)),
            rec(30, "E", Some(404)),
            rec(31, "F", Some(405)),
        ];

        let forest = build_forest(&records);

        assert_eq!(forest_size(&forest) + count_dangling(&records), records.len());
    }

    #[test]
    fn test_roots_appear_once_at_top_level() {
        let records = vec![
            rec(1, "A", None),
            rec(2, "B", Some(1)),
            rec(3, "C", None),
            rec(4, "D", Some(3)),
        ];

        let forest = build_forest(&records);

        assert_eq!(ids(&forest), vec![1, 3]);
        let all: Vec<u32> = preorder(&forest).iter().map(|(n, _)| n.record.id).collect();
        assert_eq!(all, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_children_follow_input_order() {
        let records = vec![
            rec(5, "Z", Some(1)),
            rec(1, "ROOT", None),
            rec(3, "M", Some(1)),
            rec(4, "A", Some(1)),
            rec(2, "child of 3", Some(3)),
        ];

        let forest = build_forest(&records);

        assert_eq!(ids(&forest), vec![1]);
        assert_eq!(ids(&forest[0].children), vec![5, 3, 4]);
        assert_eq!(ids(&forest[0].children[1].children), vec![2]);
    }

    #[test]
    fn test_descendants_of_dropped_record_are_unreachable() {
        let records = vec![
            rec(1, "A", None),
            rec(2, "B", Some(77)),
            rec(3, "C", Some(2)),
        ];

        let (forest, report) = build_forest_with_report(&records);

        assert_eq!(forest_size(&forest), 1);
        assert_eq!(
            report.issues,
            vec![
                IntegrityIssue::DanglingParent { id: 2, parent_id: 77 },
                IntegrityIssue::Unreachable { id: 3 },
            ]
        );
    }

    #[test]
    fn test_cycle_is_left_out_without_looping() {
        let records = vec![
            rec(1, "A", None),
            rec(2, "B", Some(3)),
            rec(3, "C", Some(2)),
            rec(4, "SELF", Some(4)),
        ];

        let (forest, report) = build_forest_with_report(&records);

        assert_eq!(ids(&forest), vec![1]);
        assert_eq!(report.unreachable_count(), 3);
        assert_eq!(report.dangling_count(), 0);
    }

    #[test]
    fn test_build_is_idempotent() {
        let records = vec![
            rec(1, "A", None),
            rec(2, "B", Some(1)),
            rec(3, "C", Some(2)),
            rec(4, "D", None),
        ];

        assert_eq!(build_forest(&records), build_forest(&records));
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<Rec> = Vec::new();
        let (forest, report) = build_forest_with_report(&records);
        assert!(forest.is_empty());
        assert!(report.is_clean());
        assert_eq!(level_count(&forest), 0);
    }

    #[test]
    fn test_level_count() {
        let records = vec![
            rec(1, "A", None),
            rec(2, "B", Some(1)),
            rec(3, "C", Some(2)),
            rec(4, "D", None),
        ];
        let forest = build_forest(&records);
        assert_eq!(level_count(&forest), 3);
        assert_eq!(count_nodes(&forest[0]), 3);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let depth: u32 = 100_000;
        let records: Vec<Rec> = (0..depth)
            .map(|i| rec(i, "N", if i == 0 { None } else { Some(i - 1) }))
            .collect();

        let forest = build_forest(&records);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest_size(&forest), depth as usize);
        assert_eq!(level_count(&forest), depth as usize);
    }

    #[test]
    fn test_deep_chains_compare_and_format_without_overflow() {
        let depth: u32 = 100_000;
        let records: Vec<Rec> = (0..depth)
            .map(|i| rec(i, "N", if i == 0 { None } else { Some(i - 1) }))
            .collect();

        let a = build_forest(&records);
        let b = build_forest(&records);
        assert_eq!(a, b);

        let mut shorter = records.clone();
        shorter.pop();
        assert_ne!(a, build_forest(&shorter));

        let text = format!("{:?}", a[0]);
        assert!(text.contains("subtree_size: 100000"));
    }
}
