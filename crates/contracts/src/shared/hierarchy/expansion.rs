use super::{preorder, HierarchyRecord, TreeNode};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Nodes shallower than this are expanded until the user collapses them.
pub const DEFAULT_EXPANDED_DEPTH: usize = 2;

/// Состояние раскрытия узлов дерева, хранится отдельно от самого дерева.
///
/// Only explicit user choices are stored; every other node falls back to the
/// depth rule, so a freshly rebuilt forest gets sensible defaults for free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionState<K: Eq + Hash> {
    overrides: HashMap<K, bool>,
}

impl<K: Eq + Hash> Default for ExpansionState<K> {
    fn default() -> Self {
        Self {
            overrides: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> ExpansionState<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_for_depth(depth: usize) -> bool {
        depth < DEFAULT_EXPANDED_DEPTH
    }

    pub fn is_expanded(&self, key: &K, depth: usize) -> bool {
        self.overrides
            .get(key)
            .copied()
            .unwrap_or_else(|| Self::default_for_depth(depth))
    }

    pub fn set(&mut self, key: K, expanded: bool) {
        self.overrides.insert(key, expanded);
    }

    /// Переключить узел, вернуть новое значение
    pub fn toggle(&mut self, key: K, depth: usize) -> bool {
        let next = !self.is_expanded(&key, depth);
        self.overrides.insert(key, next);
        next
    }

    pub fn expand_all<R>(&mut self, forest: &[TreeNode<R>])
    where
        R: HierarchyRecord<Key = K>,
    {
        self.set_all(forest, true);
    }

    pub fn collapse_all<R>(&mut self, forest: &[TreeNode<R>])
    where
        R: HierarchyRecord<Key = K>,
    {
        self.set_all(forest, false);
    }

    fn set_all<R>(&mut self, forest: &[TreeNode<R>], expanded: bool)
    where
        R: HierarchyRecord<Key = K>,
    {
        for (node, _) in preorder(forest) {
            if node.has_children() {
                self.overrides.insert(node.record.key(), expanded);
            }
        }
    }

    /// Вернуть все узлы к правилу по глубине
    pub fn reset(&mut self) {
        self.overrides.clear();
    }

    /// Drop choices for nodes that are no longer in the forest.
    pub fn retain_present<R>(&mut self, forest: &[TreeNode<R>])
    where
        R: HierarchyRecord<Key = K>,
    {
        let present: HashSet<K> = preorder(forest)
            .into_iter()
            .map(|(node, _)| node.record.key())
            .collect();
        self.overrides.retain(|key, _| present.contains(key));
    }

    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

/// Строка, которую должна отрисовать древовидная таблица
#[derive(Debug)]
pub struct VisibleRow<'a, R> {
    pub node: &'a TreeNode<R>,
    pub depth: usize,
    pub expanded: bool,
}

impl<'a, R> VisibleRow<'a, R> {
    pub fn record(&self) -> &'a R {
        &self.node.record
    }

    pub fn has_children(&self) -> bool {
        self.node.has_children()
    }
}

/// Rows in depth-first pre-order; children of a collapsed node are skipped.
pub fn visible_rows<'a, R>(
    forest: &'a [TreeNode<R>],
    state: &ExpansionState<R::Key>,
) -> Vec<VisibleRow<'a, R>>
where
    R: HierarchyRecord,
{
    let mut rows = Vec::new();
    let mut stack: Vec<(&'a TreeNode<R>, usize)> =
        forest.iter().rev().map(|node| (node, 0)).collect();

    while let Some((node, depth)) = stack.pop() {
        let expanded = state.is_expanded(&node.record.key(), depth);
        rows.push(VisibleRow {
            node,
            depth,
            expanded,
        });
        if expanded {
            stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::hierarchy::build_forest;
    use crate::shared::hierarchy::test_support::{rec, Rec};

    // 1
    // ├── 2
    // │   └── 3
    // │       └── 4
    // └── 5
    // 6
    fn sample() -> Vec<TreeNode<Rec>> {
        build_forest(&[
            rec(1, "A", None),
            rec(2, "B", Some(1)),
            rec(3, "C", Some(2)),
            rec(4, "D", Some(3)),
            rec(5, "E", Some(1)),
            rec(6, "F", None),
        ])
    }

    fn visible_ids(forest: &[TreeNode<Rec>], state: &ExpansionState<u32>) -> Vec<(u32, usize)> {
        visible_rows(forest, state)
            .iter()
            .map(|row| (row.record().id, row.depth))
            .collect()
    }

    #[test]
    fn test_default_expands_two_shallowest_levels() {
        let forest = sample();
        let state = ExpansionState::new();

        // depth 2 (node 3) is visible because its parent at depth 1 is expanded,
        // but node 3 itself is collapsed, so node 4 stays hidden
        assert_eq!(
            visible_ids(&forest, &state),
            vec![(1, 0), (2, 1), (3, 2), (5, 1), (6, 0)]
        );
        assert!(state.is_expanded(&1, 0));
        assert!(state.is_expanded(&2, 1));
        assert!(!state.is_expanded(&3, 2));
    }

    #[test]
    fn test_toggle_affects_only_that_node() {
        let forest = sample();
        let mut state = ExpansionState::new();

        assert!(!state.toggle(2, 1));
        assert_eq!(
            visible_ids(&forest, &state),
            vec![(1, 0), (2, 1), (5, 1), (6, 0)]
        );
        assert!(state.is_expanded(&1, 0));

        assert!(state.toggle(2, 1));
        assert!(state.toggle(3, 2));
        assert_eq!(
            visible_ids(&forest, &state),
            vec![(1, 0), (2, 1), (3, 2), (4, 3), (5, 1), (6, 0)]
        );
    }

    #[test]
    fn test_collapsed_root_hides_whole_subtree() {
        let forest = sample();
        let mut state = ExpansionState::new();
        state.set(1, false);

        assert_eq!(visible_ids(&forest, &state), vec![(1, 0), (6, 0)]);
        // descendants keep their own state
        assert!(state.is_expanded(&2, 1));
    }

    #[test]
    fn test_expand_and_collapse_all() {
        let forest = sample();
        let mut state = ExpansionState::new();

        state.expand_all(&forest);
        assert_eq!(visible_rows(&forest, &state).len(), 6);

        state.collapse_all(&forest);
        assert_eq!(visible_ids(&forest, &state), vec![(1, 0), (6, 0)]);

        state.reset();
        assert_eq!(state.override_count(), 0);
    }

    #[test]
    fn test_retain_present_drops_stale_ids() {
        let forest = sample();
        let mut state = ExpansionState::new();
        state.set(3, true);
        state.set(42, true);

        state.retain_present(&forest);

        assert_eq!(state.override_count(), 1);
        assert!(state.is_expanded(&3, 2));
    }

    #[test]
    fn test_rows_report_children() {
        let forest = sample();
        let state = ExpansionState::new();
        let rows = visible_rows(&forest, &state);
        let with_children: Vec<u32> = rows
            .iter()
            .filter(|r| r.has_children())
            .map(|r| r.record().id)
            .collect();
        assert_eq!(with_children, vec![1, 2, 3]);
    }
}
