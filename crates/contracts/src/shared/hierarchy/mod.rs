//! Построение иерархии из плоского списка записей.
//!
//! The pipeline is always the same: [`filter_records`] over the flat list,
//! then [`build_forest`] over what survived, then [`visible_rows`] with an
//! [`ExpansionState`] for rendering. Filtering happens before the tree exists,
//! so a matching child whose parent was filtered out disappears together with
//! the parent reference.
//!
//! Nothing here recurses: construction, traversal, comparison and drop all
//! use explicit stacks, so arbitrarily deep organisational structures are
//! fine. [`TreeNode`] has no serde impls: send [`preorder`] rows
//! instead and rebuild on the other side with [`build_forest`].

pub mod expansion;
pub mod filter;
pub mod forest;
pub mod record;

pub use expansion::{visible_rows, ExpansionState, VisibleRow, DEFAULT_EXPANDED_DEPTH};
pub use filter::{filter_records, matches_search, ParentFilter};
pub use forest::{
    build_forest, build_forest_with_report, count_nodes, forest_size, level_count, preorder,
    IntegrityIssue, IntegrityReport, TreeNode,
};
pub use record::HierarchyRecord;

#[cfg(test)]
pub(crate) mod test_support {
    use super::HierarchyRecord;

    /// Minimal record used by the hierarchy tests.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Rec {
        pub id: u32,
        pub code: String,
        pub name: String,
        pub parent: Option<u32>,
    }

    impl HierarchyRecord for Rec {
        type Key = u32;

        fn key(&self) -> u32 {
            self.id
        }

        fn parent_key(&self) -> Option<u32> {
            self.parent
        }

        fn record_code(&self) -> &str {
            &self.code
        }

        fn record_name(&self) -> &str {
            &self.name
        }
    }

    pub fn rec(id: u32, code: &str, parent: Option<u32>) -> Rec {
        Rec {
            id,
            code: code.to_string(),
            name: format!("Center {}", code),
            parent,
        }
    }

    pub fn named(id: u32, code: &str, name: &str, parent: Option<u32>) -> Rec {
        Rec {
            id,
            code: code.to_string(),
            name: name.to_string(),
            parent,
        }
    }
}
