use std::hash::Hash;

/// A flat record that may point at a parent record of the same collection.
pub trait HierarchyRecord {
    /// Identifier used both for the record itself and for parent references.
    type Key: Eq + Hash + Clone;

    fn key(&self) -> Self::Key;

    /// `None` marks a root.
    fn parent_key(&self) -> Option<Self::Key>;

    /// Short code matched by the search term.
    fn record_code(&self) -> &str;

    /// Display name matched by the search term.
    fn record_name(&self) -> &str;

    fn has_parent(&self) -> bool {
        self.parent_key().is_some()
    }
}
