//! Проверки ссылок между центрами затрат перед записью.
//!
//! `live` is always the current list of not-deleted records. A record that
//! passes these checks never ends up dropped by `build_forest`.

use super::aggregate::CostCenter;
use crate::shared::hierarchy::HierarchyRecord;
use std::collections::{HashMap, HashSet};

/// Родитель должен существовать и не быть потомком самой записи.
pub fn check_parent(candidate: &CostCenter, live: &[CostCenter]) -> Result<(), String> {
    let Some(parent_key) = candidate.parent_key() else {
        return Ok(());
    };
    let own_key = candidate.key();

    let parent_of: HashMap<String, Option<String>> = live
        .iter()
        .filter(|c| c.key() != own_key)
        .map(|c| (c.key(), c.parent_key()))
        .collect();
    if !parent_of.contains_key(&parent_key) && parent_key != own_key {
        return Err(format!("Родительский центр затрат не найден: {}", parent_key));
    }

    // Подъём по предкам нового родителя
    let mut seen: HashSet<String> = HashSet::new();
    let mut current = Some(parent_key);
    while let Some(key) = current {
        if key == own_key {
            return Err("Родителем не может быть подчинённый центр затрат".into());
        }
        if !seen.insert(key.clone()) {
            break;
        }
        current = parent_of.get(&key).cloned().flatten();
    }
    Ok(())
}

/// Удалять можно только центр без живых дочерних записей.
pub fn check_deletable(id: &str, live: &[CostCenter]) -> Result<(), String> {
    let children: Vec<&str> = live
        .iter()
        .filter(|c| c.key() != id && c.parent_key().as_deref() == Some(id))
        .map(|c| c.base.code.as_str())
        .collect();
    if children.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "Есть подчинённые центры затрат ({}): {}",
            children.len(),
            children.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center(code: &str, parent: Option<&CostCenter>) -> CostCenter {
        CostCenter::new_for_insert(
            code.into(),
            format!("Центр {}", code),
            parent.map(|p| p.to_string_id()),
            None,
            0,
            0.0,
            None,
        )
    }

    #[test]
    fn test_root_and_existing_parent_are_accepted() {
        let root = center("CC-1", None);
        let child = center("CC-2", Some(&root));
        let live = vec![root.clone()];

        assert!(check_parent(&root, &live).is_ok());
        assert!(check_parent(&child, &live).is_ok());
    }

    #[test]
    fn test_missing_or_deleted_parent_is_rejected() {
        let gone = center("CC-1", None);
        let child = center("CC-2", Some(&gone));

        // `gone` is not in the live list
        let err = check_parent(&child, &[child.clone()]).unwrap_err();
        assert!(err.contains(&gone.to_string_id()));
    }

    #[test]
    fn test_descendant_as_parent_is_rejected() {
        let a = center("CC-1", None);
        let b = center("CC-2", Some(&a));
        let c = center("CC-3", Some(&b));
        let live = vec![a.clone(), b.clone(), c.clone()];

        let mut moved = a.clone();
        moved.parent_id = Some(c.to_string_id());
        assert!(check_parent(&moved, &live).is_err());

        // Moving a leaf under a sibling branch is fine
        let d = center("CC-4", Some(&a));
        let mut live = live;
        live.push(d.clone());
        let mut moved_leaf = c.clone();
        moved_leaf.parent_id = Some(d.to_string_id());
        assert!(check_parent(&moved_leaf, &live).is_ok());
    }

    #[test]
    fn test_existing_cycle_elsewhere_does_not_hang() {
        let mut x = center("CC-X", None);
        let mut y = center("CC-Y", None);
        x.parent_id = Some(y.to_string_id());
        y.parent_id = Some(x.to_string_id());
        let newcomer = center("CC-N", Some(&x));

        assert!(check_parent(&newcomer, &[x, y]).is_ok());
    }

    #[test]
    fn test_parent_with_live_children_cannot_be_deleted() {
        let root = center("CC-1", None);
        let child = center("CC-2", Some(&root));
        let live = vec![root.clone(), child.clone()];

        let err = check_deletable(&root.to_string_id(), &live).unwrap_err();
        assert!(err.contains("CC-2"));
        assert!(check_deletable(&child.to_string_id(), &live).is_ok());
        assert!(check_deletable(&root.to_string_id(), &[root.clone()]).is_ok());
    }
}
