// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ancestor-chain containment for sample targets.
//!
//! Touch events report every contact on the screen, including ones that started on
//! other elements. Only samples whose target lies inside the tracked surface's
//! subtree are kept.

/// Provide parent relationships for target handles.
pub trait ParentLookup<T> {
    /// Parent of `node`, or `None` at a root.
    fn parent_of(&self, node: &T) -> Option<T>;
}

/// A lookup where every node is its own root.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<T> ParentLookup<T> for NoParent {
    fn parent_of(&self, _: &T) -> Option<T> {
        None
    }
}

impl<T, F: Fn(&T) -> Option<T>> ParentLookup<T> for F {
    fn parent_of(&self, node: &T) -> Option<T> {
        self(node)
    }
}

/// Whether `target` is `root` or one of its descendants.
///
/// Walks parents from `target` upwards. The ancestry is assumed acyclic.
///
/// ```
/// use understory_pointer::scope::is_within;
///
/// let parents = |n: &u32| -> Option<u32> {
///     match *n {
///         3 => Some(2),
///         2 => Some(1),
///         _ => None,
///     }
/// };
/// assert!(is_within(&2_u32, &3, &parents));
/// assert!(is_within(&2_u32, &2, &parents));
/// assert!(!is_within(&3_u32, &2, &parents));
/// ```
pub fn is_within<T: PartialEq>(root: &T, target: &T, lookup: &impl ParentLookup<T>) -> bool {
    if target == root {
        return true;
    }
    let mut cur = lookup.parent_of(target);
    while let Some(node) = cur {
        if node == *root {
            return true;
        }
        cur = lookup.parent_of(&node);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Parents;
    impl ParentLookup<u32> for Parents {
        fn parent_of(&self, node: &u32) -> Option<u32> {
            match node {
                10 | 11 => Some(1),
                20 => Some(10),
                1 | 2 => Some(0),
                _ => None,
            }
        }
    }

    #[test]
    fn descendants_are_within() {
        assert!(is_within(&1, &20, &Parents));
        assert!(is_within(&0, &20, &Parents));
        assert!(is_within(&10, &20, &Parents));
    }

    #[test]
    fn siblings_and_ancestors_are_outside() {
        assert!(!is_within(&11, &20, &Parents));
        assert!(!is_within(&2, &10, &Parents));
        assert!(!is_within(&20, &1, &Parents));
    }

    #[test]
    fn no_parent_only_contains_root() {
        assert!(is_within(&5_u32, &5, &NoParent));
        assert!(!is_within(&5_u32, &6, &NoParent));
    }
}
