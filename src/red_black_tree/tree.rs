use crate::arena::{Slot, TypedArena};
use crate::entry::Entry;
use crate::red_black_tree::node::{Color, Node};
use std::cmp::Ordering;
use std::mem;

/// A red black tree. Nodes live in a typed arena so that the non-owning parent back-references
/// can be plain slot indices; `root` is absent when the tree is empty.
pub struct Tree<T, U> {
    pub nodes: TypedArena<Node<T, U>>,
    pub root: Option<Slot>,
}

impl<T, U> Tree<T, U> {
    pub fn new() -> Self {
        Tree {
            nodes: TypedArena::new(),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    // an absent child counts as black
    fn is_red(&self, slot: Option<Slot>) -> bool {
        match slot {
            None => false,
            Some(slot) => self.nodes[slot].color == Color::Red,
        }
    }

    fn is_black(&self, slot: Option<Slot>) -> bool {
        !self.is_red(slot)
    }

    fn is_left_child(&self, node: Slot) -> bool {
        match self.nodes[node].parent {
            None => false,
            Some(parent) => self.nodes[parent].left == Some(node),
        }
    }

    fn sibling(&self, node: Slot) -> Option<Slot> {
        let parent = self.nodes[node].parent?;
        if self.is_left_child(node) {
            self.nodes[parent].right
        } else {
            self.nodes[parent].left
        }
    }

    fn uncle(&self, node: Slot) -> Option<Slot> {
        let parent = self.nodes[node].parent?;
        self.sibling(parent)
    }

    // Rotations re-link the pivot's inner subtree and the rotated node before re-pointing the
    // rotated node's old parent (or the root), so the tree is never observed through a stale
    // link. Both fixup procedures go through these two primitives exclusively.
    fn rotate_left(&mut self, node: Slot) {
        let pivot = self.nodes[node]
            .right
            .expect("Expected a right child to rotate around.");
        let parent = self.nodes[node].parent;
        let inner = self.nodes[pivot].left;

        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(node);
        }
        self.nodes[node].right = inner;
        self.nodes[pivot].left = Some(node);
        self.nodes[node].parent = Some(pivot);
        self.nodes[pivot].parent = parent;

        match parent {
            None => self.root = Some(pivot),
            Some(parent) => {
                if self.nodes[parent].left == Some(node) {
                    self.nodes[parent].left = Some(pivot);
                } else {
                    self.nodes[parent].right = Some(pivot);
                }
            }
        }
    }

    fn rotate_right(&mut self, node: Slot) {
        let pivot = self.nodes[node]
            .left
            .expect("Expected a left child to rotate around.");
        let parent = self.nodes[node].parent;
        let inner = self.nodes[pivot].right;

        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(node);
        }
        self.nodes[node].left = inner;
        self.nodes[pivot].right = Some(node);
        self.nodes[node].parent = Some(pivot);
        self.nodes[pivot].parent = parent;

        match parent {
            None => self.root = Some(pivot),
            Some(parent) => {
                if self.nodes[parent].left == Some(node) {
                    self.nodes[parent].left = Some(pivot);
                } else {
                    self.nodes[parent].right = Some(pivot);
                }
            }
        }
    }

    pub fn put(&mut self, key: T, value: U) -> Option<Entry<T, U>>
    where
        T: Ord,
    {
        let mut parent = None;
        let mut current = self.root;
        while let Some(slot) = current {
            parent = Some(slot);
            current = match key.cmp(&self.nodes[slot].entry.key) {
                Ordering::Less => self.nodes[slot].left,
                Ordering::Greater => self.nodes[slot].right,
                Ordering::Equal => {
                    // overwrite in place; no structural change
                    return Some(mem::replace(
                        &mut self.nodes[slot].entry,
                        Entry { key, value },
                    ));
                }
            };
        }

        let mut node = Node::new(key, value);
        node.parent = parent;
        let slot = self.nodes.allocate(node);
        match parent {
            None => self.root = Some(slot),
            Some(parent) => {
                if self.nodes[slot].entry.key < self.nodes[parent].entry.key {
                    self.nodes[parent].left = Some(slot);
                } else {
                    self.nodes[parent].right = Some(slot);
                }
            }
        }

        self.fix_red_red(slot);
        None
    }

    // Restores the "no red node has a red child" invariant after attaching a red node.
    fn fix_red_red(&mut self, node: Slot) {
        // the root is forced black here and nowhere else
        if self.root == Some(node) {
            self.nodes[node].color = Color::Black;
            return;
        }

        let parent = self.nodes[node]
            .parent
            .expect("Expected a non-root node to have a parent.");
        if self.nodes[parent].color == Color::Black {
            return;
        }

        // parent is red, so it cannot be the root and a grandparent exists
        let grandparent = self.nodes[parent]
            .parent
            .expect("Expected a red node to have a parent.");
        let uncle = self.uncle(node);

        if self.is_red(uncle) {
            // push the violation two levels up and retry there
            let uncle = uncle.expect("Expected a red uncle node.");
            self.nodes[parent].color = Color::Black;
            self.nodes[uncle].color = Color::Black;
            self.nodes[grandparent].color = Color::Red;
            self.fix_red_red(grandparent);
            return;
        }

        let parent_is_left = self.is_left_child(parent);
        let node_is_left = self.is_left_child(node);
        if parent_is_left && node_is_left {
            // LL
            self.nodes[parent].color = Color::Black;
            self.nodes[grandparent].color = Color::Red;
            self.rotate_right(grandparent);
        } else if parent_is_left {
            // LR
            self.rotate_left(parent);
            self.nodes[node].color = Color::Black;
            self.nodes[grandparent].color = Color::Red;
            self.rotate_right(grandparent);
        } else if node_is_left {
            // RL
            self.rotate_right(parent);
            self.nodes[node].color = Color::Black;
            self.nodes[grandparent].color = Color::Red;
            self.rotate_left(grandparent);
        } else {
            // RR
            self.nodes[parent].color = Color::Black;
            self.nodes[grandparent].color = Color::Red;
            self.rotate_left(grandparent);
        }
    }

    pub fn remove(&mut self, key: &T) -> Option<Entry<T, U>>
    where
        T: Ord,
    {
        self.find(key).map(|slot| self.remove_node(slot))
    }

    fn find(&self, key: &T) -> Option<Slot>
    where
        T: Ord,
    {
        let mut current = self.root;
        while let Some(slot) = current {
            current = match key.cmp(&self.nodes[slot].entry.key) {
                Ordering::Less => self.nodes[slot].left,
                Ordering::Greater => self.nodes[slot].right,
                Ordering::Equal => return Some(slot),
            };
        }
        None
    }

    // The node that takes over the deleted node's position: absent for a leaf, the single child
    // when there is one, and otherwise the in-order successor (the leftmost node of the right
    // subtree), which is used as a swap target rather than spliced directly.
    fn find_replacement(&self, node: Slot) -> Option<Slot> {
        match (self.nodes[node].left, self.nodes[node].right) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            (Some(_), Some(right)) => {
                let mut successor = right;
                while let Some(left) = self.nodes[successor].left {
                    successor = left;
                }
                Some(successor)
            }
        }
    }

    fn remove_node(&mut self, deleted: Slot) -> Entry<T, U> {
        let replacement = self.find_replacement(deleted);

        let replacement = match replacement {
            None => {
                if self.root == Some(deleted) {
                    self.root = None;
                } else {
                    // a black leaf leaves a black deficit; resolve it while the node is still
                    // linked, since the fixup navigates through its parent and sibling
                    if self.nodes[deleted].color == Color::Black {
                        self.fix_double_black(deleted);
                    }
                    let parent = self.nodes[deleted]
                        .parent
                        .expect("Expected a non-root node to have a parent.");
                    if self.nodes[parent].left == Some(deleted) {
                        self.nodes[parent].left = None;
                    } else {
                        self.nodes[parent].right = None;
                    }
                }
                return self.nodes.free(deleted).entry;
            }
            Some(replacement) => replacement,
        };

        if self.nodes[deleted].left.is_none() || self.nodes[deleted].right.is_none() {
            // one real child
            if self.root == Some(deleted) {
                // keep the root slot and adopt the child's entry; the child of a one-child
                // node is a red leaf, so the subtree collapses to the root alone
                let child = self.nodes.free(replacement);
                let entry = mem::replace(&mut self.nodes[deleted].entry, child.entry);
                self.nodes[deleted].left = None;
                self.nodes[deleted].right = None;
                entry
            } else {
                let parent = self.nodes[deleted]
                    .parent
                    .expect("Expected a non-root node to have a parent.");
                if self.nodes[parent].left == Some(deleted) {
                    self.nodes[parent].left = Some(replacement);
                } else {
                    self.nodes[parent].right = Some(replacement);
                }
                self.nodes[replacement].parent = Some(parent);

                let both_black = self.nodes[deleted].color == Color::Black
                    && self.nodes[replacement].color == Color::Black;
                let entry = self.nodes.free(deleted).entry;
                if both_black {
                    self.fix_double_black(replacement);
                } else {
                    self.nodes[replacement].color = Color::Black;
                }
                entry
            }
        } else {
            // two children: trade entries with the in-order successor, then delete the
            // successor from its original position, where it has at most one child
            let (deleted_node, replacement_node) = self.nodes.get_pair_mut(deleted, replacement);
            mem::swap(&mut deleted_node.entry, &mut replacement_node.entry);
            self.remove_node(replacement)
        }
    }

    // Resolves the missing-black deficit at `node`'s position, propagating it upward until it is
    // absorbed by the root, a red node, or a rotation that rebuilds the black height locally.
    fn fix_double_black(&mut self, node: Slot) {
        if self.root == Some(node) {
            return;
        }

        let parent = self.nodes[node]
            .parent
            .expect("Expected a non-root node to have a parent.");
        let sibling = self.sibling(node);

        if self.is_red(sibling) {
            // rotate toward the deficient side so the node gains a black sibling, then retry
            let sibling = sibling.expect("Expected a red sibling node.");
            if self.is_left_child(node) {
                self.rotate_left(parent);
            } else {
                self.rotate_right(parent);
            }
            self.nodes[parent].color = Color::Red;
            self.nodes[sibling].color = Color::Black;
            self.fix_double_black(node);
            return;
        }

        let sibling = match sibling {
            None => {
                // no sibling to borrow a black from; the deficit moves up
                self.fix_double_black(parent);
                return;
            }
            Some(sibling) => sibling,
        };

        let sibling_left = self.nodes[sibling].left;
        let sibling_right = self.nodes[sibling].right;

        if self.is_black(sibling_left) && self.is_black(sibling_right) {
            self.nodes[sibling].color = Color::Red;
            if self.nodes[parent].color == Color::Red {
                self.nodes[parent].color = Color::Black;
            } else {
                self.fix_double_black(parent);
            }
            return;
        }

        // the sibling has a red child; one rotation around the parent rebuilds the black
        // height, with the sibling taking over the parent's color
        let parent_color = self.nodes[parent].color;
        if self.is_left_child(sibling) && self.is_red(sibling_left) {
            // LL
            self.rotate_right(parent);
            let nephew = sibling_left.expect("Expected a red nephew node.");
            self.nodes[nephew].color = Color::Black;
            self.nodes[sibling].color = parent_color;
        } else if self.is_left_child(sibling) {
            // LR
            let nephew = sibling_right.expect("Expected a red nephew node.");
            self.nodes[nephew].color = parent_color;
            self.rotate_left(sibling);
            self.rotate_right(parent);
        } else if self.is_red(sibling_left) {
            // RL
            let nephew = sibling_left.expect("Expected a red nephew node.");
            self.nodes[nephew].color = parent_color;
            self.rotate_right(sibling);
            self.rotate_left(parent);
        } else {
            // RR
            self.rotate_left(parent);
            let nephew = sibling_right.expect("Expected a red nephew node.");
            self.nodes[nephew].color = Color::Black;
            self.nodes[sibling].color = parent_color;
        }
        self.nodes[parent].color = Color::Black;
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, Slot, Tree};

    fn tree_of(keys: &[u32]) -> Tree<u32, u32> {
        let mut tree = Tree::new();
        for &key in keys {
            tree.put(key, key);
        }
        tree
    }

    fn key_at(tree: &Tree<u32, u32>, path: &[char]) -> u32 {
        let mut slot = tree.root.unwrap();
        for step in path {
            slot = match step {
                'l' => tree.nodes[slot].left.unwrap(),
                _ => tree.nodes[slot].right.unwrap(),
            };
        }
        tree.nodes[slot].entry.key
    }

    fn color_at(tree: &Tree<u32, u32>, path: &[char]) -> Color {
        let mut slot = tree.root.unwrap();
        for step in path {
            slot = match step {
                'l' => tree.nodes[slot].left.unwrap(),
                _ => tree.nodes[slot].right.unwrap(),
            };
        }
        tree.nodes[slot].color
    }

    // asserts the red black invariants plus parent-link consistency and BST order; returns the
    // number of keys in the tree
    fn assert_invariants(tree: &Tree<u32, u32>) -> usize {
        let root = match tree.root {
            None => return 0,
            Some(root) => root,
        };
        assert_eq!(tree.nodes[root].color, Color::Black);
        assert_eq!(tree.nodes[root].parent, None);

        let mut keys = Vec::new();
        check_node(tree, root, &mut keys);
        for window in keys.windows(2) {
            assert!(window[0] < window[1]);
        }
        keys.len()
    }

    // returns the black height of the subtree, counting the absent-child position as one black
    fn check_node(tree: &Tree<u32, u32>, slot: Slot, keys: &mut Vec<u32>) -> usize {
        let color = tree.nodes[slot].color;
        let left = tree.nodes[slot].left;
        let right = tree.nodes[slot].right;

        let left_black_height = match left {
            None => 1,
            Some(child) => {
                assert_eq!(tree.nodes[child].parent, Some(slot));
                if color == Color::Red {
                    assert_eq!(tree.nodes[child].color, Color::Black);
                }
                check_node(tree, child, keys)
            }
        };
        keys.push(tree.nodes[slot].entry.key);
        let right_black_height = match right {
            None => 1,
            Some(child) => {
                assert_eq!(tree.nodes[child].parent, Some(slot));
                if color == Color::Red {
                    assert_eq!(tree.nodes[child].color, Color::Black);
                }
                check_node(tree, child, keys)
            }
        };

        assert_eq!(left_black_height, right_black_height);
        match color {
            Color::Black => left_black_height + 1,
            Color::Red => left_black_height,
        }
    }

    #[test]
    fn test_ascending_inserts_rotate() {
        // the third insert triggers the RR rotation and recolor at the root
        let tree = tree_of(&[10, 20, 30]);
        assert_eq!(key_at(&tree, &[]), 20);
        assert_eq!(key_at(&tree, &['l']), 10);
        assert_eq!(key_at(&tree, &['r']), 30);
        assert_eq!(color_at(&tree, &[]), Color::Black);
        assert_eq!(color_at(&tree, &['l']), Color::Red);
        assert_eq!(color_at(&tree, &['r']), Color::Red);
        assert_invariants(&tree);
    }

    #[test]
    fn test_red_uncle_recolor() {
        // inserting 5 under two red siblings recolors both black instead of rotating
        let tree = tree_of(&[20, 10, 30, 5]);
        assert_eq!(key_at(&tree, &[]), 20);
        assert_eq!(color_at(&tree, &[]), Color::Black);
        assert_eq!(color_at(&tree, &['l']), Color::Black);
        assert_eq!(color_at(&tree, &['r']), Color::Black);
        assert_eq!(key_at(&tree, &['l', 'l']), 5);
        assert_eq!(color_at(&tree, &['l', 'l']), Color::Red);
        assert_invariants(&tree);
    }

    #[test]
    fn test_larger_keys_descend_right() {
        let tree = tree_of(&[10, 20, 15, 25, 30]);
        assert_eq!(assert_invariants(&tree), 5);
    }

    #[test]
    fn test_remove_node_with_two_children() {
        let mut tree = tree_of(&[50, 30, 70, 20, 40, 60, 80]);
        let removed = tree.remove(&50);
        assert_eq!(removed.map(|entry| entry.key), Some(50));
        // the in-order successor's entry moves into the root position
        assert_eq!(key_at(&tree, &[]), 60);
        assert_eq!(key_at(&tree, &['l']), 30);
        assert_eq!(key_at(&tree, &['r']), 70);
        assert_eq!(key_at(&tree, &['r', 'r']), 80);
        assert_eq!(assert_invariants(&tree), 6);
    }

    #[test]
    fn test_remove_black_leaf_propagates_deficit() {
        // 20 black with black children 5 and 30; removing 30 recolors 5 red
        let mut tree = tree_of(&[20, 10, 30, 5]);
        tree.remove(&10);
        assert_invariants(&tree);
        tree.remove(&30);
        assert_eq!(key_at(&tree, &[]), 20);
        assert_eq!(key_at(&tree, &['l']), 5);
        assert_eq!(color_at(&tree, &['l']), Color::Red);
        assert_eq!(assert_invariants(&tree), 2);
    }

    #[test]
    fn test_remove_root_variants() {
        // leaf root
        let mut tree = tree_of(&[10]);
        assert_eq!(tree.remove(&10).map(|entry| entry.key), Some(10));
        assert_eq!(tree.root, None);

        // one-child root keeps its slot and adopts the child's entry
        let mut tree = tree_of(&[10, 20]);
        let root = tree.root.unwrap();
        assert_eq!(tree.remove(&10).map(|entry| entry.key), Some(10));
        assert_eq!(tree.root, Some(root));
        assert_eq!(key_at(&tree, &[]), 20);
        assert_eq!(assert_invariants(&tree), 1);
    }

    #[test]
    fn test_remove_absent_key() {
        let mut tree = tree_of(&[10, 20, 30]);
        assert_eq!(tree.remove(&15), None);
        assert_eq!(assert_invariants(&tree), 3);
    }

    #[test]
    fn test_random_churn_preserves_invariants() {
        use rand::{self, Rng};

        let mut rng = rand::thread_rng();
        let mut tree = Tree::new();
        for _ in 0..10_000 {
            let key = rng.gen_range(0, 500);
            if rng.gen() {
                tree.put(key, key);
            } else {
                tree.remove(&key);
            }
            assert_eq!(assert_invariants(&tree), tree.len());
        }
    }

    #[test]
    fn test_descending_round_trip() {
        let mut tree = Tree::new();
        for key in (0..500u32).rev() {
            tree.put(key, key);
            assert_invariants(&tree);
        }
        for key in 0..500u32 {
            assert_eq!(tree.remove(&key).map(|entry| entry.key), Some(key));
            assert_invariants(&tree);
        }
        assert_eq!(tree.root, None);
        assert!(tree.nodes.is_empty());
    }
}
