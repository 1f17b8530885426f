use crate::avl_tree::node::Node;
use crate::entry::Entry;
use std::cmp::Ordering;
use std::mem;

pub type Tree<T, U> = Option<Box<Node<T, U>>>;

pub fn height<T, U>(tree: &Tree<T, U>) -> usize {
    match tree {
        None => 0,
        Some(ref node) => node.height,
    }
}

fn rotate_left<T, U>(mut node: Box<Node<T, U>>) -> Box<Node<T, U>> {
    let mut child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.right = child.left.take();
    node.update_height();
    child.left = Some(node);
    child.update_height();
    child
}

fn rotate_right<T, U>(mut node: Box<Node<T, U>>) -> Box<Node<T, U>> {
    let mut child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.left = child.right.take();
    node.update_height();
    child.right = Some(node);
    child.update_height();
    child
}

// Recomputes the node's height and restores the AVL invariant at its position. A balance factor
// of 2 with a left-leaning or even left child is the LL case (one right rotation); a left child
// leaning right first gets rotated left to reduce LR to LL. The right-heavy cases mirror this.
fn rebalance<T, U>(tree: &mut Tree<T, U>) {
    let mut node = match tree.take() {
        Some(node) => node,
        None => return,
    };

    node.update_height();

    if node.balance_factor() > 1 {
        if let Some(child) = node.left.take() {
            if child.balance_factor() < 0 {
                node.left = Some(rotate_left(child));
            } else {
                node.left = Some(child);
            }
        }
        node = rotate_right(node);
    } else if node.balance_factor() < -1 {
        if let Some(child) = node.right.take() {
            if child.balance_factor() > 0 {
                node.right = Some(rotate_right(child));
            } else {
                node.right = Some(child);
            }
        }
        node = rotate_left(node);
    }

    *tree = Some(node);
}

// precondition: the tree is non-empty
fn remove_min<T, U>(tree: &mut Tree<T, U>) -> Box<Node<T, U>> {
    let mut node = match tree.take() {
        Some(node) => node,
        None => unreachable!(),
    };

    match node.left {
        Some(_) => {
            let min = remove_min(&mut node.left);
            *tree = Some(node);
            rebalance(tree);
            min
        }
        None => {
            *tree = node.right.take();
            node
        }
    }
}

pub fn put<T, U>(tree: &mut Tree<T, U>, key: T, value: U) -> Option<Entry<T, U>>
where
    T: Ord,
{
    let displaced = match tree {
        Some(ref mut node) => match key.cmp(&node.entry.key) {
            Ordering::Less => put(&mut node.left, key, value),
            Ordering::Greater => put(&mut node.right, key, value),
            Ordering::Equal => {
                // overwrite in place; no structural change, so no rebalancing
                return Some(mem::replace(&mut node.entry, Entry { key, value }));
            }
        },
        None => {
            *tree = Some(Box::new(Node::new(key, value)));
            return None;
        }
    };

    rebalance(tree);
    displaced
}

pub fn remove<T, U>(tree: &mut Tree<T, U>, key: &T) -> Option<Entry<T, U>>
where
    T: Ord,
{
    let mut node = match tree.take() {
        Some(node) => node,
        None => return None,
    };

    let removed = match key.cmp(&node.entry.key) {
        Ordering::Less => {
            let removed = remove(&mut node.left, key);
            *tree = Some(node);
            removed
        }
        Ordering::Greater => {
            let removed = remove(&mut node.right, key);
            *tree = Some(node);
            removed
        }
        Ordering::Equal => {
            let Node { entry, left, right, .. } = *node;
            match (left, right) {
                (None, right) => *tree = right,
                (left, None) => *tree = left,
                (left, mut right) => {
                    // the in-order successor takes over the deleted node's position
                    let mut successor = remove_min(&mut right);
                    successor.left = left;
                    successor.right = right;
                    *tree = Some(successor);
                }
            }
            Some(entry)
        }
    };

    rebalance(tree);
    removed
}
