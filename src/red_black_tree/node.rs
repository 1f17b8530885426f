use crate::arena::Slot;
use crate::entry::Entry;

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// A struct representing an internal node of a red black tree.
///
/// Children are owned through the tree's arena; `parent` is a non-owning back-reference to the
/// structural parent's slot, absent for the root.
pub struct Node<T, U> {
    pub entry: Entry<T, U>,
    pub color: Color,
    pub left: Option<Slot>,
    pub right: Option<Slot>,
    pub parent: Option<Slot>,
}

impl<T, U> Node<T, U> {
    pub fn new(key: T, value: U) -> Self {
        Node {
            entry: Entry { key, value },
            color: Color::Red,
            left: None,
            right: None,
            parent: None,
        }
    }
}
