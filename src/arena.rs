//! Fast, but limited allocator with recyclable slots.

use std::mem;
use std::ops::{Index, IndexMut};

/// A struct representing a handle to an object allocated in a `TypedArena<T>`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Slot {
    index: usize,
}

enum Block<T> {
    Occupied(T),
    Vacant(Option<Slot>),
}

/// A fast, but limited allocator that only allocates a single type of object.
///
/// Objects are stored in a backing vector and addressed through `Slot` handles, so relational
/// links between objects can be plain copyable indices rather than pointers. Freed slots are
/// threaded into a vacancy list and recycled before the backing vector grows. All objects inside
/// the arena are destroyed when the arena is destroyed, and the implementation uses no unsafe
/// code.
///
/// # Examples
///
/// ```
/// use balanced_collections::arena::TypedArena;
///
/// let mut arena = TypedArena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena.free(x), 2);
/// ```
pub struct TypedArena<T> {
    blocks: Vec<Block<T>>,
    head: Option<Slot>,
    len: usize,
}

impl<T> TypedArena<T> {
    /// Constructs a new, empty `TypedArena<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new();
    /// assert_eq!(arena.len(), 0);
    /// ```
    pub fn new() -> Self {
        TypedArena {
            blocks: Vec::new(),
            head: None,
            len: 0,
        }
    }

    /// Allocates an object in the arena and returns the `Slot` it occupies. The slot can later be
    /// used to index the arena, and to deallocate the object.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena[x], 0);
    /// ```
    pub fn allocate(&mut self, value: T) -> Slot {
        self.len += 1;
        match self.head.take() {
            None => {
                self.blocks.push(Block::Occupied(value));
                Slot {
                    index: self.blocks.len() - 1,
                }
            }
            Some(slot) => {
                let vacant_block =
                    mem::replace(&mut self.blocks[slot.index], Block::Occupied(value));
                match vacant_block {
                    Block::Vacant(next_slot) => {
                        self.head = next_slot;
                        slot
                    }
                    Block::Occupied(_) => panic!("Expected a vacant block."),
                }
            }
        }
    }

    /// Deallocates the object at a slot and returns it. The slot becomes the first candidate for
    /// recycling on the next call to `allocate`.
    ///
    /// # Panics
    ///
    /// Panics if the slot is out of range, or if the slot is vacant.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// ```
    pub fn free(&mut self, slot: Slot) -> T {
        let old_block = mem::replace(
            &mut self.blocks[slot.index],
            Block::Vacant(self.head.take()),
        );
        match old_block {
            Block::Vacant(_) => panic!("Expected an occupied block."),
            Block::Occupied(value) => {
                self.head = Some(slot);
                self.len -= 1;
                value
            }
        }
    }

    /// Returns mutable references to the objects at two distinct slots.
    ///
    /// # Panics
    ///
    /// Panics if the slots are equal, out of range, or vacant.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::TypedArena;
    /// use std::mem;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(1);
    /// let y = arena.allocate(2);
    ///
    /// let (a, b) = arena.get_pair_mut(x, y);
    /// mem::swap(a, b);
    /// assert_eq!(arena[x], 2);
    /// assert_eq!(arena[y], 1);
    /// ```
    pub fn get_pair_mut(&mut self, a: Slot, b: Slot) -> (&mut T, &mut T) {
        assert!(a != b, "Expected distinct slots.");
        let (low, high) = if a.index < b.index { (a, b) } else { (b, a) };
        let (head, tail) = self.blocks.split_at_mut(high.index);
        let low_value = match head[low.index] {
            Block::Occupied(ref mut value) => value,
            Block::Vacant(_) => panic!("Expected an occupied block."),
        };
        let high_value = match tail[0] {
            Block::Occupied(ref mut value) => value,
            Block::Vacant(_) => panic!("Expected an occupied block."),
        };
        if a.index < b.index {
            (low_value, high_value)
        } else {
            (high_value, low_value)
        }
    }

    /// Returns the number of occupied slots in the arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// arena.allocate(0);
    /// assert_eq!(arena.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena contains no objects.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new();
    /// assert!(arena.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the arena, destroying all objects and invalidating all slots.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// arena.allocate(0);
    /// arena.clear();
    /// assert!(arena.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.head = None;
        self.len = 0;
    }
}

impl<T> Default for TypedArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Slot> for TypedArena<T> {
    type Output = T;

    fn index(&self, slot: Slot) -> &Self::Output {
        match self.blocks[slot.index] {
            Block::Occupied(ref value) => value,
            Block::Vacant(_) => panic!("Expected an occupied block."),
        }
    }
}

impl<T> IndexMut<Slot> for TypedArena<T> {
    fn index_mut(&mut self, slot: Slot) -> &mut Self::Output {
        match self.blocks[slot.index] {
            Block::Occupied(ref mut value) => value,
            Block::Vacant(_) => panic!("Expected an occupied block."),
        }
    }
}
