extern crate serde;
#[macro_use]
extern crate serde_derive;

mod entry;
pub mod arena;
pub mod avl_tree;
pub mod red_black_tree;
