//! AVL node layout and the rebalancing primitives the engine is built on.

pub mod types;
pub mod util;

pub use types::AvlNode;
