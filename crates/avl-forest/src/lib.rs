//! Arena-based AVL trees with ordered map, set and multiset front-ends.
//!
//! One balanced binary search tree engine ([`Tree`]) backs three
//! containers:
//!
//! - [`AvlMap`]: unique keys with mutable values.
//! - [`AvlSet`]: unique values.
//! - [`AvlMultiset`]: values with duplicates, equal values kept in insertion
//!   order.
//!
//! Nodes live in an [`arena::Arena`] and all links are `Option<u32>` indices,
//! so a [`Cursor`] is a plain copyable index that stays valid until its own
//! node is erased.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`](types::Node) link trait, [`default_comparator`] |
//! [`arena`] | Slot arena with free-list reuse |
//! [`util`] | `first`, `last`, `next`, `prev`, `find`, bounds, `count` |
//! [`avl`] | AVL node, rotations, retrace, insert/remove, invariant checks |
//! [`tree`] | [`Tree`] engine and its owning iterator |
//! [`cursor`] | [`Cursor`], borrowing iterators |
//! [`map`] / [`set`] / [`multiset`] | Container front-ends |
//! [`config`] | [`TreeConfig`], [`BalanceMode`], [`InsertPolicy`] |
//! [`error`] | [`ForestError`] |

#![forbid(unsafe_code)]

pub mod arena;
pub mod avl;
pub mod config;
pub mod cursor;
pub mod error;
pub mod map;
pub mod multiset;
pub mod set;
pub mod tree;
pub mod types;
pub mod util;

pub use config::{BalanceMode, InsertPolicy, TreeConfig};
pub use cursor::{Cursor, Iter, Keys, Values};
pub use error::{ForestError, Result};
pub use map::AvlMap;
pub use multiset::AvlMultiset;
pub use set::{AvlSet, SetIntoIter};
pub use tree::{IntoIter, Tree};
pub use types::default_comparator;
