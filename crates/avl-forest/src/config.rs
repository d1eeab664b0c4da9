//! Explicit tree configuration.
//!
//! Nothing about a tree's behavior is ambient: the comparator is passed at
//! construction, the duplicate policy travels with each insert, and the
//! rebalancing strategy lives in [`TreeConfig`].

/// How far rebalancing reaches after a structural change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BalanceMode {
    /// Classical AVL: every node from the deepest modified one up to the
    /// root is rebalanced after both insertion and removal. Height stays
    /// within `1.44 * log2(n + 2)`.
    #[default]
    Retrace,
    /// Relaxed balancing. Insertion still rebalances along the descent path,
    /// but removal rotates only at the node spliced into the erased node's
    /// place. Heights stay exact; the `|bf| <= 1` bound may be lost on
    /// ancestors of that node.
    SpliceOnly,
}

/// Duplicate handling for a single insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InsertPolicy {
    /// An equal key already present wins; nothing is inserted.
    Unique,
    /// Equal keys are kept. A new duplicate lands after every existing equal
    /// key in iteration order.
    NonUnique,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TreeConfig {
    pub balance: BalanceMode,
}

impl TreeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(mut self, balance: BalanceMode) -> Self {
        self.balance = balance;
        self
    }

    /// Whether trees built with this config guarantee `|bf| <= 1` everywhere.
    pub fn is_strict(&self) -> bool {
        self.balance == BalanceMode::Retrace
    }
}
