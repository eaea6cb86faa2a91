//! # Change Set
//!
//! Pending writes staged by a repository during one request. Nothing in a
//! change set is durable until it is handed to [`ProductStore::apply`], which
//! applies every change inside a single transaction.
//!
//! [`ProductStore::apply`]: crate::storage::traits::ProductStore::apply

use uuid::Uuid;

use crate::domain::models::{Product, ProductOption};

/// A single staged write
#[derive(Debug, Clone, PartialEq)]
pub enum PendingChange {
    AddProduct(Product),
    UpdateProduct(Product),
    RemoveProduct { id: Uuid },
    AddOption(ProductOption),
    UpdateOption(ProductOption),
    RemoveOption { product_id: Uuid, id: Uuid },
}

/// Ordered list of staged writes, applied in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    changes: Vec<PendingChange>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, change: PendingChange) {
        self.changes.push(change);
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn changes(&self) -> &[PendingChange] {
        &self.changes
    }

    /// Move every staged change out, leaving this set empty
    pub fn take(&mut self) -> ChangeSet {
        std::mem::take(self)
    }
}

impl IntoIterator for ChangeSet {
    type Item = PendingChange;
    type IntoIter = std::vec::IntoIter<PendingChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_preserves_order_and_empties_set() {
        let mut set = ChangeSet::new();
        let product_id = Uuid::new_v4();
        let option_id = Uuid::new_v4();
        set.push(PendingChange::RemoveOption { product_id, id: option_id });
        set.push(PendingChange::RemoveProduct { id: product_id });

        let taken = set.take();

        assert!(set.is_empty());
        assert_eq!(taken.len(), 2);
        assert_eq!(
            taken.changes()[0],
            PendingChange::RemoveOption { product_id, id: option_id }
        );
        assert_eq!(taken.changes()[1], PendingChange::RemoveProduct { id: product_id });
    }
}
