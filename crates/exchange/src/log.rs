use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cambio_core::{Entity, TransactionId};

use crate::transaction::Transaction;

/// Append-only list of posted transactions, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionLog {
    entries: VecDeque<Transaction>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `transaction` at the front of the log.
    pub fn append(&mut self, transaction: Transaction) {
        self.entries.push_front(transaction);
    }

    /// Transactions recorded within `[start, end]`, newest first.
    ///
    /// An inverted range yields nothing.
    pub fn query_by_date_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Transaction> {
        if start > end {
            return vec![];
        }
        self.entries
            .iter()
            .filter(|t| (start..=end).contains(&t.recorded_at()))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.entries.iter().find(|t| *t.id() == id)
    }

    pub fn latest(&self) -> Option<&Transaction> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
