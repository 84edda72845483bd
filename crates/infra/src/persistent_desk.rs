//! Exchange desk backed by a key-value store.
//!
//! The whole desk state is one JSON document under [`DESK_STATE_KEY`], so a
//! single `put` either lands the full posting or nothing. If that `put`
//! fails, the in-memory desk is rolled back to its state before the post.

use chrono::{DateTime, Utc};

use cambio_core::{DomainResult, TransactionId};
use cambio_exchange::{DeskState, ExchangeDesk, PostingSettings, Transaction, TransactionInput};

use crate::error::PersistenceError;
use crate::kv_store::KeyValueStore;

pub const DESK_STATE_KEY: &str = "desk_state";

pub struct PersistentDesk<S: KeyValueStore> {
    desk: ExchangeDesk,
    store: S,
}

impl<S: KeyValueStore> PersistentDesk<S> {
    /// Load desk state from `store`; a store never saved to opens empty.
    pub fn open(store: S, settings: PostingSettings) -> Result<Self, PersistenceError> {
        let state = match store.get(DESK_STATE_KEY)? {
            Some(value) => serde_json::from_value::<DeskState>(value)?,
            None => DeskState::default(),
        };

        tracing::debug!(
            transactions = state.transactions.len(),
            "desk state loaded"
        );

        Ok(Self {
            desk: ExchangeDesk::from_state(state, settings),
            store,
        })
    }

    pub fn desk(&self) -> &ExchangeDesk {
        &self.desk
    }

    pub fn transaction(&self, id: TransactionId) -> DomainResult<&Transaction> {
        self.desk.transaction(id)
    }

    pub fn post(&mut self, input: TransactionInput) -> Result<Transaction, PersistenceError> {
        self.post_at(input, Utc::now())
    }

    /// Post and save. On a save failure the post is undone in memory too,
    /// so retrying the same input cannot double it.
    pub fn post_at(
        &mut self,
        input: TransactionInput,
        recorded_at: DateTime<Utc>,
    ) -> Result<Transaction, PersistenceError> {
        let before = self.desk.state().clone();
        let transaction = self.desk.post_at(input, recorded_at)?;

        if let Err(err) = self.save() {
            tracing::error!(
                transaction_id = %transaction.id_typed(),
                error = %err,
                "state could not be saved; transaction rolled back"
            );
            self.desk = ExchangeDesk::from_state(before, self.desk.settings().clone());
            return Err(err);
        }
        Ok(transaction)
    }

    /// Write the current state as one document.
    pub fn save(&self) -> Result<(), PersistenceError> {
        let value = serde_json::to_value(self.desk.state())?;
        self.store.put(DESK_STATE_KEY, value)
    }
}
