//! The exchange desk: sole owner of the cash register, the bank balances and
//! the transaction log.
//!
//! `post` is the only way to change any of them. It validates and plans the
//! whole posting first, stages every new balance with checked arithmetic, and
//! only then writes, so a rejected input leaves no trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cambio_core::{DomainError, DomainResult, TransactionId};

use crate::balances::{BankBalances, CashRegisterBalances};
use crate::input::TransactionInput;
use crate::log::TransactionLog;
use crate::posting::{self, BalanceTarget, Posting};
use crate::transaction::Transaction;

/// Tunables for posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingSettings {
    /// Largest accepted gap between a supplied calculated amount and the one
    /// implied by the rate before a warning is logged.
    pub rate_tolerance: Decimal,
}

impl PostingSettings {
    /// Gap between the supplied and the rate-implied counter-leg, when it is
    /// larger than `rate_tolerance`.
    pub fn rate_mismatch(&self, input: &TransactionInput) -> Option<Decimal> {
        posting::counter_leg_divergence(input).filter(|gap| *gap > self.rate_tolerance)
    }
}

impl Default for PostingSettings {
    fn default() -> Self {
        Self {
            rate_tolerance: Decimal::new(1, 2),
        }
    }
}

/// Serializable snapshot of everything the desk owns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeskState {
    pub cash: CashRegisterBalances,
    pub banks: BankBalances,
    pub transactions: TransactionLog,
}

#[derive(Debug, Clone, Default)]
pub struct ExchangeDesk {
    state: DeskState,
    settings: PostingSettings,
}

impl ExchangeDesk {
    pub fn new(settings: PostingSettings) -> Self {
        Self::from_state(DeskState::default(), settings)
    }

    /// Rehydrate a desk from a previously saved snapshot.
    pub fn from_state(state: DeskState, settings: PostingSettings) -> Self {
        Self { state, settings }
    }

    pub fn cash(&self) -> &CashRegisterBalances {
        &self.state.cash
    }

    pub fn banks(&self) -> &BankBalances {
        &self.state.banks
    }

    pub fn log(&self) -> &TransactionLog {
        &self.state.transactions
    }

    pub fn settings(&self) -> &PostingSettings {
        &self.settings
    }

    pub fn state(&self) -> &DeskState {
        &self.state
    }

    pub fn into_state(self) -> DeskState {
        self.state
    }

    /// Balance deltas `input` would produce, without posting it.
    pub fn preview(&self, input: &TransactionInput) -> DomainResult<Posting> {
        posting::plan(input)
    }

    pub fn transaction(&self, id: TransactionId) -> DomainResult<&Transaction> {
        self.state.transactions.get(id).ok_or_else(DomainError::not_found)
    }

    pub fn query_by_date_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Transaction> {
        self.state.transactions.query_by_date_range(start, end)
    }

    /// Post `input` stamped with the current time.
    pub fn post(&mut self, input: TransactionInput) -> DomainResult<Transaction> {
        self.post_at(input, Utc::now())
    }

    /// Post `input` stamped with `recorded_at`.
    pub fn post_at(
        &mut self,
        input: TransactionInput,
        recorded_at: DateTime<Utc>,
    ) -> DomainResult<Transaction> {
        let op = input.currency_operation;

        let planned = posting::plan(&input).inspect_err(|err| {
            tracing::debug!(operation = %op, error = %err, "transaction rejected");
        })?;
        let staged = self.stage(&planned)?;

        if planned.counter_leg_skipped {
            tracing::warn!(
                operation = %op,
                amount = %input.amount,
                "no calculated amount on trade; counter-leg not posted"
            );
        }
        if let Some(gap) = self.settings.rate_mismatch(&input) {
            tracing::warn!(
                operation = %op,
                amount = %input.amount,
                gap = %gap,
                tolerance = %self.settings.rate_tolerance,
                "calculated amount diverges from amount and exchange rate"
            );
        }

        for (target, balance) in staged {
            match target {
                BalanceTarget::Cash(currency) => self.state.cash.set(currency, balance),
                BalanceTarget::Bank(bank, currency) => self.state.banks.set(&bank, currency, balance),
            }
        }

        let transaction = Transaction::record(input, recorded_at);
        tracing::info!(
            transaction_id = %transaction.id_typed(),
            operation = %op,
            amount = %transaction.input().amount,
            bank = ?transaction.input().bank_id.as_ref().map(|b| b.as_str()),
            "transaction posted"
        );
        self.state.transactions.append(transaction.clone());

        Ok(transaction)
    }

    fn balance_of(&self, target: &BalanceTarget) -> Decimal {
        match target {
            BalanceTarget::Cash(currency) => self.state.cash.get(*currency),
            BalanceTarget::Bank(bank, currency) => self.state.banks.get(bank, *currency),
        }
    }

    /// New value of every touched balance, or an error if any would overflow.
    fn stage(&self, posting: &Posting) -> DomainResult<Vec<(BalanceTarget, Decimal)>> {
        let mut staged: Vec<(BalanceTarget, Decimal)> = Vec::with_capacity(posting.deltas.len());

        for delta in &posting.deltas {
            let current = staged
                .iter()
                .rev()
                .find(|(t, _)| *t == delta.target)
                .map(|(_, v)| *v)
                .unwrap_or_else(|| self.balance_of(&delta.target));

            let next = current.checked_add(delta.change).ok_or_else(|| {
                DomainError::invariant(format!("balance overflow on {:?}", delta.target))
            })?;
            staged.push((delta.target.clone(), next));
        }

        Ok(staged)
    }
}
