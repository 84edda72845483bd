use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cambio_core::{BankId, Currency};

/// Running balance of the cash register ("caja") per currency.
///
/// Every currency is always present, starting at zero. Balances are signed:
/// the register can go negative when more leaves than was recorded entering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CashRegisterBalances(BTreeMap<Currency, Decimal>);

impl CashRegisterBalances {
    pub fn new() -> Self {
        Self(Currency::ALL.into_iter().map(|c| (c, Decimal::ZERO)).collect())
    }

    pub fn get(&self, currency: Currency) -> Decimal {
        self.0.get(&currency).copied().unwrap_or(Decimal::ZERO)
    }

    pub(crate) fn set(&mut self, currency: Currency, balance: Decimal) {
        self.0.insert(currency, balance);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Currency, Decimal)> + '_ {
        Currency::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

impl Default for CashRegisterBalances {
    fn default() -> Self {
        Self::new()
    }
}

/// Running balance held at each bank, per currency.
///
/// Banks appear the first time a posting touches them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BankBalances(BTreeMap<BankId, BTreeMap<Currency, Decimal>>);

impl BankBalances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, bank: &BankId, currency: Currency) -> Decimal {
        self.0
            .get(bank)
            .and_then(|per_currency| per_currency.get(&currency))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub(crate) fn set(&mut self, bank: &BankId, currency: Currency, balance: Decimal) {
        self.0.entry(bank.clone()).or_default().insert(currency, balance);
    }

    pub fn contains_bank(&self, bank: &BankId) -> bool {
        self.0.contains_key(bank)
    }

    /// Banks in name order.
    pub fn banks(&self) -> impl Iterator<Item = &BankId> {
        self.0.keys()
    }

    /// Balances recorded for `bank`, in currency order.
    pub fn for_bank(&self, bank: &BankId) -> Vec<(Currency, Decimal)> {
        self.0
            .get(bank)
            .map(|m| m.iter().map(|(c, v)| (*c, *v)).collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
