//! Posting rules: how each currency operation moves the cash register and
//! bank balances.
//!
//! | Operation | Cash                               | Bank                     |
//! |-----------|------------------------------------|--------------------------|
//! | X_IN      | X += a                             | b.X -= a (ARS, USD)      |
//! | X_OUT     | X -= a                             | b.X += a (ARS, USD)      |
//! | F_BUY     | ARS -= a; F += c                   | b.ARS -= a               |
//! | F_SELL    | F -= a; ARS += c                   | b.ARS += c               |
//!
//! `a` is the amount, `c` the calculated counter-leg, `b` the bank. USDT
//! transfers never reach a bank; USD transfers reach one only when given.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cambio_core::{BankId, Currency, DomainResult};

use crate::input::TransactionInput;
use crate::operation::{BankRequirement, OperationKind};

/// A single balance a posting can move.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceTarget {
    Cash(Currency),
    Bank(BankId, Currency),
}

/// Signed movement of one balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceDelta {
    pub target: BalanceTarget,
    pub change: Decimal,
}

/// All balance movements produced by one transaction input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub deltas: Vec<BalanceDelta>,
    /// A buy/sell arrived without a calculated amount, so its counter-leg
    /// was not posted.
    pub counter_leg_skipped: bool,
}

impl Posting {
    fn push(&mut self, target: BalanceTarget, change: Decimal) {
        self.deltas.push(BalanceDelta { target, change });
    }

    fn cash(&mut self, currency: Currency, change: Decimal) {
        self.push(BalanceTarget::Cash(currency), change);
    }

    fn bank(&mut self, bank: &BankId, currency: Currency, change: Decimal) {
        self.push(BalanceTarget::Bank(bank.clone(), currency), change);
    }

    /// Net change to `target` across all deltas.
    pub fn net_change(&self, target: &BalanceTarget) -> Decimal {
        self.deltas
            .iter()
            .filter(|d| &d.target == target)
            .map(|d| d.change)
            .sum()
    }
}

/// Computes the balance deltas for `input` without touching any state.
///
/// Validates the input first, so an `Ok` posting is always safe to apply.
pub fn plan(input: &TransactionInput) -> DomainResult<Posting> {
    input.validate()?;

    let op = input.currency_operation;
    let a = input.amount.value();
    let c = input.calculated_amount.map(|c| c.value());
    let bank = match op.bank_requirement() {
        BankRequirement::Ignored => None,
        BankRequirement::Required | BankRequirement::Optional => input.bank_id.as_ref(),
    };

    let mut posting = Posting::default();

    match op.kind() {
        OperationKind::Inflow(currency) => {
            posting.cash(currency, a);
            if let Some(bank) = bank {
                posting.bank(bank, currency, -a);
            }
        }
        OperationKind::Outflow(currency) => {
            posting.cash(currency, -a);
            if let Some(bank) = bank {
                posting.bank(bank, currency, a);
            }
        }
        OperationKind::Buy(foreign) => {
            posting.cash(Currency::Ars, -a);
            match c {
                Some(c) => posting.cash(foreign, c),
                None => posting.counter_leg_skipped = true,
            }
            if let Some(bank) = bank {
                posting.bank(bank, Currency::Ars, -a);
            }
        }
        OperationKind::Sell(foreign) => {
            posting.cash(foreign, -a);
            match c {
                Some(c) => {
                    posting.cash(Currency::Ars, c);
                    if let Some(bank) = bank {
                        posting.bank(bank, Currency::Ars, c);
                    }
                }
                None => posting.counter_leg_skipped = true,
            }
        }
    }

    Ok(posting)
}

/// Absolute gap between the supplied counter-leg and the one implied by the
/// rate, when both are present.
pub fn counter_leg_divergence(input: &TransactionInput) -> Option<Decimal> {
    let supplied = input.calculated_amount?.value();
    let derived = input.derived_counter_amount()?;
    Some((supplied - derived).abs())
}
