use core::str::FromStr;

use serde::{Deserialize, Serialize};

use cambio_core::{Currency, DomainError};

/// Currency operation selected on the transaction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CurrencyOperation {
    ArsIn,
    ArsOut,
    UsdtBuy,
    UsdtSell,
    UsdtIn,
    UsdtOut,
    UsdIn,
    UsdOut,
    UsdBuy,
    UsdSell,
}

/// What an operation does to the cash register, independent of naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Currency enters the register.
    Inflow(Currency),
    /// Currency leaves the register.
    Outflow(Currency),
    /// ARS is paid to acquire the foreign currency.
    Buy(Currency),
    /// The foreign currency is paid to acquire ARS.
    Sell(Currency),
}

/// Whether an operation needs a bank reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankRequirement {
    Required,
    /// Bank leg is posted only when a bank is given.
    Optional,
    /// Bank is never touched, even when one is given.
    Ignored,
}

impl CurrencyOperation {
    pub const ALL: [CurrencyOperation; 10] = [
        CurrencyOperation::ArsIn,
        CurrencyOperation::ArsOut,
        CurrencyOperation::UsdtBuy,
        CurrencyOperation::UsdtSell,
        CurrencyOperation::UsdtIn,
        CurrencyOperation::UsdtOut,
        CurrencyOperation::UsdIn,
        CurrencyOperation::UsdOut,
        CurrencyOperation::UsdBuy,
        CurrencyOperation::UsdSell,
    ];

    pub fn kind(self) -> OperationKind {
        match self {
            CurrencyOperation::ArsIn => OperationKind::Inflow(Currency::Ars),
            CurrencyOperation::ArsOut => OperationKind::Outflow(Currency::Ars),
            CurrencyOperation::UsdtBuy => OperationKind::Buy(Currency::Usdt),
            CurrencyOperation::UsdtSell => OperationKind::Sell(Currency::Usdt),
            CurrencyOperation::UsdtIn => OperationKind::Inflow(Currency::Usdt),
            CurrencyOperation::UsdtOut => OperationKind::Outflow(Currency::Usdt),
            CurrencyOperation::UsdIn => OperationKind::Inflow(Currency::Usd),
            CurrencyOperation::UsdOut => OperationKind::Outflow(Currency::Usd),
            CurrencyOperation::UsdBuy => OperationKind::Buy(Currency::Usd),
            CurrencyOperation::UsdSell => OperationKind::Sell(Currency::Usd),
        }
    }

    pub fn bank_requirement(self) -> BankRequirement {
        match self {
            CurrencyOperation::UsdIn | CurrencyOperation::UsdOut => BankRequirement::Optional,
            CurrencyOperation::UsdtIn | CurrencyOperation::UsdtOut => BankRequirement::Ignored,
            _ => BankRequirement::Required,
        }
    }

    /// Buy and sell operations carry an exchange rate and a counter-leg.
    pub fn is_trade(self) -> bool {
        matches!(self.kind(), OperationKind::Buy(_) | OperationKind::Sell(_))
    }

    pub fn code(self) -> &'static str {
        match self {
            CurrencyOperation::ArsIn => "ARS_IN",
            CurrencyOperation::ArsOut => "ARS_OUT",
            CurrencyOperation::UsdtBuy => "USDT_BUY",
            CurrencyOperation::UsdtSell => "USDT_SELL",
            CurrencyOperation::UsdtIn => "USDT_IN",
            CurrencyOperation::UsdtOut => "USDT_OUT",
            CurrencyOperation::UsdIn => "USD_IN",
            CurrencyOperation::UsdOut => "USD_OUT",
            CurrencyOperation::UsdBuy => "USD_BUY",
            CurrencyOperation::UsdSell => "USD_SELL",
        }
    }
}

impl core::fmt::Display for CurrencyOperation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.code())
    }
}

impl FromStr for CurrencyOperation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        CurrencyOperation::ALL
            .into_iter()
            .find(|op| op.code() == wanted)
            .ok_or_else(|| DomainError::validation(format!("unknown currency operation: {s}")))
    }
}
