use serde::{Deserialize, Deserializer, Serialize};

use cambio_core::{Amount, BankId, DomainError, DomainResult, ExchangeRate};

use crate::attachment::AttachmentRef;
use crate::operation::{BankRequirement, CurrencyOperation};

/// Data captured by the transaction form, ready to be posted.
///
/// Field names follow the form's camelCase payload so a submitted form
/// deserializes directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    /// Free-form label chosen on the form (e.g. "Cambio", "Retiro").
    #[serde(default)]
    pub operation_type: String,
    pub currency_operation: CurrencyOperation,
    /// An empty select on the form arrives as `""` and means no bank.
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub bank_id: Option<BankId>,
    /// Primary leg: the currency surrendered or received.
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<ExchangeRate>,
    /// Counter-leg computed by the form from `amount` and `exchange_rate`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculated_amount: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<AttachmentRef>,
}

impl TransactionInput {
    pub fn new(currency_operation: CurrencyOperation, amount: Amount) -> Self {
        Self {
            operation_type: String::new(),
            currency_operation,
            bank_id: None,
            amount,
            exchange_rate: None,
            calculated_amount: None,
            description: None,
            attachment: None,
        }
    }

    pub fn with_operation_type(mut self, operation_type: impl Into<String>) -> Self {
        self.operation_type = operation_type.into();
        self
    }

    pub fn with_bank(mut self, bank_id: BankId) -> Self {
        self.bank_id = Some(bank_id);
        self
    }

    pub fn with_rate(mut self, rate: ExchangeRate) -> Self {
        self.exchange_rate = Some(rate);
        self
    }

    pub fn with_calculated_amount(mut self, calculated: Amount) -> Self {
        self.calculated_amount = Some(calculated);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_attachment(mut self, attachment: AttachmentRef) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Fill in `calculated_amount` from the rate, the way the form does.
    ///
    /// Leaves the input untouched for non-trade operations, when no rate is
    /// set, or when a calculated amount is already present.
    pub fn derive_calculated_amount(mut self) -> DomainResult<Self> {
        if self.calculated_amount.is_none() {
            if let Some(derived) = self.derived_counter_amount() {
                self.calculated_amount = Some(Amount::new(derived)?);
            }
        }
        Ok(self)
    }

    /// Counter-leg recomputed from `amount` and `exchange_rate`.
    ///
    /// `amount / rate` for buys, `amount * rate` for sells. `None` for
    /// non-trade operations, a missing rate, or arithmetic overflow.
    pub fn derived_counter_amount(&self) -> Option<rust_decimal::Decimal> {
        use crate::operation::OperationKind;

        let rate = self.exchange_rate?;
        match self.currency_operation.kind() {
            OperationKind::Buy(_) => rate.buy(self.amount),
            OperationKind::Sell(_) => rate.sell(self.amount),
            OperationKind::Inflow(_) | OperationKind::Outflow(_) => None,
        }
    }

    /// Checks the cross-field rules the type system cannot express.
    pub fn validate(&self) -> DomainResult<()> {
        let op = self.currency_operation;

        if op.bank_requirement() == BankRequirement::Required && self.bank_id.is_none() {
            return Err(DomainError::validation(format!("bank is required for {op}")));
        }

        if op.is_trade() && self.exchange_rate.is_none() {
            return Err(DomainError::validation(format!(
                "exchange rate is required for {op}"
            )));
        }

        if let Some(attachment) = &self.attachment {
            attachment.validate()?;
        }

        Ok(())
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<BankId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(name) if !name.trim().is_empty() => {
            BankId::new(name).map(Some).map_err(serde::de::Error::custom)
        }
        _ => Ok(None),
    }
}
