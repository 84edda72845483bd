use anyhow::Context;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use cambio_core::{Amount, BankId, DomainResult, ExchangeRate, TransactionId};
use cambio_exchange::{CurrencyOperation, ExchangeDesk, Transaction, TransactionInput};
use cambio_infra::{KeyValueStore, PersistentDesk};

/// Arguments of `cambio post`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostArgs {
    pub operation: CurrencyOperation,
    pub amount: Decimal,
    pub bank: Option<BankId>,
    pub rate: Option<Decimal>,
    pub calculated: Option<Decimal>,
    pub operation_type: Option<String>,
    pub description: Option<String>,
}

/// Turn CLI arguments into a transaction input.
///
/// Like the form, derives the calculated amount from the rate when a trade
/// is given a rate but no explicit counter-leg.
pub fn build_input(args: PostArgs) -> DomainResult<TransactionInput> {
    let mut input = TransactionInput::new(args.operation, Amount::new(args.amount)?);

    if let Some(kind) = args.operation_type {
        input = input.with_operation_type(kind);
    }
    if let Some(bank) = args.bank {
        input = input.with_bank(bank);
    }
    if let Some(rate) = args.rate {
        input = input.with_rate(ExchangeRate::new(rate)?);
    }
    if let Some(calculated) = args.calculated {
        input = input.with_calculated_amount(Amount::new(calculated)?);
    }
    if let Some(description) = args.description {
        input = input.with_description(description);
    }

    input.derive_calculated_amount()
}

pub fn post<S: KeyValueStore>(
    desk: &mut PersistentDesk<S>,
    args: PostArgs,
) -> anyhow::Result<Transaction> {
    let input = build_input(args).context("invalid transaction")?;
    let transaction = desk.post(input).context("failed to post transaction")?;
    Ok(transaction)
}

pub fn show<S: KeyValueStore>(desk: &PersistentDesk<S>, id: TransactionId) -> anyhow::Result<String> {
    let transaction = desk
        .transaction(id)
        .with_context(|| format!("transaction {id}"))?;
    Ok(render_transaction(transaction))
}

pub fn history(desk: &ExchangeDesk, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<Transaction> {
    desk.query_by_date_range(from, to)
}

pub fn render_balances(desk: &ExchangeDesk) -> String {
    let mut out = String::from("Caja\n");
    for (currency, balance) in desk.cash().iter() {
        out.push_str(&format!("  {currency:<5} {balance:>20}\n"));
    }

    if desk.banks().is_empty() {
        return out;
    }

    out.push_str("Bancos\n");
    for bank in desk.banks().banks() {
        out.push_str(&format!("  {bank}\n"));
        for (currency, balance) in desk.banks().for_bank(bank) {
            out.push_str(&format!("    {currency:<5} {balance:>18}\n"));
        }
    }
    out
}

pub fn render_transactions(transactions: &[Transaction]) -> String {
    transactions.iter().map(render_transaction).collect()
}

fn render_transaction(tx: &Transaction) -> String {
    let input = tx.input();
    let mut line = format!(
        "{}  {}  {:<9} {:>14}",
        tx.recorded_at().format("%Y-%m-%d %H:%M:%S"),
        tx.id_typed(),
        input.currency_operation,
        input.amount
    );
    if let Some(c) = input.calculated_amount {
        line.push_str(&format!(" -> {c}"));
    }
    if let Some(bank) = &input.bank_id {
        line.push_str(&format!("  [{bank}]"));
    }
    if let Some(description) = &input.description {
        line.push_str(&format!("  {description}"));
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use cambio_core::{Currency, DomainError};
    use cambio_exchange::PostingSettings;
    use cambio_infra::InMemoryKeyValueStore;
    use rust_decimal_macros::dec;

    fn args(operation: CurrencyOperation, amount: Decimal) -> PostArgs {
        PostArgs {
            operation,
            amount,
            bank: None,
            rate: None,
            calculated: None,
            operation_type: None,
            description: None,
        }
    }

    #[test]
    fn build_input_derives_counter_leg_from_rate() {
        let input = build_input(PostArgs {
            bank: Some(BankId::new("galicia").unwrap()),
            rate: Some(dec!(1000)),
            ..args(CurrencyOperation::UsdtSell, dec!(2))
        })
        .unwrap();
        assert_eq!(input.calculated_amount.map(|c| c.value()), Some(dec!(2000)));
    }

    #[test]
    fn build_input_rejects_negative_amount_and_zero_rate() {
        let err = build_input(args(CurrencyOperation::UsdtIn, dec!(-1))).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = build_input(PostArgs {
            rate: Some(Decimal::ZERO),
            ..args(CurrencyOperation::UsdBuy, dec!(1))
        })
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn post_then_render() {
        let mut desk =
            PersistentDesk::open(InMemoryKeyValueStore::new(), PostingSettings::default()).unwrap();
        post(
            &mut desk,
            PostArgs {
                bank: Some(BankId::new("galicia").unwrap()),
                description: Some("deposito".to_string()),
                ..args(CurrencyOperation::ArsIn, dec!(100))
            },
        )
        .unwrap();

        assert_eq!(desk.desk().cash().get(Currency::Ars), dec!(100));

        let balances = render_balances(desk.desk());
        assert!(balances.contains("Caja"));
        assert!(balances.contains("galicia"));
        assert!(balances.contains("-100"));

        let all = desk.desk().log().iter().cloned().collect::<Vec<_>>();
        let listing = render_transactions(&all);
        assert!(listing.contains("ARS_IN"));
        assert!(listing.contains("[galicia]"));
        assert!(listing.contains("deposito"));
        assert_eq!(listing.lines().count(), 1);
    }

    #[test]
    fn render_transactions_writes_one_line_each() {
        let mut desk =
            PersistentDesk::open(InMemoryKeyValueStore::new(), PostingSettings::default()).unwrap();
        post(&mut desk, args(CurrencyOperation::UsdtIn, dec!(10))).unwrap();
        post(&mut desk, args(CurrencyOperation::UsdtOut, dec!(4))).unwrap();

        let all = desk.desk().log().iter().cloned().collect::<Vec<_>>();
        let listing = render_transactions(&all);
        let lines: Vec<_> = listing.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("USDT_OUT"));
        assert!(lines[1].contains("USDT_IN"));
        assert!(render_transactions(&[]).is_empty());
    }

    #[test]
    fn show_finds_posted_transaction_or_reports_unknown_id() {
        let mut desk =
            PersistentDesk::open(InMemoryKeyValueStore::new(), PostingSettings::default()).unwrap();
        let tx = post(&mut desk, args(CurrencyOperation::UsdIn, dec!(75))).unwrap();

        let shown = show(&desk, tx.id_typed()).unwrap();
        assert!(shown.contains(&tx.id_typed().to_string()));
        assert!(shown.contains("USD_IN"));

        let missing = TransactionId::new();
        let err = show(&desk, missing).unwrap_err();
        assert!(err.to_string().contains(&missing.to_string()));
        assert_eq!(err.downcast_ref::<DomainError>(), Some(&DomainError::NotFound));
    }

    #[test]
    fn post_without_required_bank_fails() {
        let mut desk =
            PersistentDesk::open(InMemoryKeyValueStore::new(), PostingSettings::default()).unwrap();
        let err = post(&mut desk, args(CurrencyOperation::ArsOut, dec!(5))).unwrap_err();
        assert!(err.to_string().contains("failed to post transaction"));
        assert!(desk.desk().log().is_empty());
    }
}
