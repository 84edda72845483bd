//! Black-box checks of the posting table through the public desk API.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use cambio_core::{Amount, BankId, Currency, DomainError, ExchangeRate};
use cambio_exchange::{CurrencyOperation, ExchangeDesk, PostingSettings, TransactionInput};

fn bank() -> BankId {
    BankId::new("galicia").unwrap()
}

fn other_bank() -> BankId {
    BankId::new("nacion").unwrap()
}

fn amount(v: Decimal) -> Amount {
    Amount::new(v).unwrap()
}

fn opening_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 2, 10, 0, 0).unwrap()
}

/// Input that satisfies every rule for `op`, using `bank()` and a 1000 rate.
fn valid_input(op: CurrencyOperation, a: Decimal) -> TransactionInput {
    let mut input = TransactionInput::new(op, amount(a)).with_bank(bank());
    if op.is_trade() {
        input = input
            .with_rate(ExchangeRate::new(dec!(1000)).unwrap())
            .derive_calculated_amount()
            .unwrap();
    }
    input
}

/// (cash ARS, cash USD, cash USDT, bank ARS, bank USD) after posting 1000 of `op`.
fn effect_of(op: CurrencyOperation) -> [Decimal; 5] {
    let mut desk = ExchangeDesk::new(PostingSettings::default());
    desk.post(valid_input(op, dec!(1000))).unwrap();
    [
        desk.cash().get(Currency::Ars),
        desk.cash().get(Currency::Usd),
        desk.cash().get(Currency::Usdt),
        desk.banks().get(&bank(), Currency::Ars),
        desk.banks().get(&bank(), Currency::Usd),
    ]
}

#[test]
fn every_operation_follows_the_posting_table() {
    let z = Decimal::ZERO;
    let expected = [
        (CurrencyOperation::ArsIn, [dec!(1000), z, z, dec!(-1000), z]),
        (CurrencyOperation::ArsOut, [dec!(-1000), z, z, dec!(1000), z]),
        (CurrencyOperation::UsdtBuy, [dec!(-1000), z, dec!(1), dec!(-1000), z]),
        (CurrencyOperation::UsdtSell, [dec!(1000000), z, dec!(-1000), dec!(1000000), z]),
        (CurrencyOperation::UsdtIn, [z, z, dec!(1000), z, z]),
        (CurrencyOperation::UsdtOut, [z, z, dec!(-1000), z, z]),
        (CurrencyOperation::UsdIn, [z, dec!(1000), z, z, dec!(-1000)]),
        (CurrencyOperation::UsdOut, [z, dec!(-1000), z, z, dec!(1000)]),
        (CurrencyOperation::UsdBuy, [dec!(-1000), dec!(1), z, dec!(-1000), z]),
        (CurrencyOperation::UsdSell, [dec!(1000000), dec!(-1000), z, dec!(1000000), z]),
    ];

    for (op, effect) in expected {
        assert_eq!(effect_of(op), effect, "{op}");
    }
}

#[test]
fn usdt_transfers_never_create_bank_entries() {
    let mut desk = ExchangeDesk::new(PostingSettings::default());
    desk.post(valid_input(CurrencyOperation::UsdtIn, dec!(10))).unwrap();
    desk.post(valid_input(CurrencyOperation::UsdtOut, dec!(3))).unwrap();

    assert!(desk.banks().is_empty());
    assert_eq!(desk.cash().get(Currency::Usdt), dec!(7));
}

#[test]
fn banks_are_tracked_independently() {
    let mut desk = ExchangeDesk::new(PostingSettings::default());
    desk.post(valid_input(CurrencyOperation::ArsIn, dec!(100))).unwrap();
    desk.post(
        TransactionInput::new(CurrencyOperation::ArsOut, amount(dec!(30))).with_bank(other_bank()),
    )
    .unwrap();

    assert_eq!(desk.cash().get(Currency::Ars), dec!(70));
    assert_eq!(desk.banks().get(&bank(), Currency::Ars), dec!(-100));
    assert_eq!(desk.banks().get(&other_bank(), Currency::Ars), dec!(30));
    assert_eq!(desk.banks().banks().count(), 2);
}

#[test]
fn missing_bank_fails_without_side_effects() {
    let mut desk = ExchangeDesk::new(PostingSettings::default());
    desk.post(valid_input(CurrencyOperation::UsdIn, dec!(50))).unwrap();
    let before = desk.state().clone();

    let err = desk
        .post(
            TransactionInput::new(CurrencyOperation::UsdSell, amount(dec!(5)))
                .with_rate(ExchangeRate::new(dec!(1100)).unwrap())
                .with_calculated_amount(amount(dec!(5500))),
        )
        .unwrap_err();

    assert_eq!(err, DomainError::validation("bank is required for USD_SELL"));
    assert_eq!(desk.state(), &before);
}

#[test]
fn diverging_calculated_amount_is_still_posted_as_given() {
    let mut desk = ExchangeDesk::new(PostingSettings::default());
    desk.post(
        TransactionInput::new(CurrencyOperation::UsdtSell, amount(dec!(2)))
            .with_bank(bank())
            .with_rate(ExchangeRate::new(dec!(1000)).unwrap())
            .with_calculated_amount(amount(dec!(2100))),
    )
    .unwrap();

    assert_eq!(desk.cash().get(Currency::Ars), dec!(2100));
    assert_eq!(desk.banks().get(&bank(), Currency::Ars), dec!(2100));
}

#[test]
fn a_day_of_trading_queries_by_date() {
    let mut desk = ExchangeDesk::new(PostingSettings::default());
    let ops = [
        CurrencyOperation::ArsIn,
        CurrencyOperation::UsdtBuy,
        CurrencyOperation::UsdtSell,
        CurrencyOperation::UsdBuy,
        CurrencyOperation::ArsOut,
    ];
    for (hour, op) in ops.into_iter().enumerate() {
        desk.post_at(
            valid_input(op, dec!(1000)),
            opening_time() + Duration::hours(hour as i64),
        )
        .unwrap();
    }

    let morning = desk.query_by_date_range(opening_time(), opening_time() + Duration::hours(2));
    let morning_ops: Vec<_> = morning.iter().map(|t| t.input().currency_operation).collect();
    assert_eq!(
        morning_ops,
        vec![
            CurrencyOperation::UsdtSell,
            CurrencyOperation::UsdtBuy,
            CurrencyOperation::ArsIn,
        ]
    );

    let everything = desk.query_by_date_range(opening_time(), opening_time() + Duration::days(1));
    assert_eq!(everything.len(), ops.len());
    assert!(desk
        .query_by_date_range(opening_time() - Duration::days(1), opening_time() - Duration::hours(1))
        .is_empty());
}
