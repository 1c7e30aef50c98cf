//! End-to-end settlement scenarios
//!
//! Each scenario goes through the public entry points only: build a sheet,
//! settle it by strategy name, check the planned transfers.

use rust_decimal::Decimal;
use settlement::{
    BalanceSheet, Error, Expense, Money, ParticipantId, SettlementEngine, Share, StrategyKind,
};

fn sheet(entries: &[(&str, i64)]) -> BalanceSheet {
    BalanceSheet::build(
        entries
            .iter()
            .map(|(name, cents)| (ParticipantId::from(*name), Money::from_cents(*cents))),
    )
}

fn plan(sheet: &BalanceSheet, strategy: &str) -> settlement::Result<Vec<(String, String, Money)>> {
    let engine = SettlementEngine::default();
    let settlement = engine.settle_by_name(sheet, strategy)?;
    Ok(settlement
        .transactions()
        .iter()
        .map(|t| (t.from().to_string(), t.to().to_string(), t.amount()))
        .collect())
}

fn tx(from: &str, to: &str, cents: i64) -> (String, String, Money) {
    (from.to_string(), to.to_string(), Money::from_cents(cents))
}

#[test]
fn test_chain_one_creditor_two_debtors() {
    let sheet = sheet(&[("A", 3000), ("B", -1000), ("C", -2000)]);

    assert_eq!(
        plan(&sheet, "n_minus_1").unwrap(),
        vec![tx("B", "A", 3000), tx("C", "B", 2000)]
    );
}

#[test]
fn test_greedy_one_creditor_two_debtors() {
    let sheet = sheet(&[("A", 3000), ("B", -1000), ("C", -2000)]);

    assert_eq!(
        plan(&sheet, "greedy").unwrap(),
        vec![tx("C", "A", 2000), tx("B", "A", 1000)]
    );
}

#[test]
fn test_two_participants_agree() {
    let sheet = sheet(&[("A", 500), ("B", -500)]);

    for strategy in ["n_minus_1", "greedy"] {
        assert_eq!(plan(&sheet, strategy).unwrap(), vec![tx("B", "A", 500)]);
    }
}

#[test]
fn test_unbalanced_sheet_rejected() {
    let sheet = sheet(&[("A", 500), ("B", -300)]);

    for strategy in ["n_minus_1", "greedy"] {
        match plan(&sheet, strategy) {
            Err(Error::InvalidBalanceSheet { total }) => {
                assert_eq!(total, Decimal::new(200, 2))
            }
            other => panic!("expected InvalidBalanceSheet, got {:?}", other),
        }
    }
}

#[test]
fn test_empty_sheet() {
    let sheet = BalanceSheet::new();

    for strategy in ["n_minus_1", "greedy"] {
        assert!(plan(&sheet, strategy).unwrap().is_empty());
    }
}

#[test]
fn test_unknown_strategy() {
    let sheet = sheet(&[("A", 500), ("B", -500)]);
    assert!(matches!(
        plan(&sheet, "round_robin"),
        Err(Error::UnknownStrategy(_))
    ));
}

#[test]
fn test_group_trip_from_expenses() {
    let (alice, bob, carol) = (
        ParticipantId::from(1u64),
        ParticipantId::from(2u64),
        ParticipantId::from(3u64),
    );
    let everyone = vec![alice.clone(), bob.clone(), carol.clone()];

    let expenses = vec![
        Expense::split_evenly("hotel", alice.clone(), Money::from_cents(30000), &everyone).unwrap(),
        Expense::split_evenly("fuel", bob.clone(), Money::from_cents(6000), &everyone).unwrap(),
        Expense {
            title: "museum".to_string(),
            amount: Decimal::new(4500, 2),
            paid_by: vec![Share::new(carol.clone(), Decimal::new(4500, 2))],
            shared_by: vec![
                Share::new(bob.clone(), Decimal::new(1500, 2)),
                Share::new(carol.clone(), Decimal::new(3000, 2)),
            ],
        },
    ];

    let sheet = BalanceSheet::from_expenses(&expenses).unwrap();
    // Everyone owes 100 + 20; bob also owes 15 and carol 30 for the museum
    assert_eq!(sheet.get(&alice), Some(Money::from_cents(18000)));
    assert_eq!(sheet.get(&bob), Some(Money::from_cents(-7500)));
    assert_eq!(sheet.get(&carol), Some(Money::from_cents(-10500)));

    let engine = SettlementEngine::default();
    for kind in StrategyKind::ALL {
        let settlement = engine.settle(&sheet, kind).unwrap();
        assert!(settlement.verify(&sheet).is_ok());
        assert!(settlement.transaction_count() <= 2);
    }

    let greedy = engine.settle(&sheet, StrategyKind::Greedy).unwrap();
    let pairs: Vec<_> = greedy
        .transactions()
        .iter()
        .map(|t| (t.from().clone(), t.to().clone(), t.amount()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            (carol.clone(), alice.clone(), Money::from_cents(10500)),
            (bob.clone(), alice.clone(), Money::from_cents(7500)),
        ]
    );
}

#[test]
fn test_invalid_expense_blocks_settlement() {
    let expense = Expense {
        title: "lunch".to_string(),
        amount: Decimal::new(2000, 2),
        paid_by: vec![Share::new("alice", Decimal::new(2000, 2))],
        shared_by: vec![Share::new("bob", Decimal::new(1500, 2))],
    };

    assert!(matches!(
        BalanceSheet::from_expenses(&[expense]),
        Err(Error::InvalidExpense(_))
    ));
}

#[test]
fn test_settlement_json_shape() {
    let sheet = sheet(&[("A", 500), ("B", -500)]);
    let settlement = SettlementEngine::default()
        .settle(&sheet, StrategyKind::NMinusOne)
        .unwrap();

    let json = serde_json::to_value(settlement.transactions()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{"from": "B", "to": "A", "amount": "5.00"}])
    );
}
