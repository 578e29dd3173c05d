//! Reconciliation properties
//!
//! Drives whole mutation sequences through the mock gateway and checks
//! the one invariant everything else hangs off: after every confirmed
//! mutation the cached total equals the full re-sum of both ledgers.

use proptest::prelude::*;

use core_kernel::{GatewayError, Money};
use domain_bill::{FeeDraft, ItemDraft};
use test_utils::{
    assert_money_eq, assert_total_consistent, init_tracing, GatewayOp, MoneyFixtures,
    TestFeeBuilder, TestItemBuilder, TestSessionBuilder,
};

#[derive(Debug, Clone)]
enum Op {
    CreateItem { price_cents: i64, quantity: u32 },
    CreateFee { price_cents: i64 },
    UpdateItem { index: usize, price_cents: i64, quantity: u32 },
    UpdateFee { index: usize, price_cents: i64 },
    DeleteItem { index: usize },
    DeleteFee { index: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0i64..10_000, 1u32..10)
            .prop_map(|(price_cents, quantity)| Op::CreateItem { price_cents, quantity }),
        (0i64..10_000).prop_map(|price_cents| Op::CreateFee { price_cents }),
        (any::<usize>(), 0i64..10_000, 1u32..10).prop_map(|(index, price_cents, quantity)| {
            Op::UpdateItem { index, price_cents, quantity }
        }),
        (any::<usize>(), 0i64..10_000)
            .prop_map(|(index, price_cents)| Op::UpdateFee { index, price_cents }),
        any::<usize>().prop_map(|index| Op::DeleteItem { index }),
        any::<usize>().prop_map(|index| Op::DeleteFee { index }),
    ]
}

async fn apply(session: &domain_bill::BillSession, op: Op) {
    match op {
        Op::CreateItem { price_cents, quantity } => {
            let draft =
                ItemDraft::new("item", MoneyFixtures::cents(price_cents), quantity).unwrap();
            session.create_item(draft).await.unwrap();
        }
        Op::CreateFee { price_cents } => {
            let draft = FeeDraft::new("fee", MoneyFixtures::cents(price_cents));
            session.create_fee(draft).await.unwrap();
        }
        Op::UpdateItem { index, price_cents, quantity } => {
            let items = session.items();
            if items.is_empty() {
                return;
            }
            let id = items[index % items.len()].id;
            let draft =
                ItemDraft::new("item", MoneyFixtures::cents(price_cents), quantity).unwrap();
            session.update_item(id, draft).await.unwrap();
        }
        Op::UpdateFee { index, price_cents } => {
            let fees = session.fees();
            if fees.is_empty() {
                return;
            }
            let id = fees[index % fees.len()].id;
            session
                .update_fee(id, FeeDraft::new("fee", MoneyFixtures::cents(price_cents)))
                .await
                .unwrap();
        }
        Op::DeleteItem { index } => {
            let items = session.items();
            if items.is_empty() {
                return;
            }
            session.delete_item(items[index % items.len()].id).await.unwrap();
        }
        Op::DeleteFee { index } => {
            let fees = session.fees();
            if fees.is_empty() {
                return;
            }
            session.delete_fee(fees[index % fees.len()].id).await.unwrap();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_mutation_sequences_preserve_the_total_invariant(
        ops in proptest::collection::vec(op_strategy(), 1..40)
    ) {
        init_tracing();
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        rt.block_on(async move {
            let (gateway, session) = TestSessionBuilder::new().build();
            session.load().await.unwrap();

            for op in ops {
                apply(&session, op).await;
                session.verify_total().unwrap();
            }

            // The local view and the remote source of truth agree
            assert_eq!(session.items(), gateway.remote_items());
            assert_eq!(session.fees(), gateway.remote_fees());
            assert_total_consistent(&session);
        });
    }
}

#[tokio::test]
async fn test_seeded_session_loads_consistently() {
    init_tracing();
    let (_gateway, session) = TestSessionBuilder::new()
        .with_item(TestItemBuilder::new().with_quantity(2).build())
        .with_fee(TestFeeBuilder::new().build())
        .build();

    let total = session.load().await.unwrap();

    // 4.50 x 2 + 3.00
    assert_money_eq(total, MoneyFixtures::cents(1200));
    assert_total_consistent(&session);
}

#[tokio::test]
async fn test_scripted_failures_are_consumed_in_order() {
    init_tracing();
    let (gateway, session) = TestSessionBuilder::new().build();
    session.load().await.unwrap();

    gateway.fail_next(GatewayOp::CreateFee, GatewayError::status(500, "first"));
    gateway.fail_next(GatewayOp::CreateFee, GatewayError::connection("second"));

    let draft = FeeDraft::new("tip", MoneyFixtures::cents(200));
    assert!(session.create_fee(draft.clone()).await.is_err());
    assert!(session.create_fee(draft.clone()).await.is_err());
    session.create_fee(draft).await.unwrap();

    assert_money_eq(session.total(), MoneyFixtures::cents(200));
    let create_calls = gateway
        .calls()
        .into_iter()
        .filter(|op| *op == GatewayOp::CreateFee)
        .count();
    assert_eq!(create_calls, 3);
}

#[tokio::test]
async fn test_reconcile_adopts_out_of_band_changes() {
    init_tracing();
    let (gateway, session) = TestSessionBuilder::new()
        .with_item(TestItemBuilder::new().with_quantity(2).build())
        .build();
    session.load().await.unwrap();
    assert_money_eq(session.total(), MoneyFixtures::cents(900));

    // Another client commits a fee this session never hears about
    gateway.seed_fee(TestFeeBuilder::new().with_price(Money::from_cents(150).unwrap()).build());

    let total = session.reconcile().await.unwrap();

    assert_money_eq(total, MoneyFixtures::cents(1050));
    assert_eq!(session.fees(), gateway.remote_fees());
    assert_total_consistent(&session);
}
