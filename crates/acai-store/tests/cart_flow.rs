//! End-to-end cart flow: engine + in-memory store.

use acai_commerce::prelude::*;
use acai_store::{CatalogStore, MemoryStore};
use std::sync::Arc;

const NOW: i64 = 1_700_000_000;

fn granola() -> Topping {
    Topping::with_id(ToppingId::new("granola"), "Granola", Money::brl(200))
}

fn premium_promo() -> Promotion {
    Promotion::new(
        "Semana do Açaí",
        "Açaí Premium",
        Money::brl(2000),
        Money::brl(1500),
        NOW - 1000,
        NOW + 1000,
    )
    .with_coupon("ACAI25")
}

async fn engine_with_seeded_store() -> CartEngine {
    let store = Arc::new(MemoryStore::new());
    store.upsert_promotion(premium_promo()).await.unwrap();
    CartEngine::new(store)
}

fn add_premium_with_granola(engine: &mut CartEngine) -> LineItemId {
    let line = engine
        .cart_mut()
        .add_item(
            ProductId::new("p1"),
            "Açaí Premium",
            Money::brl(2000),
            "500ml",
            "",
            vec![granola()],
        )
        .unwrap();
    engine.cart_mut().update_quantity(&line, 2);
    line
}

#[tokio::test]
async fn total_without_promotion() {
    let mut engine = engine_with_seeded_store().await;
    add_premium_with_granola(&mut engine);

    // (20.00 + 2.00) * 2
    let pricing = engine.cart().pricing().unwrap();
    assert_eq!(pricing.total, Money::brl(4400));
    assert_eq!(pricing.original_total, Money::brl(4400));
    assert!(pricing.savings.is_zero());
}

#[tokio::test]
async fn coupon_discounts_eligible_item() {
    let mut engine = engine_with_seeded_store().await;
    add_premium_with_granola(&mut engine);

    let outcome = engine.apply_coupon_at("ACAI25", NOW).await;
    assert_eq!(outcome, CouponOutcome::Applied);

    // (15.00 + 2.00) * 2, saving 44.00 - 34.00
    let pricing = engine.cart().pricing().unwrap();
    assert_eq!(pricing.total, Money::brl(3400));
    assert_eq!(pricing.original_total, Money::brl(4400));
    assert_eq!(pricing.savings, Money::brl(1000));
    assert_eq!(pricing.discounted_line_count(), 1);
}

#[tokio::test]
async fn remove_coupon_restores_original_total() {
    let mut engine = engine_with_seeded_store().await;
    add_premium_with_granola(&mut engine);
    engine.apply_coupon_at("ACAI25", NOW).await;

    engine.remove_coupon();
    let pricing = engine.cart().pricing().unwrap();
    assert_eq!(pricing.total, Money::brl(4400));
    assert!(engine.cart().coupon_rejection.is_none());
    assert!(engine.cart().applied_promotion.is_none());
}

#[tokio::test]
async fn coupon_rejected_for_ineligible_cart() {
    let mut engine = engine_with_seeded_store().await;
    engine
        .cart_mut()
        .add_item(
            ProductId::new("p2"),
            "Suco de Laranja",
            Money::brl(800),
            "Único",
            "",
            vec![],
        )
        .unwrap();

    let outcome = engine.apply_coupon_at("ACAI25", NOW).await;
    assert_eq!(
        outcome,
        CouponOutcome::Rejected(CouponRejection::Ineligible {
            product_name: "Açaí Premium".into()
        })
    );
    assert!(engine.cart().applied_promotion.is_none());

    // The eligible line still prices at its own value.
    let pricing = engine.cart().pricing().unwrap();
    assert_eq!(pricing.total, Money::brl(800));
}

#[tokio::test]
async fn empty_coupon_sets_error_without_touching_promotion() {
    let mut engine = engine_with_seeded_store().await;
    add_premium_with_granola(&mut engine);
    engine.apply_coupon_at("ACAI25", NOW).await;

    let outcome = engine.apply_coupon_at("   ", NOW).await;
    assert_eq!(outcome, CouponOutcome::Rejected(CouponRejection::EmptyCode));
    assert!(engine.cart().applied_promotion.is_some());
    assert!(engine.cart().coupon_rejection.is_some());
}

#[tokio::test]
async fn expired_coupon_not_found() {
    let mut engine = engine_with_seeded_store().await;
    add_premium_with_granola(&mut engine);

    let outcome = engine.apply_coupon_at("ACAI25", NOW + 5000).await;
    assert_eq!(outcome, CouponOutcome::Rejected(CouponRejection::NotFound));
}

#[tokio::test]
async fn add_then_remove_restores_prior_total() {
    let mut engine = engine_with_seeded_store().await;
    add_premium_with_granola(&mut engine);
    let before = engine.cart().pricing().unwrap().total;

    let extra = engine
        .cart_mut()
        .add_item(
            ProductId::new("p2"),
            "Suco de Laranja",
            Money::brl(800),
            "Único",
            "",
            vec![],
        )
        .unwrap();
    assert_ne!(engine.cart().pricing().unwrap().total, before);

    engine.cart_mut().remove_line(&extra);
    assert_eq!(engine.cart().pricing().unwrap().total, before);
}

#[tokio::test]
async fn total_is_sum_of_line_totals() {
    let mut engine = engine_with_seeded_store().await;
    add_premium_with_granola(&mut engine);
    engine
        .cart_mut()
        .add_item(
            ProductId::new("p2"),
            "Suco de Laranja",
            Money::brl(800),
            "Único",
            "",
            vec![],
        )
        .unwrap();
    engine.apply_coupon_at("ACAI25", NOW).await;

    let pricing = engine.cart().pricing().unwrap();
    let summed = Money::try_sum(
        pricing.line_items.iter().map(|l| &l.total),
        Currency::BRL,
    )
    .unwrap();
    assert_eq!(pricing.total, summed);
    // Savings stays the difference of the two totals.
    assert_eq!(
        pricing.savings,
        pricing.original_total.subtract(&pricing.total)
    );
}

#[tokio::test]
async fn checkout_clears_cart_state() {
    let mut engine = engine_with_seeded_store().await;
    add_premium_with_granola(&mut engine);
    engine.apply_coupon_at("ACAI25", NOW).await;

    let pricing = engine.cart().pricing().unwrap();
    let details = OrderDetails {
        customer_name: "Maria".into(),
        phone: "(11) 99999-0000".into(),
        fulfillment: Fulfillment::Pickup,
        payment: PaymentMethod::Pix,
        note: None,
    };
    let message = order_message(engine.cart(), &pricing, &details);
    assert!(message.contains("*Total: R$ 34,00*"));

    // Successful submission empties everything at once.
    engine.cart_mut().clear();
    assert!(engine.cart().is_empty());
    assert!(engine.cart().applied_promotion.is_none());
    assert!(engine.cart().coupon_rejection.is_none());
    assert!(engine.cart().pricing().unwrap().total.is_zero());
}
