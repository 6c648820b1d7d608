//! Order message formatting.
//!
//! Checkout does not create an order record: the storefront formats the
//! cart into a Portuguese text message and hands it to the shop's
//! messaging app. On success the caller clears the cart.

use crate::cart::{Cart, CartPricing};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// How the customer pays on delivery/pickup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PaymentMethod {
    /// Instant bank transfer.
    Pix,
    /// Card on the machine.
    Card,
    /// Cash, optionally with the bill the customer will pay with.
    Cash {
        /// Bill to break, so the courier brings change.
        change_for: Option<Money>,
    },
}

impl PaymentMethod {
    fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "Pix",
            PaymentMethod::Card => "Cartão",
            PaymentMethod::Cash { .. } => "Dinheiro",
        }
    }
}

/// How the order reaches the customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Fulfillment {
    /// Customer picks the order up at the shop.
    Pickup,
    /// Courier delivery to an address.
    Delivery {
        /// Free-form street address.
        address: String,
    },
}

/// Customer data collected by the checkout form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDetails {
    /// Customer name.
    pub customer_name: String,
    /// Contact phone.
    pub phone: String,
    /// Pickup or delivery.
    pub fulfillment: Fulfillment,
    /// Payment method.
    pub payment: PaymentMethod,
    /// Free-form note (e.g., "sem açúcar").
    pub note: Option<String>,
}

/// Render the cart as an order message.
///
/// `pricing` must be the breakdown computed from the same cart; lines are
/// matched by line id and items missing from the breakdown are skipped.
pub fn order_message(cart: &Cart, pricing: &CartPricing, details: &OrderDetails) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "*Novo pedido*");
    let _ = writeln!(out);
    let _ = writeln!(out, "*Cliente:* {}", details.customer_name);
    let _ = writeln!(out, "*Telefone:* {}", details.phone);
    let _ = writeln!(out);
    let _ = writeln!(out, "*Itens:*");

    for item in &cart.items {
        let Some(line) = pricing
            .line_items
            .iter()
            .find(|l| l.line_id == item.line_id)
        else {
            continue;
        };
        let _ = writeln!(
            out,
            "{}x {} ({}) - {}",
            item.quantity,
            item.name,
            item.size,
            fmt_brl(&line.total)
        );
        if !item.toppings.is_empty() {
            let names: Vec<&str> = item.toppings.iter().map(|t| t.name.as_str()).collect();
            let _ = writeln!(out, "   + {}", names.join(", "));
        }
    }

    let _ = writeln!(out);
    if pricing.has_discount() {
        if let Some(promotion) = &cart.applied_promotion {
            let code = promotion.coupon_code.as_deref().unwrap_or("-");
            let _ = writeln!(
                out,
                "*Cupom:* {} (economia de {})",
                code,
                fmt_brl(&pricing.savings)
            );
        }
    }
    let _ = writeln!(out, "*Total: {}*", fmt_brl(&pricing.total));
    if pricing.has_discount() {
        let _ = writeln!(out, "(de {})", fmt_brl(&pricing.original_total));
    }

    let _ = writeln!(out);
    match &details.payment {
        PaymentMethod::Cash {
            change_for: Some(bill),
        } => {
            let _ = writeln!(out, "*Pagamento:* Dinheiro (troco para {})", fmt_brl(bill));
        }
        payment => {
            let _ = writeln!(out, "*Pagamento:* {}", payment.label());
        }
    }
    match &details.fulfillment {
        Fulfillment::Pickup => {
            let _ = writeln!(out, "*Entrega:* Retirada no local");
        }
        Fulfillment::Delivery { address } => {
            let _ = writeln!(out, "*Entrega:* {}", address);
        }
    }
    if let Some(note) = details.note.as_deref().filter(|n| !n.trim().is_empty()) {
        let _ = writeln!(out, "*Observações:* {}", note);
    }

    out
}

/// Format money the Brazilian way: "R$ 19,90".
fn fmt_brl(money: &Money) -> String {
    format!(
        "{} {}",
        money.currency.symbol(),
        money.display_amount().replace('.', ",")
    )
}
