//! Coupon application engine.
//!
//! Applying a coupon is the one cart operation that leaves the process: it
//! asks a [`PromotionLookup`] collaborator for an active promotion matching
//! the code. Everything around that lookup is synchronous cart state, so
//! the engine splits the operation into `begin_coupon` / `resolve_coupon`
//! and guards against a stale response landing after a newer attempt
//! started. [`CartEngine::apply_coupon`] drives both halves for the common
//! case.

use crate::cart::cart::Cart;
use crate::cart::eligibility;
use crate::cart::promotion::Promotion;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Failure of the promotion lookup collaborator itself, as opposed to a
/// code that simply doesn't exist.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// Backend unreachable.
    #[error("Promotion lookup unavailable: {0}")]
    Unavailable(String),

    /// Lookup timed out.
    #[error("Promotion lookup timed out")]
    Timeout,

    /// Backend reported an error.
    #[error("Promotion lookup failed: {0}")]
    Backend(String),
}

/// Queries active promotions by coupon code.
///
/// Implementations must filter by `active = true`, case-insensitive code
/// equality and `start_date <= now <= end_date` (both ends inclusive).
#[async_trait]
pub trait PromotionLookup: Send + Sync {
    /// Find the active promotion unlocked by a coupon code, if any.
    async fn find_active_by_coupon_code(
        &self,
        code: &str,
        now: i64,
    ) -> Result<Option<Promotion>, LookupError>;
}

/// Why a coupon attempt was refused. Held as cart state, not raised as an
/// error: the storefront shows the message next to the coupon field.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CouponRejection {
    /// The input was empty after trimming. No lookup is made.
    #[error("Digite um código de cupom.")]
    EmptyCode,

    /// No active promotion carries the code, or its window has closed.
    #[error("Cupom inválido ou expirado.")]
    NotFound,

    /// The promotion exists but no cart item matches its product.
    #[error("Este cupom é válido apenas para {product_name}.")]
    Ineligible {
        /// Target product named in the message.
        product_name: String,
    },

    /// The lookup collaborator failed; trying again may work. Kept
    /// distinct from [`CouponRejection::NotFound`] so the user can tell
    /// "try again" from "wrong code".
    #[error("Não foi possível validar o cupom. Tente novamente.")]
    LookupFailed,
}

/// Result of a coupon attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum CouponOutcome {
    /// The promotion was applied to the cart.
    Applied,
    /// The attempt was refused; the cart records a [`CouponRejection`].
    Rejected(CouponRejection),
    /// A newer attempt started before this one resolved; the response was
    /// discarded and the cart untouched.
    Superseded,
}

/// An in-flight coupon attempt returned by [`CartEngine::begin_coupon`].
#[derive(Debug, Clone, PartialEq)]
pub struct CouponRequest {
    /// Normalized (trimmed, uppercased) code to look up.
    pub code: String,
    epoch: u64,
}

/// The session-scoped cart engine: owns the cart and the promotion lookup
/// collaborator.
///
/// Constructed once per browsing session and handed to the UI layers by
/// reference; there is no global cart.
pub struct CartEngine {
    cart: Cart,
    promotions: Arc<dyn PromotionLookup>,
    coupon_epoch: u64,
}

impl CartEngine {
    /// Create an engine with an empty cart.
    pub fn new(promotions: Arc<dyn PromotionLookup>) -> Self {
        Self {
            cart: Cart::new(),
            promotions,
            coupon_epoch: 0,
        }
    }

    /// The cart, for reads.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The cart, for synchronous mutations (add, remove, quantities).
    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Start a coupon attempt.
    ///
    /// An empty code is rejected immediately, without querying the
    /// collaborator, and returns None. Otherwise the previous in-flight
    /// attempt (if any) is superseded and a request token is returned.
    pub fn begin_coupon(&mut self, code: &str) -> Option<CouponRequest> {
        let code = code.trim();
        if code.is_empty() {
            self.cart.record_rejection(CouponRejection::EmptyCode);
            return None;
        }
        self.coupon_epoch += 1;
        Some(CouponRequest {
            code: code.to_uppercase(),
            epoch: self.coupon_epoch,
        })
    }

    /// Complete a coupon attempt with the lookup result.
    ///
    /// Latest-request-wins: when a newer attempt has started since this
    /// request was issued, the result is discarded and the cart is left
    /// exactly as it was. A rejection never clears a previously applied
    /// promotion.
    pub fn resolve_coupon(
        &mut self,
        request: &CouponRequest,
        result: Result<Option<Promotion>, LookupError>,
    ) -> CouponOutcome {
        if request.epoch != self.coupon_epoch {
            debug!(code = %request.code, "stale coupon response discarded");
            return CouponOutcome::Superseded;
        }

        match result {
            Err(err) => {
                warn!(code = %request.code, error = %err, "coupon lookup failed");
                let rejection = CouponRejection::LookupFailed;
                self.cart.record_rejection(rejection.clone());
                CouponOutcome::Rejected(rejection)
            }
            Ok(None) => {
                let rejection = CouponRejection::NotFound;
                self.cart.record_rejection(rejection.clone());
                CouponOutcome::Rejected(rejection)
            }
            Ok(Some(promotion)) => {
                let eligible = self
                    .cart
                    .items
                    .iter()
                    .any(|i| eligibility::matches(&i.name, &promotion.product_name));
                if eligible {
                    debug!(code = %request.code, promotion = %promotion.id, "coupon applied");
                    self.cart.apply_promotion(promotion);
                    CouponOutcome::Applied
                } else {
                    let rejection = CouponRejection::Ineligible {
                        product_name: promotion.product_name,
                    };
                    self.cart.record_rejection(rejection.clone());
                    CouponOutcome::Rejected(rejection)
                }
            }
        }
    }

    /// Apply a coupon code: trim, reject empty input, look the code up and
    /// apply the promotion when an item is eligible.
    pub async fn apply_coupon(&mut self, code: &str) -> CouponOutcome {
        self.apply_coupon_at(code, current_timestamp()).await
    }

    /// [`CartEngine::apply_coupon`] with an explicit "now", for callers
    /// that manage time themselves.
    pub async fn apply_coupon_at(&mut self, code: &str, now: i64) -> CouponOutcome {
        let Some(request) = self.begin_coupon(code) else {
            return CouponOutcome::Rejected(CouponRejection::EmptyCode);
        };
        let lookup = Arc::clone(&self.promotions);
        let result = lookup.find_active_by_coupon_code(&request.code, now).await;
        self.resolve_coupon(&request, result)
    }

    /// Clear the applied promotion and any rejection. Always succeeds.
    pub fn remove_coupon(&mut self) {
        self.cart.remove_coupon();
    }
}

impl std::fmt::Debug for CartEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartEngine")
            .field("cart", &self.cart)
            .field("coupon_epoch", &self.coupon_epoch)
            .finish_non_exhaustive()
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
