//! Promotion eligibility matching.
//!
//! A promotion targets products by name, and product naming in the catalog
//! is not exact ("Açaí Premium" vs "Açaí Premium 500ml"). Eligibility is
//! therefore a symmetric, case-insensitive substring match: a deliberately
//! loose business rule.

/// Check whether a cart item name and a promotion's target product name
/// match.
///
/// Both sides are trimmed and Unicode-lowercased; the match holds when
/// either string contains the other. A blank side never matches.
pub fn matches(item_name: &str, promotion_product_name: &str) -> bool {
    let item = item_name.trim().to_lowercase();
    let target = promotion_product_name.trim().to_lowercase();
    if item.is_empty() || target.is_empty() {
        return false;
    }
    item.contains(&target) || target.contains(&item)
}
