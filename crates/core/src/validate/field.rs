//! Single-field validators.
//!
//! The GTIN-14 and expiry validators live in [`crate::gtin`] and
//! [`crate::expiry`]; these cover the remaining record fields.

/// Minimum SKU length after trimming.
pub const SKU_MIN_CHARS: usize = 3;
/// Minimum product name length after trimming.
pub const PRODUCT_MIN_CHARS: usize = 2;

/// SKU must have at least [`SKU_MIN_CHARS`] characters once trimmed.
pub fn validate_sku(sku: &str) -> bool {
    sku.trim().chars().count() >= SKU_MIN_CHARS
}

/// Product name must have at least [`PRODUCT_MIN_CHARS`] characters once
/// trimmed.
pub fn validate_product(product: &str) -> bool {
    product.trim().chars().count() >= PRODUCT_MIN_CHARS
}

/// Quantity per box must be a positive integer.
pub fn validate_quantity(qty: i64) -> bool {
    qty > 0
}
