//! Domain records and the factories that validate them before they reach storage.

pub mod audit;
pub mod cart_item;
pub mod merchant;
pub mod order;
pub mod selected_cart_item;

pub use audit::Audit;
pub use cart_item::{CartItem, CartItemFields, NewCartItem};
pub use merchant::Merchant;
pub use order::{NewOrder, Order, OrderState, OrderType};
pub use selected_cart_item::{NewSelectedCartItem, SelectedCartItem, SelectedCartItemDraft, SelectedCartItemFields};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Monetary amounts must be finite and not negative.
pub(crate) fn ensure_amount(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError(format!("{field} must be a non-negative amount")));
    }
    Ok(())
}

pub(crate) fn ensure_quantity(field: &str, value: i32) -> Result<(), ValidationError> {
    if value < 1 {
        return Err(ValidationError(format!("{field} must be at least 1")));
    }
    Ok(())
}
