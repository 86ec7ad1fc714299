use uuid::Uuid;

use super::{Audit, ValidationError, ensure_amount, ensure_quantity};

/// Submitted cart item fields, checked before any order exists.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemFields {
    pub menu_id: Uuid,
    pub base_price: f64,
    pub quantity: i32,
}

impl CartItemFields {
    pub fn new(menu_id: Uuid, base_price: f64, quantity: i32) -> Result<Self, ValidationError> {
        ensure_amount("Cart item base price", base_price)?;
        ensure_quantity("Cart item quantity", quantity)?;
        Ok(Self {
            menu_id,
            base_price,
            quantity,
        })
    }
}

/// A cart item bound to its (already stored) order.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub order_id: Uuid,
    pub menu_id: Uuid,
    pub base_price: f64,
    pub quantity: i32,
    pub audit: Audit,
}

impl NewCartItem {
    pub fn create(fields: CartItemFields, order_id: Uuid, audit: Audit) -> Self {
        let CartItemFields {
            menu_id,
            base_price,
            quantity,
        } = fields;
        Self {
            order_id,
            menu_id,
            base_price,
            quantity,
            audit,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub menu_id: Uuid,
    pub base_price: f64,
    pub quantity: i32,
    pub audit: Audit,
}
