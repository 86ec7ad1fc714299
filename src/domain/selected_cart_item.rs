//! Selections are submitted nested under cart items that have no identity yet,
//! so they are built in two steps: a [`SelectedCartItemDraft`] without an owner,
//! then [`SelectedCartItemDraft::link`] once the owning cart item is stored.

use uuid::Uuid;

use super::{Audit, ValidationError, ensure_amount, ensure_quantity};

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedCartItemFields {
    pub menu_id: Uuid,
    pub price: f64,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedCartItemDraft {
    menu_id: Uuid,
    price: f64,
    quantity: i32,
    total: f64,
    audit: Audit,
}

impl SelectedCartItemDraft {
    pub fn create(fields: SelectedCartItemFields, audit: Audit) -> Result<Self, ValidationError> {
        let SelectedCartItemFields {
            menu_id,
            price,
            quantity,
        } = fields;
        ensure_amount("Selected item price", price)?;
        ensure_quantity("Selected item quantity", quantity)?;
        let total = price * f64::from(quantity);
        ensure_amount("Selected item total", total)?;

        Ok(Self {
            menu_id,
            price,
            quantity,
            total,
            audit,
        })
    }

    /// Menu the selection belongs to; the key used to find its owner.
    pub fn menu_id(&self) -> Uuid {
        self.menu_id
    }

    pub fn link(self, cart_item_id: Uuid) -> NewSelectedCartItem {
        NewSelectedCartItem {
            cart_item_id,
            menu_id: self.menu_id,
            price: self.price,
            quantity: self.quantity,
            total: self.total,
            audit: self.audit,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSelectedCartItem {
    pub cart_item_id: Uuid,
    pub menu_id: Uuid,
    pub price: f64,
    pub quantity: i32,
    pub total: f64,
    pub audit: Audit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedCartItem {
    pub id: Uuid,
    pub cart_item_id: Uuid,
    pub menu_id: Uuid,
    pub price: f64,
    pub quantity: i32,
    pub total: f64,
    pub audit: Audit,
}
