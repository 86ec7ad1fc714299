use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::{CartItem, Order, SelectedCartItem};

use super::dto::{CartItemResponseDto, OrderResponseDto, SelectedCartItemResponseDto};

/// Projects a stored order and its children into the public response shape.
///
/// Cart items keep their insertion order; each carries the selections linked
/// to it. Selections pointing at a cart item outside `cart_items` are left out.
pub fn create_order_response(
    order: &Order,
    cart_items: &[CartItem],
    selected_items: &[SelectedCartItem],
) -> OrderResponseDto {
    let mut selections: HashMap<Uuid, Vec<SelectedCartItemResponseDto>> = HashMap::new();
    for item in selected_items {
        selections
            .entry(item.cart_item_id)
            .or_default()
            .push(SelectedCartItemResponseDto {
                id: item.id,
                cart_item_id: item.cart_item_id,
                menu_id: item.menu_id,
                price: item.price,
                quantity: item.quantity,
                total: item.total,
            });
    }

    let cart_items = cart_items
        .iter()
        .map(|item| CartItemResponseDto {
            id: item.id,
            menu_id: item.menu_id,
            base_price: item.base_price,
            quantity: item.quantity,
            selected_items: selections.remove(&item.id).unwrap_or_default(),
        })
        .collect();

    OrderResponseDto {
        id: order.id,
        state: order.state,
        order_type: order.order_type,
        total: order.total,
        merchant_id: order.merchant_id,
        created_by: order.audit.created_by.clone(),
        created_at: order.audit.created_at,
        cart_items,
    }
}
