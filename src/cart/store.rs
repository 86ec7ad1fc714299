use std::fmt;

use super::state::{CartAction, CartState, MenuItem, SelectedItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owns the cart state. Every action is applied first, then subscribers are
/// handed a read-only view of the updated cart to read whatever they need.
///
/// Lives on one thread; listeners are not `Send`.
#[derive(Default)]
pub struct ShoppingCart {
    state: CartState,
    listeners: Vec<(SubscriptionId, Box<dyn FnMut(&CartState)>)>,
    next_id: u64,
}

impl ShoppingCart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&CartState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn dispatch(&mut self, action: CartAction) {
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(action);
        tracing::debug!(
            quantity = self.state.quantity(),
            total_price = self.state.total_price(),
            "Cart updated"
        );

        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
    }

    pub fn add_to_cart(&mut self, menu: MenuItem) {
        self.dispatch(CartAction::AddToCart(menu));
    }

    pub fn remove_from_cart(&mut self, menu: MenuItem) {
        self.dispatch(CartAction::RemoveFromCart(menu));
    }

    pub fn add_item_to_cart(&mut self, selection: SelectedItem) {
        self.dispatch(CartAction::AddItemToCart(selection));
    }

    pub fn clear_cart(&mut self) {
        self.dispatch(CartAction::ClearCart);
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn total_price(&self) -> f64 {
        self.state.total_price()
    }

    pub fn menus(&self) -> &[MenuItem] {
        self.state.menus()
    }

    pub fn quantity(&self) -> u32 {
        self.state.quantity()
    }
}

impl fmt::Debug for ShoppingCart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShoppingCart")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
