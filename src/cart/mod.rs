//! Shopping cart kept on the client while a customer builds an order.
//!
//! [`CartState::reduce`] is a pure transition function; [`ShoppingCart`] owns
//! the current state, applies actions to it and then tells subscribers that
//! something changed.

pub mod state;
pub mod store;

pub use state::{CartAction, CartState, MenuItem, SelectedItem};
pub use store::{ShoppingCart, SubscriptionId};
