use std::sync::Arc;

use crate::orders::OrderWorkflow;

#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<dyn OrderWorkflow>,
}

impl AppState {
    pub fn new(orders: impl OrderWorkflow + 'static) -> Self {
        Self {
            orders: Arc::new(orders),
        }
    }
}
