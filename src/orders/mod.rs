//! The order-submission workflow: validate, persist the order, fan out its
//! cart items and their selections, and answer with the public order shape.

pub mod dto;
pub mod error;
pub mod parser;
pub mod service;

pub use dto::{
    CartItemResponseDto, CreateCartItemDto, CreateOrderDto, CreateSelectedCartItemDto, OrderResponseDto,
    SelectedCartItemResponseDto,
};
pub use error::OrderError;
pub use service::{OrderService, OrderWorkflow};
