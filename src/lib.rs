//! Restaurant order service.
//!
//! The backend half turns a customer's cart into an order, its cart items and
//! their selected items in one transaction ([`orders::OrderService`]). The
//! [`cart`] module holds the client-side cart that produces those submissions.

pub mod app_error;
pub mod app_state;
pub mod bootstrap;
pub mod cart;
pub mod config;
pub mod context;
pub mod db;
pub mod domain;
pub mod middleware;
pub mod models;
pub mod orders;
pub mod repositories;
pub mod routes;
pub mod schema;
