use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{OrderState, OrderType};

/// Cart summary submitted by a customer.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderDto {
    pub state: Option<OrderState>,
    #[serde(rename = "type")]
    pub order_type: Option<OrderType>,
    pub merchant_id: Option<String>,
    pub total: f64,
    #[serde(default)]
    pub cart_items: Vec<CreateCartItemDto>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCartItemDto {
    pub menu_id: String,
    pub base_price: f64,
    pub quantity: i32,
    #[serde(default)]
    pub selected_items: Vec<CreateSelectedCartItemDto>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSelectedCartItemDto {
    /// Menu of the cart item this selection belongs to.
    pub menu_id: String,
    pub price: f64,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponseDto {
    pub id: Uuid,
    pub state: OrderState,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub total: f64,
    pub merchant_id: Uuid,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub cart_items: Vec<CartItemResponseDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponseDto {
    pub id: Uuid,
    pub menu_id: Uuid,
    pub base_price: f64,
    pub quantity: i32,
    pub selected_items: Vec<SelectedCartItemResponseDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectedCartItemResponseDto {
    pub id: Uuid,
    pub cart_item_id: Uuid,
    pub menu_id: Uuid,
    pub price: f64,
    pub quantity: i32,
    pub total: f64,
}
