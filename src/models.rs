use chrono::{DateTime, Utc};
use diesel::{
    Selectable,
    prelude::{Identifiable, Insertable, Queryable},
};
use serde::Serialize;
use uuid::Uuid;

// Merchants

#[derive(Queryable, Selectable, Identifiable, Serialize, Debug, Clone)]
#[diesel(table_name = crate::schema::merchants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MerchantEntity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Orders

#[derive(Queryable, Selectable, Identifiable, Serialize, Debug, Clone)]
#[diesel(table_name = crate::schema::orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderEntity {
    pub id: Uuid,
    pub state: String,
    pub order_type: String,
    pub total: f64,
    pub merchant_id: Uuid,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub modified_by: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CreateOrderEntity {
    pub state: String,
    pub order_type: String,
    pub total: f64,
    pub merchant_id: Uuid,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

// Cart items

#[derive(Queryable, Selectable, Identifiable, Serialize, Debug, Clone)]
#[diesel(table_name = crate::schema::cart_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartItemEntity {
    pub id: Uuid,
    pub order_id: Uuid,
    pub menu_id: Uuid,
    pub base_price: f64,
    pub quantity: i32,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub modified_by: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::cart_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CreateCartItemEntity {
    pub order_id: Uuid,
    pub menu_id: Uuid,
    pub base_price: f64,
    pub quantity: i32,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

// Selected cart items

#[derive(Queryable, Selectable, Identifiable, Serialize, Debug, Clone)]
#[diesel(table_name = crate::schema::selected_cart_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SelectedCartItemEntity {
    pub id: Uuid,
    pub cart_item_id: Uuid,
    pub menu_id: Uuid,
    pub price: f64,
    pub quantity: i32,
    pub total: f64,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub modified_by: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::selected_cart_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CreateSelectedCartItemEntity {
    pub cart_item_id: Uuid,
    pub menu_id: Uuid,
    pub price: f64,
    pub quantity: i32,
    pub total: f64,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}
