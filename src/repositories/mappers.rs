//! Projections between domain records and their diesel rows.

use crate::{
    domain::{
        Audit, CartItem, Merchant, NewCartItem, NewOrder, NewSelectedCartItem, Order, SelectedCartItem,
    },
    models::{
        CartItemEntity, CreateCartItemEntity, CreateOrderEntity, CreateSelectedCartItemEntity,
        MerchantEntity, OrderEntity, SelectedCartItemEntity,
    },
};

use super::RepositoryError;

pub struct OrderMapper;

impl OrderMapper {
    pub fn to_persistence(order: &NewOrder) -> CreateOrderEntity {
        CreateOrderEntity {
            state: order.state.as_str().to_owned(),
            order_type: order.order_type.as_str().to_owned(),
            total: order.total,
            merchant_id: order.merchant_id,
            created_by: order.audit.created_by.clone(),
            created_at: order.audit.created_at,
        }
    }

    pub fn to_domain(entity: OrderEntity) -> Result<Order, RepositoryError> {
        let state = entity
            .state
            .parse()
            .map_err(|e| RepositoryError::Corrupt(format!("order {}: {e}", entity.id)))?;
        let order_type = entity
            .order_type
            .parse()
            .map_err(|e| RepositoryError::Corrupt(format!("order {}: {e}", entity.id)))?;

        Ok(Order {
            id: entity.id,
            state,
            order_type,
            total: entity.total,
            merchant_id: entity.merchant_id,
            audit: Audit {
                created_by: entity.created_by,
                created_at: entity.created_at,
                modified_by: entity.modified_by,
                modified_at: entity.modified_at,
            },
        })
    }
}

pub struct CartItemMapper;

impl CartItemMapper {
    pub fn to_persistence(item: &NewCartItem) -> CreateCartItemEntity {
        CreateCartItemEntity {
            order_id: item.order_id,
            menu_id: item.menu_id,
            base_price: item.base_price,
            quantity: item.quantity,
            created_by: item.audit.created_by.clone(),
            created_at: item.audit.created_at,
        }
    }

    pub fn to_domain(entity: CartItemEntity) -> CartItem {
        CartItem {
            id: entity.id,
            order_id: entity.order_id,
            menu_id: entity.menu_id,
            base_price: entity.base_price,
            quantity: entity.quantity,
            audit: Audit {
                created_by: entity.created_by,
                created_at: entity.created_at,
                modified_by: entity.modified_by,
                modified_at: entity.modified_at,
            },
        }
    }
}

pub struct SelectedCartItemMapper;

impl SelectedCartItemMapper {
    pub fn to_persistence(item: &NewSelectedCartItem) -> CreateSelectedCartItemEntity {
        CreateSelectedCartItemEntity {
            cart_item_id: item.cart_item_id,
            menu_id: item.menu_id,
            price: item.price,
            quantity: item.quantity,
            total: item.total,
            created_by: item.audit.created_by.clone(),
            created_at: item.audit.created_at,
        }
    }

    pub fn to_domain(entity: SelectedCartItemEntity) -> SelectedCartItem {
        SelectedCartItem {
            id: entity.id,
            cart_item_id: entity.cart_item_id,
            menu_id: entity.menu_id,
            price: entity.price,
            quantity: entity.quantity,
            total: entity.total,
            audit: Audit {
                created_by: entity.created_by,
                created_at: entity.created_at,
                modified_by: entity.modified_by,
                modified_at: entity.modified_at,
            },
        }
    }
}

pub struct MerchantMapper;

impl MerchantMapper {
    pub fn to_domain(entity: MerchantEntity) -> Merchant {
        Merchant {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            is_active: entity.is_active,
        }
    }
}
