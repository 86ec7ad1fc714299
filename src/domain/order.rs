use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Audit, ValidationError, ensure_amount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Preparing => "PREPARING",
            Self::Ready => "READY",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "PREPARING" => Ok(Self::Preparing),
            "READY" => Ok(Self::Ready),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(ValidationError(format!("Unknown order state '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    DineIn,
    Takeaway,
    Delivery,
}

impl OrderType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DineIn => "DINE_IN",
            Self::Takeaway => "TAKEAWAY",
            Self::Delivery => "DELIVERY",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DINE_IN" => Ok(Self::DineIn),
            "TAKEAWAY" => Ok(Self::Takeaway),
            "DELIVERY" => Ok(Self::Delivery),
            other => Err(ValidationError(format!("Unknown order type '{other}'"))),
        }
    }
}

/// A validated order that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub state: OrderState,
    pub order_type: OrderType,
    pub total: f64,
    pub merchant_id: Uuid,
    pub audit: Audit,
}

impl NewOrder {
    pub fn create(
        state: Option<OrderState>,
        order_type: Option<OrderType>,
        total: f64,
        merchant_id: Option<Uuid>,
        audit: Audit,
    ) -> Result<Self, ValidationError> {
        let state = state.ok_or_else(|| ValidationError::new("Order state is required"))?;
        let order_type = order_type.ok_or_else(|| ValidationError::new("Order type is required"))?;
        let merchant_id = merchant_id.ok_or_else(|| ValidationError::new("Merchant id is required"))?;
        ensure_amount("Order total", total)?;

        Ok(Self {
            state,
            order_type,
            total,
            merchant_id,
            audit,
        })
    }
}

/// A persisted order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub state: OrderState,
    pub order_type: OrderType,
    pub total: f64,
    pub merchant_id: Uuid,
    pub audit: Audit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;

    fn audit() -> Audit {
        Audit::create_insert_context(&Context::new("tester"))
    }

    #[test]
    fn creates_order_from_complete_input() {
        let merchant_id = Uuid::new_v4();
        let order = NewOrder::create(
            Some(OrderState::Pending),
            Some(OrderType::Delivery),
            42.5,
            Some(merchant_id),
            audit(),
        )
        .unwrap();
        assert_eq!(order.merchant_id, merchant_id);
        assert_eq!(order.total, 42.5);
    }

    #[test]
    fn missing_fields_are_rejected() {
        let merchant_id = Some(Uuid::new_v4());
        assert!(NewOrder::create(None, Some(OrderType::DineIn), 1.0, merchant_id, audit()).is_err());
        assert!(NewOrder::create(Some(OrderState::Pending), None, 1.0, merchant_id, audit()).is_err());
        assert!(
            NewOrder::create(Some(OrderState::Pending), Some(OrderType::DineIn), 1.0, None, audit())
                .is_err()
        );
    }

    #[test]
    fn negative_or_nan_total_is_rejected() {
        let merchant_id = Some(Uuid::new_v4());
        let state = Some(OrderState::Pending);
        let kind = Some(OrderType::Takeaway);
        assert!(NewOrder::create(state, kind, -0.01, merchant_id, audit()).is_err());
        assert!(NewOrder::create(state, kind, f64::NAN, merchant_id, audit()).is_err());
        assert!(NewOrder::create(state, kind, 0.0, merchant_id, audit()).is_ok());
    }

    #[test]
    fn state_and_type_parse_their_storage_form() {
        for state in [
            OrderState::Pending,
            OrderState::Confirmed,
            OrderState::Preparing,
            OrderState::Ready,
            OrderState::Completed,
            OrderState::Cancelled,
        ] {
            assert_eq!(state.as_str().parse::<OrderState>().unwrap(), state);
        }
        assert_eq!("DINE_IN".parse::<OrderType>().unwrap(), OrderType::DineIn);
        assert!("dine-in".parse::<OrderType>().is_err());
    }
}
