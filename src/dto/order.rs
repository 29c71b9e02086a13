use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::{FoodOrderEntity, OrderItemEntity, OrderStatus},
    dto::{format_optional_time, format_system_time},
};

/// One line of a new order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItemInput {
    pub name: String,
    /// Menu price; defaults to zero for comped items.
    pub price: Option<f64>,
    /// Defaults to one.
    pub quantity: Option<u32>,
}

impl From<OrderItemInput> for OrderItemEntity {
    fn from(item: OrderItemInput) -> Self {
        Self {
            name: item.name,
            price: item.price.unwrap_or(0.0),
            quantity: item.quantity.unwrap_or(1),
        }
    }
}

/// Payload to place an order; open to seated guests without an account.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, max = 60))]
    pub player_name: String,
    pub card_number: Option<String>,
    pub table_number: Option<u32>,
    pub seat_number: Option<u32>,
    #[validate(length(min = 1))]
    pub items: Vec<OrderItemInput>,
}

/// Query string for the kitchen queue listing.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderListQuery {
    /// Restrict to one status; defaults to pending and preparing.
    pub status: Option<OrderStatus>,
}

/// Line-item projection.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemSummary {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl From<OrderItemEntity> for OrderItemSummary {
    fn from(item: OrderItemEntity) -> Self {
        Self {
            name: item.name,
            price: item.price,
            quantity: item.quantity,
        }
    }
}

/// Order projection.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderSummary {
    pub id: Uuid,
    pub order_number: String,
    pub player_name: String,
    pub card_number: Option<String>,
    pub table_number: Option<u32>,
    pub seat_number: Option<u32>,
    pub items: Vec<OrderItemSummary>,
    pub status: OrderStatus,
    pub created_at: String,
    pub started_at: Option<String>,
    pub completed_at: Option<String>,
}

impl From<FoodOrderEntity> for OrderSummary {
    fn from(order: FoodOrderEntity) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number,
            player_name: order.player_name,
            card_number: order.card_number,
            table_number: order.table_number,
            seat_number: order.seat_number,
            items: order.items.into_iter().map(Into::into).collect(),
            status: order.status,
            created_at: format_system_time(order.created_at),
            started_at: format_optional_time(order.started_at),
            completed_at: format_optional_time(order.completed_at),
        }
    }
}

/// Body returned after placing an order.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateOrderResponse {
    pub message: String,
    pub order: OrderSummary,
}
