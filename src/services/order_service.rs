//! Food order intake and the kitchen workflow.

use std::time::SystemTime;

use uuid::Uuid;

use crate::{
    auth::Claims,
    dao::models::{ActivityAction, ActivityEntity, FoodOrderEntity, OrderStatus},
    dto::{
        common::MessageResponse,
        order::{CreateOrderRequest, CreateOrderResponse, OrderSummary},
    },
    error::ServiceError,
    services::validate,
    state::SharedState,
};

/// Order numbers start here so early tickets don't look like test data.
const ORDER_NUMBER_BASE: u64 = 1001;

/// Kitchen queue; defaults to orders still in flight.
pub async fn list(
    state: &SharedState,
    status: Option<OrderStatus>,
) -> Result<Vec<OrderSummary>, ServiceError> {
    let store = state.require_store().await?;
    let statuses = match status {
        Some(status) => vec![status],
        None => vec![OrderStatus::Pending, OrderStatus::Preparing],
    };
    let orders = store.list_orders_by_status(statuses).await?;
    Ok(orders.into_iter().map(Into::into).collect())
}

/// Place an order from a table.
pub async fn create(
    state: &SharedState,
    payload: CreateOrderRequest,
) -> Result<CreateOrderResponse, ServiceError> {
    validate(&payload)?;
    let store = state.require_store().await?;

    // Sequential ticket number from the total count; racy under concurrent
    // orders, same as the floor has always run.
    let count = store.count_food_orders().await?;
    let order_number = format!("#{}", count + ORDER_NUMBER_BASE);

    let order = FoodOrderEntity {
        id: Uuid::new_v4(),
        order_number,
        player_id: None,
        player_name: payload.player_name,
        card_number: payload.card_number,
        table_number: payload.table_number,
        seat_number: payload.seat_number,
        items: payload.items.into_iter().map(Into::into).collect(),
        status: OrderStatus::Pending,
        created_at: SystemTime::now(),
        started_at: None,
        completed_at: None,
        cancelled_at: None,
        handled_by: None,
    };
    store.insert_food_order(order.clone()).await?;

    let mut log = ActivityEntity::new(ActivityAction::OrderStart);
    log.player_name = Some(order.player_name.clone());
    log.table_number = order.table_number;
    log.details = Some("New order placed".into());
    store.append_activity(log).await?;

    Ok(CreateOrderResponse {
        message: "Order placed".into(),
        order: order.into(),
    })
}

/// Move an order into preparation.
pub async fn start(
    state: &SharedState,
    staff: &Claims,
    id: Uuid,
) -> Result<MessageResponse, ServiceError> {
    let store = state.require_store().await?;
    let mut order = store
        .find_food_order(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("order not found".into()))?;

    order.status = OrderStatus::Preparing;
    order.started_at = Some(SystemTime::now());
    order.handled_by = Some(staff.sub);
    store.save_food_order(order.clone()).await?;

    let mut log = ActivityEntity::new(ActivityAction::OrderStart);
    log.staff_id = Some(staff.sub);
    log.staff_name = staff.name.clone();
    log.table_number = order.table_number;
    log.details = Some("Started preparing order".into());
    store.append_activity(log).await?;

    Ok(MessageResponse::new("Order started"))
}

/// Mark an order delivered.
pub async fn complete(
    state: &SharedState,
    staff: &Claims,
    id: Uuid,
) -> Result<MessageResponse, ServiceError> {
    let store = state.require_store().await?;
    let mut order = store
        .find_food_order(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("order not found".into()))?;

    order.status = OrderStatus::Delivered;
    order.completed_at = Some(SystemTime::now());
    store.save_food_order(order.clone()).await?;

    let mut log = ActivityEntity::new(ActivityAction::OrderDone);
    log.staff_id = Some(staff.sub);
    log.staff_name = staff.name.clone();
    log.table_number = order.table_number;
    log.details = Some("Order delivered".into());
    store.append_activity(log).await?;

    Ok(MessageResponse::new("Order completed"))
}

/// Cancel an order.
pub async fn cancel(state: &SharedState, id: Uuid) -> Result<MessageResponse, ServiceError> {
    let store = state.require_store().await?;
    let mut order = store
        .find_food_order(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("order not found".into()))?;

    order.status = OrderStatus::Cancelled;
    order.cancelled_at = Some(SystemTime::now());
    store.save_food_order(order).await?;

    Ok(MessageResponse::new("Order cancelled"))
}
