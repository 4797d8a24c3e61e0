//! Заказы в админке. Every call goes through the auth session so a 401 triggers
//! the shared token refresh.

use contracts::domain::a004_admin_order::aggregate::{
    AdminOrder, AdminOrderListParams, OrderId, OrderStatus, UpdateOrderStatusDto,
};

use crate::shared::api_utils::{request_json, send, to_body, with_query, ApiError, HttpMethod};
use crate::system::auth::context::AuthSession;

pub async fn fetch_orders(
    session: AuthSession,
    params: AdminOrderListParams,
) -> Result<Vec<AdminOrder>, ApiError> {
    let path = with_query("/admin/order/", &params);
    session
        .run(|token| {
            let path = path.clone();
            async move { request_json(HttpMethod::Get, &path, None, token.as_deref()).await }
        })
        .await
}

pub async fn update_status(
    session: AuthSession,
    order_id: OrderId,
    status: OrderStatus,
) -> Result<AdminOrder, ApiError> {
    let path = format!("/admin/order/{}/status", order_id);
    let body = to_body(&UpdateOrderStatusDto { status })?;
    session
        .run(|token| {
            let path = path.clone();
            let body = body.clone();
            async move { request_json(HttpMethod::Patch, &path, Some(&body), token.as_deref()).await }
        })
        .await
}

/// Снять заказ с доски (is_active = false)
pub async fn archive_order(session: AuthSession, order_id: OrderId) -> Result<(), ApiError> {
    let path = format!("/admin/order/{}/archive", order_id);
    session
        .run(|token| {
            let path = path.clone();
            async move {
                send(HttpMethod::Post, &path, None, token.as_deref()).await?;
                Ok(())
            }
        })
        .await
}

pub async fn delete_order(session: AuthSession, order_id: OrderId) -> Result<(), ApiError> {
    let path = format!("/admin/order/{}", order_id);
    session
        .run(|token| {
            let path = path.clone();
            async move {
                send(HttpMethod::Delete, &path, None, token.as_deref()).await?;
                Ok(())
            }
        })
        .await
}
