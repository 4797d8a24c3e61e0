use contracts::domain::a003_order::aggregate::{CreateOrderDto, CreateOrderResponse};

use crate::shared::api_utils::{request_json, to_body, ApiError, HttpMethod};

/// Создать заказ; the response carries the payment page URL
pub async fn create_order(dto: &CreateOrderDto) -> Result<CreateOrderResponse, ApiError> {
    let body = to_body(dto)?;
    request_json(HttpMethod::Post, "/api/v1/order/", Some(&body), None).await
}
