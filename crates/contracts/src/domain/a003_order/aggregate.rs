use serde::{Deserialize, Serialize};

use super::form::DeliveryType;
use crate::domain::a001_bouquet::aggregate::BouquetId;

/// Позиция заказа (снимок цены на момент оформления)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemDto {
    pub bouquet_id: BouquetId,
    pub title: String,
    pub quantity: u32,
    pub price: u64,
}

/// Тело запроса на создание заказа
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderDto {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub is_pickup_by_customer: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greeting_card_text: Option<String>,

    pub delivery_method: DeliveryType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_time_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_time_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_house: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_apartment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_floor: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    pub items: Vec<OrderItemDto>,
    pub payment_amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub payment_url: String,
}
