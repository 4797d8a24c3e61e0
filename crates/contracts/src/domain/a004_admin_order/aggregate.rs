use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::common::AggregateId;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор заказа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub Uuid);

impl OrderId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    /// Первые 8 символов, как номер заказа на карточках
    pub fn short(&self) -> String {
        self.as_string().chars().take(8).collect()
    }
}

impl AggregateId for OrderId {
    fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    fn uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// Status
// ============================================================================

/// Статус заказа в бэк-офисе
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Paid,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Board columns, left to right
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Paid,
        OrderStatus::Processing,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Paid => "paid",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Paid => "Оплачен",
            OrderStatus::Processing => "Обрабатывается",
            OrderStatus::Completed => "Выполнен",
            OrderStatus::Cancelled => "Отменен",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown order status: {}", s))
    }
}

// ============================================================================
// DTOs
// ============================================================================

/// Заказ в списке бэк-офиса (`GET /admin/order/`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminOrder {
    pub id: OrderId,
    pub customer_email: String,
    pub customer_phone: String,
    pub recipient_name: String,
    #[serde(default)]
    pub recipient_phone: Option<String>,
    #[serde(default)]
    pub delivery_city: Option<String>,
    #[serde(default)]
    pub delivery_street: Option<String>,
    #[serde(default)]
    pub delivery_house: Option<String>,
    #[serde(default)]
    pub delivery_apartment: Option<String>,
    #[serde(default)]
    pub delivery_floor: Option<String>,
    pub total_amount: u64,
    /// Raw status string; values outside [`OrderStatus`] are kept but not placed on the board
    pub status: String,
    pub is_active: bool,
    pub created_at: String,
}

impl AdminOrder {
    pub fn status(&self) -> Option<OrderStatus> {
        self.status.parse().ok()
    }

    /// Адрес одной строкой: "Москва, Тверская, д. 1, кв. 5, эт. 3"
    pub fn delivery_address(&self) -> Option<String> {
        let mut parts: Vec<String> = Vec::new();
        let present = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        if let Some(city) = present(&self.delivery_city) {
            parts.push(city);
        }
        if let Some(street) = present(&self.delivery_street) {
            parts.push(street);
        }
        if let Some(house) = present(&self.delivery_house) {
            parts.push(format!("д. {}", house));
        }
        if let Some(apartment) = present(&self.delivery_apartment) {
            parts.push(format!("кв. {}", apartment));
        }
        if let Some(floor) = present(&self.delivery_floor) {
            parts.push(format!("эт. {}", floor));
        }
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminOrderListParams {
    pub limit: u32,
    pub offset: u32,
}

impl Default for AdminOrderListParams {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOrderStatusDto {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER_JSON: &str = r#"{
        "id": "3f2b1c4d-5e6f-4a7b-8c9d-0e1f2a3b4c5d",
        "customer_email": "anna@example.ru",
        "customer_phone": "79991234567",
        "recipient_name": "Мария",
        "recipient_phone": null,
        "delivery_city": "Москва",
        "delivery_street": "Тверская",
        "delivery_house": "1",
        "delivery_apartment": "",
        "delivery_floor": null,
        "total_amount": 11200,
        "status": "paid",
        "is_active": true,
        "created_at": "2024-11-10T12:30:00"
    }"#;

    #[test]
    fn test_deserialize_admin_order() {
        let order: AdminOrder = serde_json::from_str(ORDER_JSON).unwrap();
        assert_eq!(order.status(), Some(OrderStatus::Paid));
        assert_eq!(order.total_amount, 11200);
        assert_eq!(order.delivery_address().as_deref(), Some("Москва, Тверская, д. 1"));
        assert_eq!(order.id.short(), "3f2b1c4d");
    }

    #[test]
    fn test_unknown_status_is_kept_raw() {
        let json = ORDER_JSON.replace("\"paid\"", "\"pending\"");
        let order: AdminOrder = serde_json::from_str(&json).unwrap();
        assert_eq!(order.status, "pending");
        assert_eq!(order.status(), None);
    }

    #[test]
    fn test_status_update_body() {
        let body = UpdateOrderStatusDto { status: OrderStatus::Processing };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"status":"processing"}"#);
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
    }
}
