use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::delivery::{DeliverySlot, CITIES};

/// Кто получает букет
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientType {
    Customer,
    Other,
}

/// Способ получения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    Delivery,
    Pickup,
}

impl DeliveryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryType::Delivery => "delivery",
            DeliveryType::Pickup => "pickup",
        }
    }
}

/// Данные формы оформления заказа. Live only while the checkout is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFormData {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,

    pub recipient_type: RecipientType,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub greeting_card_text: String,

    pub delivery_type: DeliveryType,
    pub delivery_date: Option<NaiveDate>,
    pub delivery_time_from: Option<NaiveTime>,
    pub delivery_time_to: Option<NaiveTime>,
    pub delivery_city: String,
    pub delivery_street: String,
    pub delivery_house: String,
    pub delivery_apartment: String,
    pub delivery_floor: String,

    pub comment: String,
}

impl Default for OrderFormData {
    fn default() -> Self {
        Self {
            customer_name: String::new(),
            customer_phone: String::new(),
            customer_email: String::new(),
            recipient_type: RecipientType::Other,
            recipient_name: String::new(),
            recipient_phone: String::new(),
            greeting_card_text: String::new(),
            delivery_type: DeliveryType::Delivery,
            delivery_date: None,
            delivery_time_from: None,
            delivery_time_to: None,
            delivery_city: CITIES.first().map(|c| c.to_string()).unwrap_or_default(),
            delivery_street: String::new(),
            delivery_house: String::new(),
            delivery_apartment: String::new(),
            delivery_floor: String::new(),
            comment: String::new(),
        }
    }
}

impl OrderFormData {
    /// Both ends of the delivery window come from one slot, so they never disagree.
    pub fn select_slot(&mut self, slot: DeliverySlot) {
        self.delivery_time_from = Some(slot.from);
        self.delivery_time_to = Some(slot.to);
    }

    pub fn selected_slot(&self) -> Option<DeliverySlot> {
        match (self.delivery_time_from, self.delivery_time_to) {
            (Some(from), Some(to)) => Some(DeliverySlot { from, to }),
            _ => None,
        }
    }
}
