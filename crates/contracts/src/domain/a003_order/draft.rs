//! Сборка `CreateOrderDto` из формы и содержимого корзины.
//!
//! Pure and total: the checkout only calls it with a form that already passed
//! [`validate_order_form`](super::validation::validate_order_form).

use chrono::{Duration, FixedOffset, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

use super::aggregate::{CreateOrderDto, OrderItemDto};
use super::form::{DeliveryType, OrderFormData, RecipientType};
use super::phone::normalize_phone;
use crate::domain::a002_basket::aggregate::BasketItem;

const DEFAULT_TIME_FROM: (u32, u32) = (10, 0);
const DEFAULT_TIME_TO: (u32, u32) = (11, 0);

/// Build the order request.
///
/// `total` is the amount the customer saw and is sent as is. `offset` is the
/// customer's UTC offset; slot times are wall-clock times in that offset.
pub fn build_order_dto(
    form: &OrderFormData,
    items: &[BasketItem],
    total: u64,
    offset: FixedOffset,
) -> CreateOrderDto {
    let customer_name = form.customer_name.trim().to_string();
    let customer_phone = normalize_phone(&form.customer_phone);

    let (recipient_name, recipient_phone, greeting_card_text) = match form.recipient_type {
        RecipientType::Other => (
            form.recipient_name.trim().to_string(),
            normalize_phone(&form.recipient_phone),
            non_empty(&form.greeting_card_text),
        ),
        RecipientType::Customer => (customer_name.clone(), customer_phone.clone(), None),
    };

    let mut dto = CreateOrderDto {
        customer_name,
        customer_phone,
        customer_email: form.customer_email.trim().to_string(),
        is_pickup_by_customer: form.delivery_type == DeliveryType::Pickup,
        recipient_name: Some(recipient_name),
        recipient_phone: Some(recipient_phone),
        greeting_card_text,
        delivery_method: form.delivery_type,
        delivery_date: None,
        delivery_time_from: None,
        delivery_time_to: None,
        delivery_city: None,
        delivery_street: None,
        delivery_house: None,
        delivery_apartment: None,
        delivery_floor: None,
        comment: non_empty(&form.comment),
        items: items
            .iter()
            .map(|item| OrderItemDto {
                bouquet_id: item.product.id,
                title: item.product.name.clone(),
                quantity: item.quantity,
                price: item.product.price,
            })
            .collect(),
        payment_amount: total,
    };

    if form.delivery_type == DeliveryType::Delivery {
        if let Some(date) = form.delivery_date {
            let from = form.delivery_time_from.unwrap_or_else(|| time(DEFAULT_TIME_FROM));
            let to = form.delivery_time_to.unwrap_or_else(|| time(DEFAULT_TIME_TO));
            dto.delivery_date = Some(iso_utc_midnight(date));
            dto.delivery_time_from = Some(iso_at(date, from, offset));
            dto.delivery_time_to = Some(iso_at(date, to, offset));
        }
        dto.delivery_city = Some(form.delivery_city.trim().to_string());
        dto.delivery_street = Some(form.delivery_street.trim().to_string());
        dto.delivery_house = Some(form.delivery_house.trim().to_string());
        dto.delivery_apartment = non_empty(&form.delivery_apartment);
        dto.delivery_floor = non_empty(&form.delivery_floor);
    }

    dto
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn time((hour, minute): (u32, u32)) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

fn iso_utc_midnight(date: NaiveDate) -> String {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn iso_at(date: NaiveDate, at: NaiveTime, offset: FixedOffset) -> String {
    let local = date.and_time(at);
    let utc = local - Duration::seconds(i64::from(offset.local_minus_utc()));
    Utc.from_utc_datetime(&utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_bouquet::aggregate::BouquetId;
    use crate::domain::a002_basket::aggregate::Product;
    use crate::domain::a003_order::delivery::parse_time_slot;
    use uuid::Uuid;

    fn moscow() -> FixedOffset {
        FixedOffset::east_opt(3 * 3600).unwrap()
    }

    fn items() -> Vec<BasketItem> {
        vec![BasketItem {
            product: Product {
                id: BouquetId::new(Uuid::from_u128(7)),
                name: "Пионы".into(),
                price: 5600,
                image: Some("/static/p.webp".into()),
            },
            quantity: 2,
        }]
    }

    fn form() -> OrderFormData {
        let mut form = OrderFormData {
            customer_name: "  Анна ".into(),
            customer_phone: "+7 (999) 123-45-67".into(),
            customer_email: " anna@example.ru ".into(),
            recipient_type: RecipientType::Other,
            recipient_name: " Мария ".into(),
            recipient_phone: "+7 (912) 000-11-22".into(),
            greeting_card_text: "  С днём рождения! ".into(),
            delivery_date: NaiveDate::from_ymd_opt(2024, 11, 10),
            delivery_street: " Тверская ".into(),
            delivery_house: "1".into(),
            delivery_apartment: "  ".into(),
            delivery_floor: "3".into(),
            ..OrderFormData::default()
        };
        form.select_slot(parse_time_slot("14:00-15:00"));
        form
    }

    #[test]
    fn test_build_for_delivery_to_other() {
        let dto = build_order_dto(&form(), &items(), 11200, moscow());
        assert_eq!(dto.customer_name, "Анна");
        assert_eq!(dto.customer_phone, "79991234567");
        assert_eq!(dto.customer_email, "anna@example.ru");
        assert_eq!(dto.recipient_name.as_deref(), Some("Мария"));
        assert_eq!(dto.recipient_phone.as_deref(), Some("79120001122"));
        assert_eq!(dto.greeting_card_text.as_deref(), Some("С днём рождения!"));
        assert!(!dto.is_pickup_by_customer);
        assert_eq!(dto.delivery_date.as_deref(), Some("2024-11-10T00:00:00.000Z"));
        assert_eq!(dto.delivery_time_from.as_deref(), Some("2024-11-10T11:00:00.000Z"));
        assert_eq!(dto.delivery_time_to.as_deref(), Some("2024-11-10T12:00:00.000Z"));
        assert_eq!(dto.delivery_city.as_deref(), Some("Москва"));
        assert_eq!(dto.delivery_street.as_deref(), Some("Тверская"));
        assert_eq!(dto.delivery_apartment, None);
        assert_eq!(dto.delivery_floor.as_deref(), Some("3"));
        assert_eq!(dto.items.len(), 1);
        assert_eq!(dto.items[0].title, "Пионы");
        assert_eq!(dto.items[0].quantity, 2);
        assert_eq!(dto.items[0].price, 5600);
        assert_eq!(dto.payment_amount, 11200);
    }

    #[test]
    fn test_recipient_copied_from_customer() {
        let mut f = form();
        f.recipient_type = RecipientType::Customer;
        let dto = build_order_dto(&f, &items(), 11200, moscow());
        assert_eq!(dto.recipient_name.as_deref(), Some("Анна"));
        assert_eq!(dto.recipient_phone.as_deref(), Some("79991234567"));
        assert_eq!(dto.greeting_card_text, None);
    }

    #[test]
    fn test_pickup_omits_delivery_fields() {
        let mut f = form();
        f.delivery_type = DeliveryType::Pickup;
        let dto = build_order_dto(&f, &items(), 11200, moscow());
        assert!(dto.is_pickup_by_customer);
        assert_eq!(dto.delivery_date, None);
        assert_eq!(dto.delivery_time_from, None);
        assert_eq!(dto.delivery_city, None);
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["delivery_method"], "pickup");
        assert!(json.get("delivery_city").is_none());
    }

    #[test]
    fn test_default_window_when_slot_unset() {
        let mut f = form();
        f.delivery_time_from = None;
        f.delivery_time_to = None;
        let dto = build_order_dto(&f, &items(), 11200, FixedOffset::east_opt(0).unwrap());
        assert_eq!(dto.delivery_time_from.as_deref(), Some("2024-11-10T10:00:00.000Z"));
        assert_eq!(dto.delivery_time_to.as_deref(), Some("2024-11-10T11:00:00.000Z"));
    }

    #[test]
    fn test_total_is_taken_from_caller() {
        let dto = build_order_dto(&form(), &items(), 1, moscow());
        assert_eq!(dto.payment_amount, 1);
    }

    #[test]
    fn test_deterministic_output() {
        let a = serde_json::to_string(&build_order_dto(&form(), &items(), 11200, moscow())).unwrap();
        let b = serde_json::to_string(&build_order_dto(&form(), &items(), 11200, moscow())).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_comment_omitted() {
        let mut f = form();
        f.comment = "   ".into();
        assert_eq!(build_order_dto(&f, &items(), 0, moscow()).comment, None);
        f.comment = " позвонить заранее ".into();
        assert_eq!(
            build_order_dto(&f, &items(), 0, moscow()).comment.as_deref(),
            Some("позвонить заранее")
        );
    }
}
