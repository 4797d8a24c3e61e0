//! Правила валидации формы заказа по шагам мастера

use std::collections::BTreeMap;

use super::form::{DeliveryType, OrderFormData, RecipientType};
use super::phone::is_valid_phone;

/// Поле формы, к которому относится ошибка
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    CustomerName,
    CustomerPhone,
    CustomerEmail,
    RecipientName,
    RecipientPhone,
    DeliveryDate,
    DeliveryTimeFrom,
    DeliveryCity,
    DeliveryStreet,
    DeliveryHouse,
}

impl FormField {
    /// Fields that belong to the contacts stage
    pub fn is_contact_field(&self) -> bool {
        matches!(
            self,
            FormField::CustomerName
                | FormField::CustomerPhone
                | FormField::CustomerEmail
                | FormField::RecipientName
                | FormField::RecipientPhone
        )
    }
}

pub type FieldErrors = BTreeMap<FormField, &'static str>;

/// Minimal shape check: `local@domain.tld`, no whitespace
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !host.starts_with('.') && tld.len() >= 2,
        None => false,
    }
}

/// Шаг «Контакты»
pub fn validate_contacts(form: &OrderFormData) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if form.customer_name.trim().is_empty() {
        errors.insert(FormField::CustomerName, "Имя заказчика обязательно");
    }

    if form.customer_phone.trim().is_empty() {
        errors.insert(FormField::CustomerPhone, "Телефон заказчика обязателен");
    } else if !is_valid_phone(&form.customer_phone) {
        errors.insert(FormField::CustomerPhone, "Введите корректный номер телефона");
    }

    if form.customer_email.trim().is_empty() {
        errors.insert(FormField::CustomerEmail, "Email заказчика обязателен");
    } else if !is_valid_email(&form.customer_email) {
        errors.insert(FormField::CustomerEmail, "Введите корректный email");
    }

    if form.recipient_type == RecipientType::Other {
        if form.recipient_name.trim().is_empty() {
            errors.insert(FormField::RecipientName, "Имя получателя обязательно");
        }
        if !is_valid_phone(&form.recipient_phone) {
            errors.insert(
                FormField::RecipientPhone,
                "Введите корректный номер телефона получателя",
            );
        }
    }

    errors
}

/// Шаг «Получение»
pub fn validate_delivery(form: &OrderFormData) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if form.delivery_type == DeliveryType::Pickup {
        return errors;
    }

    if form.delivery_date.is_none() {
        errors.insert(FormField::DeliveryDate, "Выберите дату доставки");
    }
    if form.delivery_time_from.is_none() {
        errors.insert(FormField::DeliveryTimeFrom, "Выберите время доставки");
    }
    if form.delivery_city.trim().is_empty() {
        errors.insert(FormField::DeliveryCity, "Город обязателен");
    }
    if form.delivery_street.trim().is_empty() {
        errors.insert(FormField::DeliveryStreet, "Улица обязательна");
    }
    if form.delivery_house.trim().is_empty() {
        errors.insert(FormField::DeliveryHouse, "Дом обязателен");
    }

    errors
}

/// Вся форма целиком, как перед отправкой
pub fn validate_order_form(form: &OrderFormData) -> FieldErrors {
    let mut errors = validate_contacts(form);
    errors.extend(validate_delivery(form));
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_order::delivery::delivery_time_slots;
    use chrono::NaiveDate;

    fn valid_contacts() -> OrderFormData {
        OrderFormData {
            customer_name: "Анна".into(),
            customer_phone: "+7 (999) 123-45-67".into(),
            customer_email: "anna@example.ru".into(),
            recipient_type: RecipientType::Customer,
            ..OrderFormData::default()
        }
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("anna@example.ru"));
        assert!(is_valid_email(" a.b+c@mail.example.com "));
        assert!(!is_valid_email("anna@example"));
        assert!(!is_valid_email("@example.ru"));
        assert!(!is_valid_email("anna@@example.ru"));
        assert!(!is_valid_email("an na@example.ru"));
        assert!(!is_valid_email("anna@.ru"));
    }

    #[test]
    fn test_contacts_valid() {
        assert!(validate_contacts(&valid_contacts()).is_empty());
    }

    #[test]
    fn test_phone_digit_boundary() {
        let mut form = valid_contacts();
        form.customer_phone = "7999123456".into();
        assert_eq!(
            validate_contacts(&form).get(&FormField::CustomerPhone),
            Some(&"Введите корректный номер телефона")
        );
        form.customer_phone = "79991234567".into();
        assert!(validate_contacts(&form).is_empty());
    }

    #[test]
    fn test_recipient_required_only_for_other() {
        let mut form = valid_contacts();
        form.recipient_type = RecipientType::Other;
        let errors = validate_contacts(&form);
        assert!(errors.contains_key(&FormField::RecipientName));
        assert!(errors.contains_key(&FormField::RecipientPhone));

        form.recipient_name = "Мария".into();
        form.recipient_phone = "+7 (912) 000-11-22".into();
        assert!(validate_contacts(&form).is_empty());
    }

    #[test]
    fn test_delivery_fields_required_for_delivery() {
        let mut form = valid_contacts();
        form.delivery_city.clear();
        let errors = validate_delivery(&form);
        assert_eq!(errors.len(), 5);

        form.delivery_date = NaiveDate::from_ymd_opt(2024, 11, 10);
        form.select_slot(delivery_time_slots()[0]);
        form.delivery_city = "Москва".into();
        form.delivery_street = "Тверская".into();
        form.delivery_house = "1".into();
        assert!(validate_delivery(&form).is_empty());
    }

    #[test]
    fn test_pickup_requires_nothing() {
        let mut form = valid_contacts();
        form.delivery_type = DeliveryType::Pickup;
        form.delivery_city.clear();
        assert!(validate_delivery(&form).is_empty());
        assert!(validate_order_form(&form).is_empty());
    }
}
