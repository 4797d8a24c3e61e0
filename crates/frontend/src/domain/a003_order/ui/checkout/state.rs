//! Мастер оформления заказа: Контакты → Доставка → Оплата.
//!
//! Plain data with no reactive or browser dependencies; the view model keeps it
//! in a signal and drives it from UI events.

use chrono::FixedOffset;
use contracts::domain::a002_basket::aggregate::BasketItem;
use contracts::domain::a003_order::aggregate::CreateOrderDto;
use contracts::domain::a003_order::delivery::DeliverySlot;
use contracts::domain::a003_order::draft::build_order_dto;
use contracts::domain::a003_order::form::OrderFormData;
use contracts::domain::a003_order::validation::{
    validate_contacts, validate_delivery, validate_order_form, FieldErrors, FormField,
};

pub const BASKET_EMPTY_MESSAGE: &str = "Корзина пуста";
pub const ORDER_FAILED_MESSAGE: &str = "Не удалось оформить заказ. Попробуйте ещё раз";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckoutStage {
    #[default]
    Contacts,
    Delivery,
    Payment,
}

impl CheckoutStage {
    pub const ALL: [CheckoutStage; 3] = [
        CheckoutStage::Contacts,
        CheckoutStage::Delivery,
        CheckoutStage::Payment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CheckoutStage::Contacts => "Контакты",
            CheckoutStage::Delivery => "Доставка",
            CheckoutStage::Payment => "Оплата",
        }
    }

    pub fn next(&self) -> Option<CheckoutStage> {
        match self {
            CheckoutStage::Contacts => Some(CheckoutStage::Delivery),
            CheckoutStage::Delivery => Some(CheckoutStage::Payment),
            CheckoutStage::Payment => None,
        }
    }
}

/// Why `begin_submit` did not produce a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRefusal {
    BasketEmpty,
    /// Validation failed; the wizard moved to this stage
    Invalid(CheckoutStage),
    InFlight,
}

/// Заказ создан на сервере
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub payment_url: String,
    /// The form that sent the order is still the open one
    pub current: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CheckoutWizard {
    pub form: OrderFormData,
    pub stage: CheckoutStage,
    pub errors: FieldErrors,
    pub submit_error: Option<String>,
    pub submitting: bool,
    session: u64,
}

impl CheckoutWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifies the current open/close cycle of the checkout
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Empty form, first stage, new session
    pub fn reset(&mut self) {
        let session = self.session.wrapping_add(1);
        *self = Self {
            session,
            ..Self::default()
        };
    }

    fn stage_errors(&self, stage: CheckoutStage) -> FieldErrors {
        match stage {
            CheckoutStage::Contacts => validate_contacts(&self.form),
            CheckoutStage::Delivery => validate_delivery(&self.form),
            CheckoutStage::Payment => FieldErrors::new(),
        }
    }

    /// Validate the current stage and advance. Returns false when refused.
    pub fn next(&mut self) -> bool {
        let errors = self.stage_errors(self.stage);
        if !errors.is_empty() {
            self.errors = errors;
            return false;
        }
        self.errors.clear();
        if let Some(next) = self.stage.next() {
            self.stage = next;
        }
        true
    }

    /// Tab click. Earlier stages open directly; later ones pass every gate on the way.
    pub fn select_stage(&mut self, target: CheckoutStage) -> bool {
        if target <= self.stage {
            self.stage = target;
            self.errors.clear();
            return true;
        }
        while self.stage < target {
            if !self.next() {
                return false;
            }
        }
        true
    }

    pub fn select_slot(&mut self, slot: DeliverySlot) {
        self.form.select_slot(slot);
        self.errors.remove(&FormField::DeliveryTimeFrom);
    }

    pub fn clear_error(&mut self, field: FormField) {
        self.errors.remove(&field);
    }

    /// Validate everything and build the request. On success the wizard is
    /// marked as submitting until `submit_succeeded` / `submit_failed`.
    pub fn begin_submit(
        &mut self,
        items: &[BasketItem],
        total: u64,
        offset: FixedOffset,
    ) -> Result<CreateOrderDto, SubmitRefusal> {
        if self.submitting {
            return Err(SubmitRefusal::InFlight);
        }
        self.submit_error = None;

        if items.is_empty() {
            self.stage = CheckoutStage::Contacts;
            self.submit_error = Some(BASKET_EMPTY_MESSAGE.to_string());
            return Err(SubmitRefusal::BasketEmpty);
        }

        let errors = validate_order_form(&self.form);
        if !errors.is_empty() {
            let stage = if errors.keys().any(|f| f.is_contact_field()) {
                CheckoutStage::Contacts
            } else {
                CheckoutStage::Delivery
            };
            self.stage = stage;
            self.errors = errors;
            return Err(SubmitRefusal::Invalid(stage));
        }

        self.errors.clear();
        self.submitting = true;
        Ok(build_order_dto(&self.form, items, total, offset))
    }

    /// The order exists either way. The form is reset only when the
    /// completion belongs to the current session; an older one leaves the
    /// reopened form alone.
    pub fn submit_succeeded(&mut self, session: u64, payment_url: String) -> PlacedOrder {
        let current = session == self.session;
        if current {
            self.reset();
        }
        PlacedOrder {
            payment_url,
            current,
        }
    }

    /// Form and stage stay as they are so the customer can retry
    pub fn submit_failed(&mut self, session: u64, message: Option<String>) -> bool {
        if session != self.session {
            return false;
        }
        self.submitting = false;
        self.stage = CheckoutStage::Payment;
        self.submit_error = Some(message.unwrap_or_else(|| ORDER_FAILED_MESSAGE.to_string()));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Offset, Utc};
    use contracts::domain::a001_bouquet::aggregate::BouquetId;
    use contracts::domain::a002_basket::aggregate::Product;
    use contracts::domain::a003_order::form::{DeliveryType, RecipientType};
    use uuid::Uuid;

    const PAYMENT_URL: &str = "https://pay.example.ru/session/42";

    fn utc() -> FixedOffset {
        Utc.fix()
    }

    fn basket() -> Vec<BasketItem> {
        vec![BasketItem {
            product: Product {
                id: BouquetId::new(Uuid::from_u128(7)),
                name: "Пионы".to_string(),
                price: 5600,
                image: None,
            },
            quantity: 2,
        }]
    }

    fn contacts(wizard: &mut CheckoutWizard, phone: &str) {
        wizard.form.customer_name = "Анна".to_string();
        wizard.form.customer_phone = phone.to_string();
        wizard.form.customer_email = "anna@example.com".to_string();
        wizard.form.recipient_type = RecipientType::Customer;
    }

    fn filled() -> CheckoutWizard {
        let mut wizard = CheckoutWizard::new();
        contacts(&mut wizard, "+7 (999) 123-45-67");
        wizard.form.delivery_date = NaiveDate::from_ymd_opt(2024, 11, 10);
        wizard.select_slot(DeliverySlot {
            from: NaiveTime::from_hms_opt(14, 0, 0).unwrap_or_default(),
            to: NaiveTime::from_hms_opt(15, 0, 0).unwrap_or_default(),
        });
        wizard.form.delivery_street = "Тверская".to_string();
        wizard.form.delivery_house = "1".to_string();
        wizard
    }

    #[test]
    fn test_contacts_gate_on_phone_digits() {
        let mut wizard = CheckoutWizard::new();
        contacts(&mut wizard, "+7 999 123 45 6");
        assert!(!wizard.next());
        assert_eq!(wizard.stage, CheckoutStage::Contacts);
        assert!(wizard.errors.contains_key(&FormField::CustomerPhone));

        wizard.form.customer_phone = "+7 999 123 45 67".to_string();
        assert!(wizard.next());
        assert_eq!(wizard.stage, CheckoutStage::Delivery);
        assert!(wizard.errors.is_empty());
    }

    #[test]
    fn test_other_recipient_requires_recipient_fields() {
        let mut wizard = CheckoutWizard::new();
        contacts(&mut wizard, "79991234567");
        wizard.form.recipient_type = RecipientType::Other;
        assert!(!wizard.next());
        assert!(wizard.errors.contains_key(&FormField::RecipientName));
        assert!(wizard.errors.contains_key(&FormField::RecipientPhone));
    }

    #[test]
    fn test_pickup_skips_delivery_fields() {
        let mut wizard = CheckoutWizard::new();
        contacts(&mut wizard, "79991234567");
        assert!(wizard.next());
        assert!(!wizard.next());
        wizard.form.delivery_type = DeliveryType::Pickup;
        assert!(wizard.next());
        assert_eq!(wizard.stage, CheckoutStage::Payment);
    }

    #[test]
    fn test_select_stage() {
        let mut wizard = filled();
        assert!(wizard.select_stage(CheckoutStage::Payment));
        assert_eq!(wizard.stage, CheckoutStage::Payment);
        // backward jumps never validate
        wizard.form.customer_name.clear();
        assert!(wizard.select_stage(CheckoutStage::Delivery));
        assert_eq!(wizard.stage, CheckoutStage::Delivery);
        assert!(wizard.select_stage(CheckoutStage::Contacts));

        // forward jump stops at the first failing gate
        assert!(!wizard.select_stage(CheckoutStage::Payment));
        assert_eq!(wizard.stage, CheckoutStage::Contacts);
    }

    #[test]
    fn test_empty_basket_submit_refused() {
        let mut wizard = filled();
        wizard.select_stage(CheckoutStage::Payment);
        let result = wizard.begin_submit(&[], 0, utc());
        assert_eq!(result, Err(SubmitRefusal::BasketEmpty));
        assert_eq!(wizard.stage, CheckoutStage::Contacts);
        assert_eq!(wizard.submit_error.as_deref(), Some(BASKET_EMPTY_MESSAGE));
        assert!(!wizard.submitting);
    }

    #[test]
    fn test_invalid_submit_routes_to_first_invalid_stage() {
        let mut wizard = filled();
        wizard.select_stage(CheckoutStage::Payment);
        wizard.form.delivery_house.clear();
        assert_eq!(
            wizard.begin_submit(&basket(), 11200, utc()),
            Err(SubmitRefusal::Invalid(CheckoutStage::Delivery))
        );
        assert_eq!(wizard.stage, CheckoutStage::Delivery);

        wizard.form.customer_email = "anna".to_string();
        assert_eq!(
            wizard.begin_submit(&basket(), 11200, utc()),
            Err(SubmitRefusal::Invalid(CheckoutStage::Contacts))
        );
        assert!(wizard.errors.contains_key(&FormField::CustomerEmail));
        assert!(wizard.errors.contains_key(&FormField::DeliveryHouse));
    }

    #[test]
    fn test_submit_builds_request_once() {
        let mut wizard = filled();
        let dto = wizard.begin_submit(&basket(), 11200, utc());
        let dto = match dto {
            Ok(dto) => dto,
            Err(e) => panic!("submit refused: {:?}", e),
        };
        assert_eq!(dto.payment_amount, 11200);
        assert_eq!(dto.customer_phone, "79991234567");
        assert_eq!(dto.items.len(), 1);
        assert!(wizard.submitting);

        assert_eq!(
            wizard.begin_submit(&basket(), 11200, utc()),
            Err(SubmitRefusal::InFlight)
        );
    }

    #[test]
    fn test_failure_keeps_form_on_payment() {
        let mut wizard = filled();
        let session = wizard.session();
        assert!(wizard.begin_submit(&basket(), 11200, utc()).is_ok());
        assert!(wizard.submit_failed(session, None));
        assert_eq!(wizard.stage, CheckoutStage::Payment);
        assert_eq!(wizard.submit_error.as_deref(), Some(ORDER_FAILED_MESSAGE));
        assert_eq!(wizard.form.customer_name, "Анна");
        assert!(!wizard.submitting);

        // retry is allowed
        assert!(wizard.begin_submit(&basket(), 11200, utc()).is_ok());
        assert!(wizard.submit_failed(session, Some("Товар закончился".to_string())));
        assert_eq!(wizard.submit_error.as_deref(), Some("Товар закончился"));
    }

    #[test]
    fn test_success_resets() {
        let mut wizard = filled();
        let session = wizard.session();
        assert!(wizard.begin_submit(&basket(), 11200, utc()).is_ok());
        let placed = wizard.submit_succeeded(session, PAYMENT_URL.to_string());
        assert!(placed.current);
        assert_eq!(placed.payment_url, PAYMENT_URL);
        assert_eq!(wizard.stage, CheckoutStage::Contacts);
        assert!(wizard.form.customer_name.is_empty());
        assert!(!wizard.submitting);
        assert_ne!(wizard.session(), session);
    }

    #[test]
    fn test_stale_completion_ignored() {
        let mut wizard = filled();
        let session = wizard.session();
        assert!(wizard.begin_submit(&basket(), 11200, utc()).is_ok());
        // modal closed while the request was in flight
        wizard.reset();
        contacts(&mut wizard, "79990000000");

        assert!(!wizard.submit_failed(session, None));
        assert!(wizard.submit_error.is_none());

        // the order was still created: the payment link survives, the new form is kept
        let placed = wizard.submit_succeeded(session, PAYMENT_URL.to_string());
        assert!(!placed.current);
        assert_eq!(placed.payment_url, PAYMENT_URL);
        assert_eq!(wizard.form.customer_phone, "79990000000");
    }
}
