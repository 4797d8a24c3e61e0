//! ViewModel for the checkout modal

use contracts::domain::a003_order::delivery::DeliverySlot;
use contracts::domain::a003_order::form::OrderFormData;
use contracts::domain::a003_order::validation::FormField;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::state::{CheckoutStage, CheckoutWizard, PlacedOrder};
use crate::domain::a002_basket::context::BasketContext;
use crate::domain::a003_order::api::create_order;
use crate::shared::api_utils::ApiError;
use crate::shared::date_utils::local_offset;

#[derive(Clone, Copy)]
pub struct CheckoutVm {
    pub wizard: RwSignal<CheckoutWizard>,
    pub is_open: RwSignal<bool>,
    /// Оплата созданного заказа, если страницу оплаты не удалось открыть сразу
    pub payment_link: RwSignal<Option<String>>,
}

/// The server has the order whatever happened to the form meanwhile, so the
/// basket is always cleared. Only the form reset is tied to the session that
/// sent the request.
fn complete_order(
    wizard: &mut CheckoutWizard,
    session: u64,
    payment_url: String,
    clear_basket: impl FnOnce(),
) -> PlacedOrder {
    clear_basket();
    wizard.submit_succeeded(session, payment_url)
}

impl CheckoutVm {
    pub fn new() -> Self {
        Self {
            wizard: RwSignal::new(CheckoutWizard::new()),
            is_open: RwSignal::new(false),
            payment_link: RwSignal::new(None),
        }
    }

    pub fn dismiss_payment_link(&self) {
        self.payment_link.set(None);
    }

    /// Every opening starts with an empty form
    pub fn open(&self) {
        self.wizard.update(|w| w.reset());
        self.is_open.set(true);
    }

    /// Closing drops the form; an order still in flight is no longer shown
    pub fn close(&self) {
        self.wizard.update(|w| w.reset());
        self.is_open.set(false);
    }

    pub fn edit(&self, field: Option<FormField>, f: impl FnOnce(&mut OrderFormData)) {
        self.wizard.update(|w| {
            f(&mut w.form);
            if let Some(field) = field {
                w.clear_error(field);
            }
        });
    }

    pub fn error(&self, field: FormField) -> Option<&'static str> {
        self.wizard.with(|w| w.errors.get(&field).copied())
    }

    pub fn next(&self) {
        self.wizard.update(|w| {
            w.next();
        });
    }

    pub fn select_stage(&self, stage: CheckoutStage) {
        self.wizard.update(|w| {
            w.select_stage(stage);
        });
    }

    pub fn select_slot(&self, slot: DeliverySlot) {
        self.wizard.update(|w| w.select_slot(slot));
    }

    /// Send the order; on success clear the basket and open the payment page.
    /// A success after the modal was closed only leaves the payment link.
    pub fn submit(&self, basket: BasketContext) {
        let snapshot = basket.snapshot();
        let offset = local_offset();
        let mut started = None;
        self.wizard.update(|w| {
            let session = w.session();
            match w.begin_submit(&snapshot.items, snapshot.total_price(), offset) {
                Ok(dto) => started = Some((session, dto)),
                Err(refusal) => log::debug!("checkout: submit refused: {:?}", refusal),
            }
        });
        let Some((session, dto)) = started else {
            return;
        };

        let wizard = self.wizard;
        let is_open = self.is_open;
        let payment_link = self.payment_link;
        spawn_local(async move {
            match create_order(&dto).await {
                Ok(response) => {
                    let url = response.payment_url;
                    let placed = wizard
                        .try_update(|w| complete_order(w, session, url.clone(), || basket.clear()))
                        .unwrap_or_else(|| {
                            basket.clear();
                            PlacedOrder {
                                payment_url: url,
                                current: false,
                            }
                        });
                    if placed.current {
                        is_open.try_set(false);
                        if open_payment_page(&placed.payment_url) {
                            return;
                        }
                    } else {
                        log::info!("checkout: order created after the form was closed");
                    }
                    payment_link.try_set(Some(placed.payment_url));
                }
                Err(e) => {
                    log::error!("checkout: order failed: {}", e);
                    let message = match e {
                        ApiError::Server {
                            message: Some(message),
                            ..
                        } => Some(message),
                        _ => None,
                    };
                    let current = wizard
                        .try_update(|w| w.submit_failed(session, message))
                        .unwrap_or(false);
                    if !current {
                        log::info!("checkout: order failed after the form was closed");
                    }
                }
            }
        });
    }
}

impl Default for CheckoutVm {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_checkout() -> CheckoutVm {
    use_context::<CheckoutVm>().expect("CheckoutVm not found in component tree")
}

/// False when the browser refused the new tab (popup blocker, no window)
fn open_payment_page(url: &str) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    match window.open_with_url_and_target(url, "_blank") {
        Ok(Some(_)) => true,
        Ok(None) => {
            log::warn!("Payment page blocked by the browser");
            false
        }
        Err(e) => {
            log::error!("Failed to open payment page: {:?}", e);
            false
        }
    }
}
