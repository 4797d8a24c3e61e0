pub mod state;
pub mod view_model;

use chrono::NaiveDate;
use contracts::domain::a003_order::delivery::{
    delivery_date_options, delivery_time_slots, parse_time_slot, CITIES,
};
use contracts::domain::a003_order::form::{DeliveryType, OrderFormData, RecipientType};
use contracts::domain::a003_order::phone::format_phone_mask;
use contracts::domain::a003_order::validation::FormField;
use leptos::prelude::*;

use self::state::CheckoutStage;
use self::view_model::{use_checkout, CheckoutVm};
use crate::domain::a002_basket::context::use_basket;
use crate::domain::a002_basket::ui::panel::BasketPanel;
use crate::shared::date_utils::today_local;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::number_format::format_price;

fn form_value(vm: CheckoutVm, get: fn(&OrderFormData) -> String) -> Signal<String> {
    Signal::derive(move || vm.wizard.with(|w| get(&w.form)))
}

fn form_setter(
    vm: CheckoutVm,
    field: Option<FormField>,
    set: fn(&mut OrderFormData, String),
) -> Callback<String> {
    Callback::new(move |value: String| vm.edit(field, |form| set(form, value)))
}

/// Окно оформления заказа: корзина и мастер из трёх шагов
#[component]
pub fn CheckoutModal() -> impl IntoView {
    let vm = use_checkout();

    move || {
        vm.is_open.get().then(|| {
            view! {
                <Modal
                    title="Оформление заказа".to_string()
                    on_close=Callback::new(move |_| vm.close())
                    class="modal--wide"
                >
                    <div class="checkout">
                        <BasketPanel />
                        <div class="checkout__wizard">
                            <StageTabs />
                            {move || match vm.wizard.with(|w| w.stage) {
                                CheckoutStage::Contacts => view! { <ContactsStage /> }.into_any(),
                                CheckoutStage::Delivery => view! { <DeliveryStage /> }.into_any(),
                                CheckoutStage::Payment => view! { <PaymentStage /> }.into_any(),
                            }}
                            {move || vm.wizard.with(|w| w.submit_error.clone()).map(|e| view! {
                                <div class="alert alert--error">{e}</div>
                            })}
                        </div>
                    </div>
                </Modal>
            }
        })
    }
}

/// Ссылка на оплату созданного заказа, когда вкладка оплаты не открылась
#[component]
pub fn PaymentLinkNotice() -> impl IntoView {
    let vm = use_checkout();

    move || {
        vm.payment_link.get().map(|url| {
            view! {
                <div class="alert alert--info alert--dismissible payment-notice">
                    <span>"Заказ оформлен. "</span>
                    <a href=url target="_blank" rel="noopener">"Перейти к оплате"</a>
                    <button class="button button--icon" on:click=move |_| vm.dismiss_payment_link()>
                        {icon("x")}
                    </button>
                </div>
            }
        })
    }
}

#[component]
fn StageTabs() -> impl IntoView {
    let vm = use_checkout();

    view! {
        <div class="checkout__tabs">
            {CheckoutStage::ALL
                .into_iter()
                .map(|stage| {
                    view! {
                        <button
                            class="checkout__tab"
                            class:checkout__tab--active=move || vm.wizard.with(|w| w.stage == stage)
                            on:click=move |_| vm.select_stage(stage)
                        >
                            {stage.label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn TextField(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(optional)] field: Option<FormField>,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] placeholder: Option<&'static str>,
) -> impl IntoView {
    let vm = use_checkout();
    let error = move || field.and_then(|f| vm.error(f));

    view! {
        <div class="form-group" class:form-group--error=move || error().is_some()>
            <label>{label}</label>
            <input
                type=input_type.unwrap_or("text")
                placeholder=placeholder.unwrap_or("")
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            {move || error().map(|e| view! { <span class="form-error">{e}</span> })}
        </div>
    }
}

#[component]
fn ContactsStage() -> impl IntoView {
    let vm = use_checkout();
    let is_other = move || vm.wizard.with(|w| w.form.recipient_type == RecipientType::Other);
    let set_recipient = move |recipient_type: RecipientType| {
        vm.edit(None, |f| f.recipient_type = recipient_type)
    };

    view! {
        <div class="checkout__stage">
            <TextField
                label="Ваше имя"
                field=FormField::CustomerName
                value=form_value(vm, |f| f.customer_name.clone())
                on_input=form_setter(vm, Some(FormField::CustomerName), |f, v| f.customer_name = v)
            />
            <TextField
                label="Телефон"
                field=FormField::CustomerPhone
                input_type="tel"
                placeholder="+7 (999) 999-99-99"
                value=form_value(vm, |f| f.customer_phone.clone())
                on_input=form_setter(vm, Some(FormField::CustomerPhone), |f, v| f.customer_phone = format_phone_mask(&v))
            />
            <TextField
                label="Email"
                field=FormField::CustomerEmail
                input_type="email"
                value=form_value(vm, |f| f.customer_email.clone())
                on_input=form_setter(vm, Some(FormField::CustomerEmail), |f, v| f.customer_email = v)
            />

            <div class="radio-group">
                <label>
                    <input
                        type="radio"
                        name="recipient"
                        prop:checked=move || !is_other()
                        on:change=move |_| set_recipient(RecipientType::Customer)
                    />
                    "Получу сам"
                </label>
                <label>
                    <input
                        type="radio"
                        name="recipient"
                        prop:checked=is_other
                        on:change=move |_| set_recipient(RecipientType::Other)
                    />
                    "Другой получатель"
                </label>
            </div>

            <Show when=is_other>
                <TextField
                    label="Имя получателя"
                    field=FormField::RecipientName
                    value=form_value(vm, |f| f.recipient_name.clone())
                    on_input=form_setter(vm, Some(FormField::RecipientName), |f, v| f.recipient_name = v)
                />
                <TextField
                    label="Телефон получателя"
                    field=FormField::RecipientPhone
                    input_type="tel"
                    placeholder="+7 (999) 999-99-99"
                    value=form_value(vm, |f| f.recipient_phone.clone())
                    on_input=form_setter(vm, Some(FormField::RecipientPhone), |f, v| f.recipient_phone = format_phone_mask(&v))
                />
                <TextField
                    label="Текст открытки"
                    value=form_value(vm, |f| f.greeting_card_text.clone())
                    on_input=form_setter(vm, None, |f, v| f.greeting_card_text = v)
                />
            </Show>

            <div class="checkout__nav">
                <button class="button button--primary" on:click=move |_| vm.next()>"Далее"</button>
            </div>
        </div>
    }
}

#[component]
fn DeliveryStage() -> impl IntoView {
    let vm = use_checkout();
    let is_delivery = move || vm.wizard.with(|w| w.form.delivery_type == DeliveryType::Delivery);
    let set_delivery = move |delivery_type: DeliveryType| {
        vm.edit(None, |f| f.delivery_type = delivery_type)
    };
    let date_options = delivery_date_options(today_local());
    let slots = delivery_time_slots();

    let selected_date = move || {
        vm.wizard
            .with(|w| w.form.delivery_date.map(|d| d.format("%Y-%m-%d").to_string()))
            .unwrap_or_default()
    };
    let selected_slot = move || {
        vm.wizard
            .with(|w| w.form.selected_slot().map(|s| s.value()))
            .unwrap_or_default()
    };
    let error = move |field: FormField| vm.error(field).map(|e| view! { <span class="form-error">{e}</span> });

    view! {
        <div class="checkout__stage">
            <div class="radio-group">
                <label>
                    <input
                        type="radio"
                        name="delivery"
                        prop:checked=is_delivery
                        on:change=move |_| set_delivery(DeliveryType::Delivery)
                    />
                    "Доставка курьером"
                </label>
                <label>
                    <input
                        type="radio"
                        name="delivery"
                        prop:checked=move || !is_delivery()
                        on:change=move |_| set_delivery(DeliveryType::Pickup)
                    />
                    "Самовывоз"
                </label>
            </div>

            <Show when=is_delivery>
                <div class="form-group">
                    <label>"Дата доставки"</label>
                    <select
                        prop:value=selected_date
                        on:change=move |ev| {
                            let date = NaiveDate::parse_from_str(&event_target_value(&ev), "%Y-%m-%d").ok();
                            vm.edit(Some(FormField::DeliveryDate), |f| f.delivery_date = date);
                        }
                    >
                        <option value="">"Выберите дату"</option>
                        {date_options
                            .iter()
                            .map(|o| view! { <option value=o.value()>{o.label.clone()}</option> })
                            .collect_view()}
                    </select>
                    {move || error(FormField::DeliveryDate)}
                </div>

                <div class="form-group">
                    <label>"Время доставки"</label>
                    <select
                        prop:value=selected_slot
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            if !value.is_empty() {
                                vm.select_slot(parse_time_slot(&value));
                            }
                        }
                    >
                        <option value="">"Выберите время"</option>
                        {slots
                            .iter()
                            .map(|s| view! { <option value=s.value()>{s.label()}</option> })
                            .collect_view()}
                    </select>
                    {move || error(FormField::DeliveryTimeFrom)}
                </div>

                <div class="form-group">
                    <label>"Город"</label>
                    <select
                        prop:value=move || vm.wizard.with(|w| w.form.delivery_city.clone())
                        on:change=move |ev| {
                            let city = event_target_value(&ev);
                            vm.edit(Some(FormField::DeliveryCity), |f| f.delivery_city = city);
                        }
                    >
                        {CITIES
                            .iter()
                            .map(|city| view! { <option value=*city>{*city}</option> })
                            .collect_view()}
                    </select>
                    {move || error(FormField::DeliveryCity)}
                </div>

                <TextField
                    label="Улица"
                    field=FormField::DeliveryStreet
                    value=form_value(vm, |f| f.delivery_street.clone())
                    on_input=form_setter(vm, Some(FormField::DeliveryStreet), |f, v| f.delivery_street = v)
                />
                <TextField
                    label="Дом"
                    field=FormField::DeliveryHouse
                    value=form_value(vm, |f| f.delivery_house.clone())
                    on_input=form_setter(vm, Some(FormField::DeliveryHouse), |f, v| f.delivery_house = v)
                />
                <TextField
                    label="Квартира"
                    value=form_value(vm, |f| f.delivery_apartment.clone())
                    on_input=form_setter(vm, None, |f, v| f.delivery_apartment = v)
                />
                <TextField
                    label="Этаж"
                    value=form_value(vm, |f| f.delivery_floor.clone())
                    on_input=form_setter(vm, None, |f, v| f.delivery_floor = v)
                />
            </Show>

            <TextField
                label="Комментарий к заказу"
                value=form_value(vm, |f| f.comment.clone())
                on_input=form_setter(vm, None, |f, v| f.comment = v)
            />

            <div class="checkout__nav">
                <button class="button button--secondary" on:click=move |_| vm.select_stage(CheckoutStage::Contacts)>
                    "Назад"
                </button>
                <button class="button button--primary" on:click=move |_| vm.next()>"Далее"</button>
            </div>
        </div>
    }
}

#[component]
fn PaymentStage() -> impl IntoView {
    let vm = use_checkout();
    let basket = use_basket();
    let submitting = move || vm.wizard.with(|w| w.submitting);

    view! {
        <div class="checkout__stage">
            <div class="checkout__summary">
                <div>
                    <span>"Товаров: "</span>
                    <strong>{move || basket.total_items()}</strong>
                </div>
                <div>
                    <span>"К оплате: "</span>
                    <strong>{move || format_price(basket.total_price())}</strong>
                </div>
            </div>

            <div class="checkout__nav">
                <button class="button button--secondary" on:click=move |_| vm.select_stage(CheckoutStage::Delivery)>
                    "Назад"
                </button>
                <button
                    class="button button--primary"
                    disabled=submitting
                    on:click=move |_| vm.submit(basket)
                >
                    {move || if submitting() { "Оформляем..." } else { "Оплатить" }}
                </button>
            </div>
        </div>
    }
}
