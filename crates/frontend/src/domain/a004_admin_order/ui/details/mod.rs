use contracts::domain::a004_admin_order::aggregate::{AdminOrder, OrderStatus};
use futures::future::{FutureExt, LocalBoxFuture};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a004_admin_order::api::{archive_order, delete_order, update_status};
use crate::shared::api_utils::ApiError;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::modal::{report_changed, Modal};
use crate::shared::number_format::format_price;
use crate::system::auth::context::use_auth;

/// Карточка заказа: смена статуса, архивирование, удаление
#[component]
pub fn OrderDetails(
    order: AdminOrder,
    on_close: Callback<()>,
    /// Called after a successful change; the board refetches
    on_changed: Callback<()>,
) -> impl IntoView {
    let session = use_auth();
    let (busy, set_busy) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let id = order.id;
    let current_status = order.status();

    // Run one admin action and report back
    let run_action = move |action: &'static str, fallback: &'static str, task: LocalBoxFuture<'static, Result<(), ApiError>>| {
        if busy.get_untracked() {
            return;
        }
        set_busy.set(true);
        set_error.set(None);
        spawn_local(async move {
            match task.await {
                Ok(()) => {
                    log::info!("order {}: {} done", id, action);
                    if !report_changed(on_changed) {
                        log::debug!("order {}: details closed before {} finished", id, action);
                    }
                }
                Err(e) => {
                    log::error!("order {}: {} failed: {}", id, action, e);
                    set_error.try_set(Some(e.user_message(fallback)));
                }
            }
            set_busy.try_set(false);
        });
    };

    let change_status = move |value: String| {
        let Ok(status) = value.parse::<OrderStatus>() else {
            return;
        };
        if Some(status) == current_status {
            return;
        }
        run_action(
            "status",
            "Не удалось изменить статус заказа",
            async move { update_status(session, id, status).await.map(|_| ()) }.boxed_local(),
        );
    };

    let archive = move |_| {
        run_action(
            "archive",
            "Не удалось архивировать заказ",
            archive_order(session, id).boxed_local(),
        );
    };

    let delete = move |_| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message("Удалить заказ?").ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        run_action(
            "delete",
            "Не удалось удалить заказ",
            delete_order(session, id).boxed_local(),
        );
    };

    let title = format!("Заказ #{}", id.short());

    view! {
        <Modal title=title on_close=on_close>
            <div class="order-details">
                <dl class="order-details__fields">
                    <dt>"Статус"</dt>
                    <dd>
                        <select
                            prop:value=order.status.clone()
                            disabled=move || busy.get()
                            on:change=move |ev| change_status(event_target_value(&ev))
                        >
                            {OrderStatus::ALL
                                .into_iter()
                                .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                .collect_view()}
                        </select>
                    </dd>
                    <dt>"Сумма"</dt>
                    <dd>{format_price(order.total_amount)}</dd>
                    <dt>"Email"</dt>
                    <dd>{order.customer_email.clone()}</dd>
                    <dt>"Телефон"</dt>
                    <dd>{order.customer_phone.clone()}</dd>
                    <dt>"Получатель"</dt>
                    <dd>{order.recipient_name.clone()}</dd>
                    <dt>"Телефон получателя"</dt>
                    <dd>{order.recipient_phone.clone().unwrap_or_else(|| "-".to_string())}</dd>
                    <dt>"Адрес доставки"</dt>
                    <dd>{order.delivery_address().unwrap_or_else(|| "Самовывоз".to_string())}</dd>
                    <dt>"Активен"</dt>
                    <dd>{if order.is_active { "Да" } else { "Нет" }}</dd>
                    <dt>"Создан"</dt>
                    <dd>{format_datetime(&order.created_at)}</dd>
                </dl>

                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <div class="order-details__actions">
                    <button class="button button--secondary" disabled=move || busy.get() on:click=archive>
                        {icon("archive")}
                        " В архив"
                    </button>
                    <button class="button button--danger" disabled=move || busy.get() on:click=delete>
                        {icon("trash")}
                        " Удалить"
                    </button>
                </div>
            </div>
        </Modal>
    }
}
