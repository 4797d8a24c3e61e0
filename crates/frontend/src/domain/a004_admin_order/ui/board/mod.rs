pub mod state;

use contracts::domain::a004_admin_order::aggregate::{
    AdminOrder, AdminOrderListParams, OrderStatus,
};
use contracts::domain::common::AggregateId;
use gloo_timers::future::TimeoutFuture;
use leptos::ev::DragEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::state::{DropOutcome, KanbanBoardState};
use super::details::OrderDetails;
use crate::domain::a004_admin_order::api::{fetch_orders, update_status};
use crate::shared::config::config;
use crate::shared::date_utils::{format_datetime, now_ms};
use crate::shared::icons::icon;
use crate::shared::number_format::format_price;
use crate::system::auth::context::use_auth;

/// Канбан-доска заказов
#[component]
pub fn OrderBoard() -> impl IntoView {
    let session = use_auth();
    let board = RwSignal::new(KanbanBoardState::new(config().board.click_threshold_ms));
    let (loading, set_loading) = signal(false);
    let (load_error, set_load_error) = signal::<Option<String>>(None);
    let selected = RwSignal::new(None::<AdminOrder>);

    let fetch = move || {
        set_loading.set(true);
        let generation = board.with_untracked(|b| b.generation());
        spawn_local(async move {
            let params = AdminOrderListParams {
                limit: config().board.page_limit,
                offset: 0,
            };
            match fetch_orders(session, params).await {
                Ok(orders) => {
                    let _ = board.try_update(|b| b.apply_fetched(generation, orders));
                    set_load_error.try_set(None);
                }
                Err(e) => {
                    log::error!("Failed to fetch orders: {}", e);
                    set_load_error.try_set(Some(e.user_message("Не удалось загрузить заказы")));
                }
            }
            set_loading.try_set(false);
        });
    };

    let on_drop = move |target: OrderStatus| {
        let outcome = board
            .try_update(|b| b.drop_on(target, now_ms()))
            .unwrap_or(DropOutcome::Ignored);
        match outcome {
            DropOutcome::Click(order) => open_later(selected, order),
            DropOutcome::Move { order_id, target } => {
                log::debug!("board: order {} -> {}", order_id, target.as_str());
                spawn_local(async move {
                    match update_status(session, order_id, target).await {
                        Ok(_) => {
                            board.try_update(|b| b.settle_success());
                            fetch();
                        }
                        Err(e) => {
                            log::error!("Failed to update status of order {}: {}", order_id, e);
                            let message = e.user_message("Не удалось изменить статус заказа");
                            board.try_update(|b| b.settle_failure(message));
                        }
                    }
                });
            }
            DropOutcome::Unchanged | DropOutcome::Ignored => {}
        }
    };

    let open_details = move |order: AdminOrder| open_later(selected, order);

    fetch();

    view! {
        <div class="page orders-board">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Заказы"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| fetch()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Загрузка..." } else { " Обновить" }}
                    </Button>
                </div>
            </div>

            {move || load_error.get().map(|err| view! {
                <div class="alert alert--error">{err}</div>
            })}

            {move || board.with(|b| b.error.clone()).map(|err| view! {
                <div class="alert alert--error alert--dismissible">
                    <span>{err}</span>
                    <button class="button button--icon" on:click=move |_| board.update(|b| b.dismiss_error())>
                        {icon("x")}
                    </button>
                </div>
            })}

            <div class="kanban">
                {OrderStatus::ALL
                    .into_iter()
                    .map(|status| view! {
                        <BoardColumn
                            status=status
                            board=board
                            on_drop=Callback::new(on_drop)
                            on_open=Callback::new(open_details)
                        />
                    })
                    .collect_view()}
            </div>

            {move || selected.get().map(|order| view! {
                <OrderDetails
                    order=order
                    on_close=Callback::new(move |_| selected.set(None))
                    on_changed=Callback::new(move |_| {
                        selected.set(None);
                        fetch();
                    })
                />
            })}
        </div>
    }
}

/// Defer the detail modal to the next tick: the drag gesture that produced the
/// click is still being dispatched.
fn open_later(selected: RwSignal<Option<AdminOrder>>, order: AdminOrder) {
    wasm_bindgen_futures::spawn_local(async move {
        TimeoutFuture::new(0).await;
        selected.try_set(Some(order));
    });
}

#[component]
fn BoardColumn(
    status: OrderStatus,
    board: RwSignal<KanbanBoardState>,
    on_drop: Callback<OrderStatus>,
    on_open: Callback<AdminOrder>,
) -> impl IntoView {
    let orders = move || board.with(|b| b.column(status).to_vec());

    view! {
        <div
            class="kanban__column"
            on:dragover=move |ev: DragEvent| ev.prevent_default()
            on:drop=move |ev: DragEvent| {
                ev.prevent_default();
                on_drop.run(status);
            }
        >
            <div class="kanban__column-header">
                <span class="kanban__column-title">{status.label()}</span>
                <span class="kanban__column-count">{move || board.with(|b| b.column(status).len())}</span>
            </div>
            <div class="kanban__column-body">
                <For
                    each=orders
                    key=|order| (order.id, order.status.clone())
                    children=move |order| view! { <OrderCard order=order board=board on_open=on_open /> }
                />
            </div>
        </div>
    }
}

#[component]
fn OrderCard(
    order: AdminOrder,
    board: RwSignal<KanbanBoardState>,
    on_open: Callback<AdminOrder>,
) -> impl IntoView {
    let id = order.id;
    let short_id = id.short();
    let address = order.delivery_address();

    let on_drag_start = move |ev: DragEvent| {
        if let Some(transfer) = ev.data_transfer() {
            let _ = transfer.set_data("text/plain", &id.as_string());
        }
        let started = board
            .try_update(|b| b.drag_start(id, now_ms()))
            .unwrap_or(false);
        if !started {
            ev.prevent_default();
        }
    };

    view! {
        <div
            class="kanban__card"
            class:kanban__card--dragging=move || board.with(|b| b.dragged() == Some(id))
            draggable="true"
            on:dragstart=on_drag_start
            on:dragend=move |_| board.update(|b| b.drag_cancel())
            on:click=move |_| {
                if let Some(order) = board.with_untracked(|b| b.click(id)) {
                    on_open.run(order);
                }
            }
        >
            <div class="kanban__card-header">
                <span class="kanban__card-id">"#"{short_id}</span>
                <span class="kanban__card-amount">{format_price(order.total_amount)}</span>
            </div>
            <div class="kanban__card-recipient">{order.recipient_name.clone()}</div>
            <div class="kanban__card-phone">{order.customer_phone.clone()}</div>
            {address.map(|a| view! { <div class="kanban__card-address">{a}</div> })}
            <div class="kanban__card-date">{format_datetime(&order.created_at)}</div>
        </div>
    }
}
