use contracts::domain::a001_bouquet::aggregate::{BouquetDetail, BouquetListItem};
use futures::future::{FutureExt, LocalBoxFuture};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a006_admin_bouquet::api::{archive_bouquet, delete_bouquet, fetch_bouquet};
use crate::shared::api_utils::ApiError;
use crate::shared::icons::icon;
use crate::shared::modal::{report_changed, Modal};
use crate::shared::number_format::format_price;
use crate::system::auth::context::use_auth;

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

fn status_label(is_active: Option<bool>) -> &'static str {
    match is_active {
        Some(false) => "Неактивен",
        _ => "Активен",
    }
}

/// Карточка букета в админке: просмотр, архивирование, удаление
#[component]
pub fn AdminBouquetDetails(
    bouquet: BouquetListItem,
    on_close: Callback<()>,
    /// Called after archiving; the list refetches
    on_archived: Callback<()>,
    on_deleted: Callback<()>,
) -> impl IntoView {
    let session = use_auth();
    let id = bouquet.id;
    let (detail, set_detail) = signal::<Option<BouquetDetail>>(None);
    let (busy, set_busy) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    spawn_local(async move {
        match fetch_bouquet(session, id).await {
            Ok(d) => {
                set_detail.try_set(Some(d));
            }
            Err(e) => {
                log::error!("bouquet {}: load failed: {}", id, e);
                set_error.try_set(Some(e.user_message("Не удалось загрузить букет")));
            }
        }
    });

    let run_action = move |action: &'static str,
                           fallback: &'static str,
                           task: LocalBoxFuture<'static, Result<(), ApiError>>,
                           done: Callback<()>| {
        if busy.get_untracked() {
            return;
        }
        set_busy.set(true);
        set_error.set(None);
        spawn_local(async move {
            match task.await {
                Ok(()) => {
                    log::info!("bouquet {}: {} done", id, action);
                    if !report_changed(done) {
                        log::debug!("bouquet {}: details closed before {} finished", id, action);
                    }
                }
                Err(e) => {
                    log::error!("bouquet {}: {} failed: {}", id, action, e);
                    set_error.try_set(Some(e.user_message(fallback)));
                }
            }
            set_busy.try_set(false);
        });
    };

    let archive = move |_| {
        if !confirm("Вы уверены, что хотите архивировать этот букет?") {
            return;
        }
        run_action(
            "archive",
            "Не удалось архивировать букет",
            archive_bouquet(session, id).boxed_local(),
            on_archived,
        );
    };

    let delete = move |_| {
        if !confirm("Вы уверены, что хотите удалить этот букет?") {
            return;
        }
        run_action(
            "delete",
            "Не удалось удалить букет",
            delete_bouquet(session, id).boxed_local(),
            on_deleted,
        );
    };

    view! {
        <Modal title=bouquet.name.clone() on_close=on_close class="modal--wide">
            <div class="order-details">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                {move || match detail.get() {
                    None => view! { <div class="order-details__loading">"Загрузка..."</div> }.into_any(),
                    Some(d) => {
                        let flowers = d.flower_names();
                        let images = d.sorted_images();
                        view! {
                            <div class="bouquet-details__gallery">
                                {images.into_iter().map(|img| view! {
                                    <img src=img.image_path alt=d.name.clone() loading="lazy" />
                                }).collect_view()}
                            </div>
                            <dl class="order-details__fields">
                                <dt>"Описание"</dt>
                                <dd>{d.description.clone().filter(|s| !s.is_empty()).unwrap_or_else(|| "-".to_string())}</dd>
                                <dt>"Цена"</dt>
                                <dd>{format_price(d.price)}</dd>
                                <dt>"Количество"</dt>
                                <dd>{d.quantity}</dd>
                                <dt>"Просмотры"</dt>
                                <dd>{d.view_count}</dd>
                                <dt>"Покупки"</dt>
                                <dd>{d.purchase_count}</dd>
                                <dt>"Статус"</dt>
                                <dd>{status_label(d.is_active)}</dd>
                                <dt>"Тип букета"</dt>
                                <dd>{d.bouquet_type.as_ref().map(|t| t.name.clone()).unwrap_or_else(|| "-".to_string())}</dd>
                                <dt>"Типы цветов"</dt>
                                <dd>{if flowers.is_empty() { "-".to_string() } else { flowers }}</dd>
                            </dl>
                        }.into_any()
                    }
                }}

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
