pub mod state;

use self::state::create_state;
use crate::domain::a005_customer::api::{fetch_customers, set_blocked};
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use contracts::domain::a005_customer::aggregate::{AdminCustomer, AdminCustomerListParams};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn CustomerList() -> impl IntoView {
    let session = use_auth();
    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);

    let load = move || {
        set_loading.set(true);
        set_error.set(None);
        let params = state.with_untracked(|s| AdminCustomerListParams {
            limit: s.page_size,
            offset: s.offset(),
        });
        spawn_local(async move {
            match fetch_customers(session, params).await {
                Ok(items) => {
                    state.try_update(|s| {
                        s.items = items;
                        s.is_loaded = true;
                    });
                }
                Err(e) => {
                    log::error!("Failed to fetch customers: {}", e);
                    set_error.try_set(Some(e.user_message("Не удалось загрузить покупателей")));
                }
            }
            set_loading.try_set(false);
        });
    };

    let toggle_block = move |customer: AdminCustomer| {
        let blocked = !customer.is_blocked;
        set_error.set(None);
        set_notice.set(None);
        spawn_local(async move {
            match set_blocked(session, &customer, blocked).await {
                Ok(response) => {
                    state.try_update(|s| s.set_blocked(&customer.email, blocked));
                    set_notice.try_set(Some(response.message));
                    load();
                }
                Err(e) => {
                    log::error!("Failed to change block of {}: {}", customer.email, e);
                    set_error.try_set(Some(e.user_message("Не удалось изменить блокировку")));
                }
            }
        });
    };

    let go_to_page = move |page: u32| {
        state.update(|s| s.page = page);
        load();
    };

    load();

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Покупатели"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        " Обновить"
                    </Button>
                </div>
            </div>

            {move || error.get().map(|err| view! {
                <div class="alert alert--error">{err}</div>
            })}
            {move || notice.get().map(|msg| view! {
                <div class="alert alert--info">{msg}</div>
            })}

            <div class="table-wrapper">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Email"</th>
                            <th class="table__header-cell">"Телефон"</th>
                            <th class="table__header-cell">"Имя"</th>
                            <th class="table__header-cell">"Статус"</th>
                            <th class="table__header-cell"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || state.get().items.into_iter().map(|customer| {
                            let is_blocked = customer.is_blocked;
                            let row = customer.clone();
                            view! {
                                <tr class="table__row" class:table__row--muted=is_blocked>
                                    <td class="table__cell">{customer.email}</td>
                                    <td class="table__cell">{customer.phone}</td>
                                    <td class="table__cell">{customer.name.unwrap_or_else(|| "-".to_string())}</td>
                                    <td class="table__cell">
                                        {if is_blocked { "Заблокирован" } else { "Активен" }}
                                    </td>
                                    <td class="table__cell">
                                        <button
                                            class="button button--secondary"
                                            on:click=move |_| toggle_block(row.clone())
                                        >
                                            {if is_blocked { "Разблокировать" } else { "Заблокировать" }}
                                        </button>
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>

            <div class="pagination">
                <button
                    class="button button--secondary"
                    disabled=move || loading.get() || state.with(|s| s.page == 0)
                    on:click=move |_| go_to_page(state.with_untracked(|s| s.page.saturating_sub(1)))
                >
                    "Назад"
                </button>
                <span class="pagination__page">{move || format!("Страница {}", state.with(|s| s.page + 1))}</span>
                <button
                    class="button button--secondary"
                    disabled=move || loading.get() || !state.with(|s| s.has_next())
                    on:click=move |_| go_to_page(state.with_untracked(|s| s.page + 1))
                >
                    "Вперёд"
                </button>
            </div>
        </div>
    }
}
