pub mod state;

use self::state::create_state;
use crate::domain::a006_admin_bouquet::api::fetch_bouquets;
use crate::domain::a006_admin_bouquet::ui::details::AdminBouquetDetails;
use crate::shared::icons::icon;
use crate::shared::number_format::format_price;
use crate::system::auth::context::use_auth;
use contracts::domain::a001_bouquet::aggregate::BouquetListItem;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn AdminBouquetList() -> impl IntoView {
    let session = use_auth();
    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let opened = RwSignal::new(None::<BouquetListItem>);

    let load = move || {
        set_loading.set(true);
        set_error.set(None);
        let params = state.with_untracked(|s| s.params());
        spawn_local(async move {
            match fetch_bouquets(session, params).await {
                Ok(items) => {
                    state.try_update(|s| {
                        s.items = items;
                        s.is_loaded = true;
                    });
                }
                Err(e) => {
                    log::error!("Failed to fetch bouquets: {}", e);
                    set_error.try_set(Some(e.user_message(
                        "Ошибка при загрузке продуктов. Попробуйте обновить страницу.",
                    )));
                }
            }
            set_loading.try_set(false);
        });
    };

    let go_to_page = move |page: u32| {
        state.update(|s| s.page = page);
        load();
    };

    let on_close = Callback::new(move |_| opened.set(None));
    let on_archived = Callback::new(move |_| {
        opened.set(None);
        load();
    });
    let on_deleted = Callback::new(move |_| {
        if let Some(bouquet) = opened.get_untracked() {
            state.update(|s| s.remove(bouquet.id));
        }
        opened.set(None);
        load();
    });

    load();

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Букеты"</h1>
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

            <Show when=move || loading.get() && !state.with(|s| s.is_loaded)>
                <div class="page__loading">"Загрузка продуктов..."</div>
            </Show>

            <div class="table-wrapper">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell"></th>
                            <th class="table__header-cell">"Название"</th>
                            <th class="table__header-cell">"Цена"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || state.get().items.into_iter().map(|bouquet| {
                            let row = bouquet.clone();
                            view! {
                                <tr class="table__row table__row--clickable" on:click=move |_| opened.set(Some(row.clone()))>
                                    <td class="table__cell table__cell--thumb">
                                        {match bouquet.main_image {
                                            Some(image) => view! { <img src=image.image_path alt="" loading="lazy" /> }.into_any(),
                                            None => icon("flower"),
                                        }}
                                    </td>
                                    <td class="table__cell">{bouquet.name}</td>
                                    <td class="table__cell">{format_price(bouquet.price)}</td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>

            {move || {
                let (is_loaded, empty) = state.with(|s| (s.is_loaded, s.items.is_empty()));
                (is_loaded && empty).then(|| view! {
                    <div class="catalog__empty">"Продукты не найдены"</div>
                })
            }}

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

            {move || opened.get().map(|bouquet| view! {
                <AdminBouquetDetails
                    bouquet=bouquet
                    on_close=on_close
                    on_archived=on_archived
                    on_deleted=on_deleted
                />
            })}
        </div>
    }
}
