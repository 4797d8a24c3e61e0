pub mod state;

use self::state::create_state;
use super::card::BouquetCard;
use super::details::BouquetDetails;
use crate::domain::a001_bouquet::api::{fetch_bouquet_types, fetch_flower_types, search_bouquets};
use crate::shared::config::config;
use crate::shared::icons::icon;
use contracts::domain::a001_bouquet::aggregate::BouquetListItem;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn BouquetCatalog() -> impl IntoView {
    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let price_min = RwSignal::new(String::new());
    let price_max = RwSignal::new(String::new());
    let limit = config().catalog.page_limit;
    let opened = RwSignal::new(None::<BouquetListItem>);
    let bouquet_types = Memo::new(move |_| state.with(|s| s.bouquet_types.clone()));
    let flower_types = Memo::new(move |_| state.with(|s| s.flower_types.clone()));

    let load_page = move |offset: u32| {
        if loading.get_untracked() {
            return;
        }
        set_loading.set(true);
        set_error.set(None);
        let params = state.with_untracked(|s| s.search_params(limit, offset));
        spawn_local(async move {
            match search_bouquets(&params).await {
                Ok(page) => {
                    state.try_update(|s| s.apply_page(page, limit, offset));
                }
                Err(e) => {
                    log::error!("Failed to load bouquets: {}", e);
                    set_error.try_set(Some(e.user_message("Не удалось загрузить каталог")));
                }
            }
            set_loading.try_set(false);
        });
    };

    let search = move || {
        state.update(|s| {
            s.price_min = price_min.get_untracked();
            s.price_max = price_max.get_untracked();
        });
        load_page(0);
    };

    // Filter options; without them the catalog still works unfiltered
    spawn_local(async move {
        match fetch_bouquet_types().await {
            Ok(types) => {
                state.try_update(|s| s.bouquet_types = types);
            }
            Err(e) => log::warn!("Failed to load bouquet types: {}", e),
        }
        match fetch_flower_types().await {
            Ok(types) => {
                state.try_update(|s| s.flower_types = types);
            }
            Err(e) => log::warn!("Failed to load flower types: {}", e),
        }
    });

    search();

    view! {
        <div class="page catalog">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Букеты"</h1>
                </div>
                <div class="page__header-right">
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <Input value=price_min placeholder="Цена от" />
                        <Input value=price_max placeholder="Цена до" />
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| search()
                            disabled=Signal::derive(move || loading.get())
                        >
                            {icon("refresh")}
                            " Найти"
                        </Button>
                    </Flex>
                </div>
            </div>

            <div class="catalog__filters">
                {move || {
                    let types = bouquet_types.get();
                    (!types.is_empty()).then(|| view! {
                        <div class="catalog__filter-group">
                            <span class="catalog__filter-title">"Тип букета"</span>
                            {types.into_iter().map(|t| {
                                let id = t.id;
                                view! {
                                    <label class="catalog__filter-option">
                                        <input
                                            type="checkbox"
                                            prop:checked=move || state.with(|s| s.selected_bouquet_types.contains(&id))
                                            disabled=move || loading.get()
                                            on:change=move |_| {
                                                state.update(|s| s.toggle_bouquet_type(id));
                                                search();
                                            }
                                        />
                                        {t.name}
                                    </label>
                                }
                            }).collect_view()}
                        </div>
                    })
                }}
                {move || {
                    let types = flower_types.get();
                    (!types.is_empty()).then(|| view! {
                        <div class="catalog__filter-group">
                            <span class="catalog__filter-title">"Цветы"</span>
                            {types.into_iter().map(|t| {
                                let id = t.id;
                                view! {
                                    <label class="catalog__filter-option">
                                        <input
                                            type="checkbox"
                                            prop:checked=move || state.with(|s| s.selected_flower_types.contains(&id))
                                            disabled=move || loading.get()
                                            on:change=move |_| {
                                                state.update(|s| s.toggle_flower_type(id));
                                                search();
                                            }
                                        />
                                        {t.name}
                                    </label>
                                }
                            }).collect_view()}
                        </div>
                    })
                }}
                <Show when=move || state.with(|s| s.has_type_filter())>
                    <button
                        class="button button--secondary"
                        disabled=move || loading.get()
                        on:click=move |_| {
                            state.update(|s| s.clear_type_filters());
                            search();
                        }
                    >
                        {icon("x")}
                        " Сбросить"
                    </button>
                </Show>
            </div>

            {move || error.get().map(|err| view! {
                <div class="alert alert--error">{err}</div>
            })}

            <div class="catalog__grid">
                <For
                    each=move || state.get().items
                    key=|bouquet| bouquet.id
                    children=move |bouquet| {
                        let item = bouquet.clone();
                        let on_open = Callback::new(move |_| opened.set(Some(item.clone())));
                        view! { <BouquetCard bouquet=bouquet on_open=on_open /> }
                    }
                />
            </div>

            {move || opened.get().map(|bouquet| view! {
                <BouquetDetails bouquet=bouquet on_close=Callback::new(move |_| opened.set(None)) />
            })}

            {move || {
                let (is_loaded, empty) = state.with(|s| (s.is_loaded, s.items.is_empty()));
                (is_loaded && empty && !loading.get()).then(|| view! {
                    <div class="catalog__empty">"Букеты не найдены"</div>
                })
            }}

            <Show when=move || state.with(|s| s.has_more)>
                <div class="catalog__more">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_page(state.with_untracked(|s| s.next_offset(limit)))
                        disabled=Signal::derive(move || loading.get())
                    >
                        {move || if loading.get() { "Загрузка..." } else { "Показать ещё" }}
                    </Button>
                </div>
            </Show>
        </div>
    }
}
