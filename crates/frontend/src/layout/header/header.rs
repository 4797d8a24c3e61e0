use crate::domain::a002_basket::context::use_basket;
use crate::domain::a003_order::ui::checkout::view_model::use_checkout;
use crate::layout::global_context::{AppGlobalContext, Page};
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    let basket = use_basket();
    let checkout = use_checkout();
    let session = use_auth();

    let basket_count = move || basket.total_items();
    let username = move || {
        session
            .state
            .with(|s| s.user.as_ref().map(|u| u.username.clone()))
    };

    view! {
        <header data-zone="header" class="header">
            <div class="header__content">
                <span class="header__title" on:click=move |_| ctx.navigate(Page::Catalog)>"Lascovo"</span>
                <nav class="header__nav">
                    <button class="button button--ghost" on:click=move |_| ctx.navigate(Page::Catalog)>
                        {icon("flower")}
                        " Каталог"
                    </button>
                    <button class="button button--ghost" on:click=move |_| ctx.navigate(Page::AdminOrders)>
                        {icon("orders")}
                        " Админка"
                    </button>
                </nav>
            </div>
            <div class="header__actions">
                <button class="button button--ghost header__basket" title="Корзина" on:click=move |_| checkout.open()>
                    {icon("shopping-cart")}
                    {move || {
                        let count = basket_count();
                        (count > 0).then(|| view! { <span class="header__badge">{count}</span> })
                    }}
                </button>
                {move || username().map(|name| view! {
                    <span class="header__user">{name}</span>
                    <button class="button button--ghost" title="Выход" on:click=move |_| session.logout()>
                        {icon("log-out")}
                    </button>
                })}
            </div>
        </header>
    }
}
