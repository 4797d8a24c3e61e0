//! Admin navigation

use crate::layout::global_context::{AppGlobalContext, Page};
use crate::shared::icons::icon;
use leptos::prelude::*;

const ADMIN_PAGES: [Page; 3] = [Page::AdminOrders, Page::AdminBouquets, Page::AdminCustomers];

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div class="app-sidebar__content">
            {ADMIN_PAGES
                .into_iter()
                .map(|page| view! {
                    <div
                        class="app-sidebar__item"
                        class:app-sidebar__item--active=move || ctx.page.get() == page
                        on:click=move |_| ctx.navigate(page)
                    >
                        <div class="app-sidebar__item-content">
                            {icon(page.icon())}
                            <span>{page.title()}</span>
                        </div>
                    </div>
                })
                .collect_view()}
        </div>
    }
}
