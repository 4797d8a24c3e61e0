pub mod global_context;
pub mod header;
pub mod left;

use crate::domain::a003_order::ui::checkout::{CheckoutModal, PaymentLinkNotice};
use global_context::AppGlobalContext;
use leptos::prelude::*;

/// Main application shell.
///
/// ```text
/// +------------------------------------------+
/// |                 Header                   |
/// +------------------------------------------+
/// |  Sidebar (admin pages) |    Content      |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell<C>(center: C) -> impl IntoView
where
    C: Fn() -> AnyView + 'static + Send,
{
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    view! {
        <div class="app-layout">
            <header::Header />

            <div class="app-body">
                <Show when=move || ctx.page.get().is_admin()>
                    <left::Left>
                        <left::Sidebar />
                    </left::Left>
                </Show>

                <div class="app-main">
                    <PaymentLinkNotice />
                    {move || center()}
                </div>
            </div>

            <CheckoutModal />
        </div>
    }
}
