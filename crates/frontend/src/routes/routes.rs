use crate::domain::a001_bouquet::ui::grid::BouquetCatalog;
use crate::domain::a004_admin_order::ui::board::OrderBoard;
use crate::domain::a005_customer::ui::list::CustomerList;
use crate::domain::a006_admin_bouquet::ui::list::AdminBouquetList;
use crate::layout::global_context::{AppGlobalContext, Page};
use crate::layout::Shell;
use crate::system::auth::guard::RequireAuth;
use leptos::prelude::*;

fn page_view(page: Page) -> AnyView {
    match page {
        Page::Catalog => view! { <BouquetCatalog /> }.into_any(),
        Page::AdminOrders => view! { <RequireAuth><OrderBoard /></RequireAuth> }.into_any(),
        Page::AdminBouquets => view! { <RequireAuth><AdminBouquetList /></RequireAuth> }.into_any(),
        Page::AdminCustomers => view! { <RequireAuth><CustomerList /></RequireAuth> }.into_any(),
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    // Initialize router integration. This runs once when the component is created.
    ctx.init_router_integration();

    view! {
        <Shell center=move || page_view(ctx.page.get()) />
    }
}
