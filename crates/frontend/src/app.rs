use crate::domain::a002_basket::context::BasketContext;
use crate::domain::a003_order::ui::checkout::view_model::CheckoutVm;
use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppGlobalContext::new());

    // корзина общая для всех страниц и синхронизируется между вкладками
    let basket = BasketContext::new();
    basket.listen_other_tabs();
    provide_context(basket);

    provide_context(CheckoutVm::new());

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
    }
}
