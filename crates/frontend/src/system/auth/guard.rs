use leptos::prelude::*;

use super::context::use_auth;
use crate::system::pages::login::LoginPage;

/// Admin screens: login form until the session is known and valid
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = use_auth();

    move || {
        let (restored, authenticated) = session
            .state
            .with(|s| (s.restored, s.user.is_some()));
        if !restored {
            view! { <div class="page page--loading">"Проверка сессии..."</div> }.into_any()
        } else if !authenticated {
            view! { <LoginPage /> }.into_any()
        } else {
            children().into_any()
        }
    }
}
