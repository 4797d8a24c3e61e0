use std::future::Future;

use contracts::system::auth::CurrentUser;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use super::client::AuthClient;
use crate::shared::api_utils::ApiError;
use crate::shared::storage::BrowserStorage;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<CurrentUser>,
    /// Stored tokens have been checked against the server
    pub restored: bool,
}

/// Сессия администратора
#[derive(Clone, Copy)]
pub struct AuthSession {
    pub state: RwSignal<AuthState>,
    client: StoredValue<AuthClient<BrowserStorage>, LocalStorage>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(AuthState::default()),
            client: StoredValue::new_local(AuthClient::browser()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.user.is_some())
    }

    fn client(&self) -> AuthClient<BrowserStorage> {
        self.client.get_value()
    }

    /// Run an authenticated request; an expired session logs the admin out
    pub async fn run<T, F, Fut>(&self, call: F) -> Result<T, ApiError>
    where
        F: FnMut(Option<String>) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let result = self.client().execute(call).await;
        if matches!(result, Err(ApiError::SessionExpired)) {
            self.expire();
        }
        result
    }

    /// Restore the session from stored tokens on startup
    pub fn restore(&self) {
        let this = *self;
        if self.client().tokens().access_token().is_none() {
            self.state.set(AuthState {
                user: None,
                restored: true,
            });
            return;
        }
        spawn_local(async move {
            let user = this.run(api::current_user).await;
            if let Err(e) = &user {
                log::info!("auth: stored session not restored: {}", e);
            }
            this.state.try_set(AuthState {
                user: user.ok(),
                restored: true,
            });
        });
    }

    pub async fn login(&self, username: String, password: String) -> Result<(), ApiError> {
        let tokens = api::login(username, password).await?;
        self.client().tokens().save(&tokens);
        let user = self.run(api::current_user).await?;
        log::info!("auth: logged in as {}", user.username);
        self.state.try_set(AuthState {
            user: Some(user),
            restored: true,
        });
        Ok(())
    }

    pub fn logout(&self) {
        self.client().tokens().clear();
        self.state.set(AuthState {
            user: None,
            restored: true,
        });
    }

    fn expire(&self) {
        log::warn!("auth: session expired");
        self.client().tokens().clear();
        self.state.try_set(AuthState {
            user: None,
            restored: true,
        });
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let session = AuthSession::new();
    session.restore();
    provide_context(session);

    children()
}

/// Hook to access auth session
pub fn use_auth() -> AuthSession {
    use_context::<AuthSession>().expect("AuthProvider not found in component tree")
}
