use std::future::Future;

use futures::FutureExt;

use super::api;
use super::refresh::{RefreshCoordinator, RefreshFn};
use super::storage::TokenStore;
use crate::shared::api_utils::ApiError;
use crate::shared::storage::{BrowserStorage, KeyValueStorage};

/// Runs authenticated requests with the stored access token.
///
/// A request rejected with 401 is retried exactly once: with the token another
/// caller stored in the meantime, or else with the result of the shared refresh.
#[derive(Clone)]
pub struct AuthClient<S> {
    tokens: TokenStore<S>,
    refresher: RefreshCoordinator<S>,
}

impl AuthClient<BrowserStorage> {
    pub fn browser() -> Self {
        let refresh: RefreshFn = std::rc::Rc::new(|token| api::refresh_token(token).boxed_local());
        Self::new(TokenStore::browser(), refresh)
    }
}

impl<S: KeyValueStorage + Clone + 'static> AuthClient<S> {
    pub fn new(tokens: TokenStore<S>, refresh: RefreshFn) -> Self {
        Self {
            refresher: RefreshCoordinator::new(tokens.clone(), refresh),
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenStore<S> {
        &self.tokens
    }

    pub async fn execute<T, F, Fut>(&self, mut call: F) -> Result<T, ApiError>
    where
        F: FnMut(Option<String>) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let sent_with = self.tokens.access_token();
        match call(sent_with.clone()).await {
            Err(ApiError::Unauthorized) => {
                let current = self.tokens.access_token();
                let token = if current.is_some() && current != sent_with {
                    current
                } else {
                    Some(self.refresher.refresh().await?)
                };
                call(token).await
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;
    use contracts::system::auth::TokenPair;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn client(refresh_ok: bool, refreshes: Rc<Cell<u32>>) -> AuthClient<MemoryStorage> {
        let tokens = TokenStore::new(MemoryStorage::new(), "access", "refresh");
        tokens.save(&TokenPair {
            access_token: "old".to_string(),
            refresh_token: "r".to_string(),
        });
        let refresh: RefreshFn = Rc::new(move |_| {
            refreshes.set(refreshes.get() + 1);
            async move {
                if refresh_ok {
                    Ok(TokenPair {
                        access_token: "new".to_string(),
                        refresh_token: "r2".to_string(),
                    })
                } else {
                    Err(ApiError::Unauthorized)
                }
            }
            .boxed_local()
        });
        AuthClient::new(tokens, refresh)
    }

    /// Accepts only the `new` token and records what it was called with
    fn server(seen: Rc<RefCell<Vec<Option<String>>>>) -> impl FnMut(Option<String>) -> futures::future::Ready<Result<u32, ApiError>> {
        move |token| {
            seen.borrow_mut().push(token.clone());
            futures::future::ready(match token.as_deref() {
                Some("new") => Ok(42),
                _ => Err(ApiError::Unauthorized),
            })
        }
    }

    #[test]
    fn test_success_needs_no_refresh() {
        let refreshes = Rc::new(Cell::new(0));
        let client = client(true, refreshes.clone());
        let result = block_on(client.execute(|token| async move {
            assert_eq!(token.as_deref(), Some("old"));
            Ok::<_, ApiError>(1)
        }));
        assert_eq!(result, Ok(1));
        assert_eq!(refreshes.get(), 0);
    }

    #[test]
    fn test_unauthorized_refreshes_and_retries_once() {
        let refreshes = Rc::new(Cell::new(0));
        let client = client(true, refreshes.clone());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let result = block_on(client.execute(server(seen.clone())));
        assert_eq!(result, Ok(42));
        assert_eq!(refreshes.get(), 1);
        assert_eq!(
            *seen.borrow(),
            vec![Some("old".to_string()), Some("new".to_string())]
        );
        assert_eq!(client.tokens().access_token().as_deref(), Some("new"));
    }

    #[test]
    fn test_token_changed_meanwhile_retries_without_refresh() {
        let refreshes = Rc::new(Cell::new(0));
        let client = client(true, refreshes.clone());
        let tokens = client.tokens().clone();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut inner = server(seen.clone());
        let result = block_on(client.execute(move |token| {
            // another caller finished a refresh while this request was in flight
            tokens.save(&TokenPair {
                access_token: "new".to_string(),
                refresh_token: "r2".to_string(),
            });
            inner(token)
        }));
        assert_eq!(result, Ok(42));
        assert_eq!(refreshes.get(), 0);
    }

    #[test]
    fn test_failed_refresh_expires_session() {
        let refreshes = Rc::new(Cell::new(0));
        let client = client(false, refreshes.clone());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let result = block_on(client.execute(server(seen.clone())));
        assert_eq!(result, Err(ApiError::SessionExpired));
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(client.tokens().access_token(), None);
    }

    #[test]
    fn test_other_errors_pass_through() {
        let refreshes = Rc::new(Cell::new(0));
        let client = client(true, refreshes.clone());
        let result: Result<(), ApiError> =
            block_on(client.execute(|_| async { Err(ApiError::Forbidden) }));
        assert_eq!(result, Err(ApiError::Forbidden));
        assert_eq!(refreshes.get(), 0);
    }
}
