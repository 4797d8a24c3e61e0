//! Single-flight token refresh.
//!
//! Callers that hit an expired access token while a refresh is already running
//! get a clone of the same shared future instead of starting a second one.

use std::cell::RefCell;
use std::rc::Rc;

use contracts::system::auth::TokenPair;
use futures::future::{FutureExt, LocalBoxFuture, Shared};

use super::storage::TokenStore;
use crate::shared::api_utils::ApiError;
use crate::shared::storage::KeyValueStorage;

/// Performs the refresh request for a refresh token
pub type RefreshFn = Rc<dyn Fn(String) -> LocalBoxFuture<'static, Result<TokenPair, ApiError>>>;

/// Resolves to the new access token
pub type PendingRefresh = Shared<LocalBoxFuture<'static, Result<String, ApiError>>>;

#[derive(Clone)]
pub struct RefreshCoordinator<S> {
    tokens: TokenStore<S>,
    refresh: RefreshFn,
    in_flight: Rc<RefCell<Option<PendingRefresh>>>,
}

impl<S: KeyValueStorage + Clone + 'static> RefreshCoordinator<S> {
    pub fn new(tokens: TokenStore<S>, refresh: RefreshFn) -> Self {
        Self {
            tokens,
            refresh,
            in_flight: Rc::new(RefCell::new(None)),
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.in_flight.borrow().is_some()
    }

    /// Join the running refresh or start one.
    ///
    /// A failed refresh clears both tokens and resolves to `SessionExpired`.
    pub fn refresh(&self) -> PendingRefresh {
        let existing = self.in_flight.borrow().clone();
        if let Some(pending) = existing {
            return pending;
        }

        let tokens = self.tokens.clone();
        let refresh = self.refresh.clone();
        let slot = self.in_flight.clone();
        let pending = async move {
            let result = match tokens.refresh_token() {
                Some(refresh_token) => match refresh(refresh_token).await {
                    Ok(pair) => {
                        tokens.save(&pair);
                        log::debug!("auth: access token refreshed");
                        Ok(pair.access_token)
                    }
                    Err(e) => {
                        log::warn!("auth: token refresh failed: {}", e);
                        Err(ApiError::SessionExpired)
                    }
                },
                None => Err(ApiError::SessionExpired),
            };
            if result.is_err() {
                tokens.clear();
            }
            slot.borrow_mut().take();
            result
        }
        .boxed_local()
        .shared();

        *self.in_flight.borrow_mut() = Some(pending.clone());
        pending
    }
}
