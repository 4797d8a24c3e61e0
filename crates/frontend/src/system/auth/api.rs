use contracts::system::auth::{CurrentUser, LoginRequest, RefreshRequest, TokenPair};

use crate::shared::api_utils::{request_json, to_body, ApiError, HttpMethod};

/// Login with username and password
pub async fn login(username: String, password: String) -> Result<TokenPair, ApiError> {
    let body = to_body(&LoginRequest { username, password })?;
    request_json(HttpMethod::Post, "/admin/auth/login", Some(&body), None).await
}

/// Exchange the refresh token for a new pair
pub async fn refresh_token(refresh_token: String) -> Result<TokenPair, ApiError> {
    let body = to_body(&RefreshRequest { refresh_token })?;
    request_json(HttpMethod::Post, "/admin/auth/refresh", Some(&body), None).await
}

pub async fn current_user(access_token: Option<String>) -> Result<CurrentUser, ApiError> {
    request_json(
        HttpMethod::Get,
        "/admin/auth/current_user",
        None,
        access_token.as_deref(),
    )
    .await
}
