//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs, making requests and
//! turning non-2xx responses into [`ApiError`].

use contracts::shared::api_error::ApiErrorBody;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::config::config;

/// Ошибка обращения к API
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Ошибка сети: {0}")]
    Network(String),
    #[error("Требуется авторизация")]
    Unauthorized,
    #[error("Доступ запрещён")]
    Forbidden,
    #[error("{}", .message.as_deref().unwrap_or("Ошибка сервера"))]
    Server { status: u16, message: Option<String> },
    #[error("Некорректный ответ сервера: {0}")]
    Decode(String),
    #[error("Сессия истекла, войдите снова")]
    SessionExpired,
}

impl ApiError {
    /// Text shown to the user: the server's own message when it sent one,
    /// otherwise `fallback` for transport-level failures.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Server { message: None, .. } | ApiError::Network(_) | ApiError::Decode(_) => {
                fallback.to_string()
            }
            ApiError::Unauthorized | ApiError::Forbidden | ApiError::SessionExpired => self.to_string(),
        }
    }

    /// Map status and raw body of a failed response
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            _ => ApiError::Server {
                status,
                message: ApiErrorBody::parse(body).and_then(|b| b.message()),
            },
        }
    }

    pub async fn from_response(response: Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Self::from_status(status, &body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

/// Get the base URL for API requests
///
/// Uses `api.base_url` from the embedded config. An empty value means the API
/// is served from the page origin.
///
/// # Returns
/// - API base URL like "https://api.lascovo.ru"
/// - Empty string if neither config nor window is available
pub fn api_base() -> String {
    let configured = config().api.base_url.trim_end_matches('/');
    if !configured.is_empty() {
        return configured.to_string();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    window.location().origin().unwrap_or_default()
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/v1/order/");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Append `params` as a query string; serialization failures drop the query
pub fn with_query<P: Serialize>(path: &str, params: &P) -> String {
    match serde_qs::to_string(params) {
        Ok(qs) if !qs.is_empty() => format!("{}?{}", path, qs),
        Ok(_) => path.to_string(),
        Err(e) => {
            log::warn!("Failed to encode query for {}: {}", path, e);
            path.to_string()
        }
    }
}

/// Append each value as its own `key=value` pair, the list format the API expects
pub fn append_repeated<V: std::fmt::Display>(path: String, key: &str, values: &[V]) -> String {
    values.iter().fold(path, |acc, value| {
        let sep = if acc.contains('?') { '&' } else { '?' };
        format!("{}{}{}={}", acc, sep, key, urlencoding::encode(&value.to_string()))
    })
}

fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
    match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Patch => Request::patch(url),
        HttpMethod::Delete => Request::delete(url),
    }
}

/// Send a request and return the raw response if it is 2xx
pub async fn send(
    method: HttpMethod,
    path: &str,
    body: Option<&Value>,
    access_token: Option<&str>,
) -> Result<Response, ApiError> {
    let url = api_url(path);
    let mut request = builder(method, &url);
    if let Some(token) = access_token {
        request = request.header("Authorization", &format!("Bearer {}", token));
    }

    let response = match body {
        Some(body) => {
            request
                .json(body)
                .map_err(|e| ApiError::Network(format!("Failed to serialize request: {}", e)))?
                .send()
                .await
        }
        None => request.send().await,
    }
    .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        let error = ApiError::from_response(response).await;
        log::warn!("{:?} {} failed: {:?}", method, path, error);
        return Err(error);
    }
    Ok(response)
}

/// Send a request and decode a JSON response
pub async fn request_json<T: DeserializeOwned>(
    method: HttpMethod,
    path: &str,
    body: Option<&Value>,
    access_token: Option<&str>,
) -> Result<T, ApiError> {
    let response = send(method, path, body, access_token).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Serialize a request body up front so callers can retry with the same payload
pub fn to_body<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_maps_auth_codes() {
        assert_eq!(ApiError::from_status(401, ""), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(403, "{}"), ApiError::Forbidden);
    }

    #[test]
    fn test_server_message_surfaced_verbatim() {
        let error = ApiError::from_status(400, r#"{"detail":"Покупатель заблокирован"}"#);
        assert_eq!(error.user_message("fallback"), "Покупатель заблокирован");
        assert_eq!(error.to_string(), "Покупатель заблокирован");
    }

    #[test]
    fn test_generic_fallback() {
        let error = ApiError::from_status(502, "<html>Bad gateway</html>");
        assert_eq!(error.user_message("Не удалось"), "Не удалось");
        assert_eq!(ApiError::Network("offline".into()).user_message("Не удалось"), "Не удалось");
    }

    #[test]
    fn test_with_query() {
        #[derive(Serialize)]
        struct Page {
            limit: u32,
            offset: u32,
        }
        assert_eq!(
            with_query("/admin/order/", &Page { limit: 100, offset: 0 }),
            "/admin/order/?limit=100&offset=0"
        );
    }

    #[test]
    fn test_append_repeated() {
        let path = append_repeated("/search?limit=20".to_string(), "ids", &["a", "b c"]);
        assert_eq!(path, "/search?limit=20&ids=a&ids=b%20c");
        assert_eq!(append_repeated("/search".to_string(), "ids", &[1]), "/search?ids=1");
        assert_eq!(append_repeated::<u8>("/search".to_string(), "ids", &[]), "/search");
    }
}
