use contracts::domain::a005_customer::aggregate::{
    AdminCustomer, AdminCustomerListParams, BlockCustomerQuery, CustomerActionResponse,
};

use crate::shared::api_utils::{request_json, with_query, ApiError, HttpMethod};
use crate::system::auth::context::AuthSession;

pub async fn fetch_customers(
    session: AuthSession,
    params: AdminCustomerListParams,
) -> Result<Vec<AdminCustomer>, ApiError> {
    let path = with_query("/admin/customer/", &params);
    session
        .run(|token| {
            let path = path.clone();
            async move { request_json(HttpMethod::Get, &path, None, token.as_deref()).await }
        })
        .await
}

/// Block or unblock by email; the phone narrows the match when the backend needs it
pub async fn set_blocked(
    session: AuthSession,
    customer: &AdminCustomer,
    blocked: bool,
) -> Result<CustomerActionResponse, ApiError> {
    let action = if blocked { "block" } else { "unblock" };
    let base = format!(
        "/admin/customer/{}/{}",
        urlencoding::encode(&customer.email),
        action
    );
    let query = BlockCustomerQuery {
        phone: Some(customer.phone.clone()).filter(|p| !p.is_empty()),
    };
    let path = with_query(&base, &query);
    session
        .run(|token| {
            let path = path.clone();
            async move { request_json(HttpMethod::Post, &path, None, token.as_deref()).await }
        })
        .await
}
