use serde::{Deserialize, Serialize};

/// Покупатель в бэк-офисе (`GET /admin/customer/`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCustomer {
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub name: Option<String>,
    pub is_blocked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCustomerListParams {
    pub limit: u32,
    pub offset: u32,
}

impl Default for AdminCustomerListParams {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

/// Query for `POST /admin/customer/{email}/block`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockCustomerQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Ответ на блокировку/разблокировку
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerActionResponse {
    pub message: String,
}
