//! Клиентский заказ: форма оформления, правила валидации и сборка тела запроса `POST /api/v1/order/`

pub mod aggregate;
pub mod delivery;
pub mod draft;
pub mod form;
pub mod phone;
pub mod validation;
