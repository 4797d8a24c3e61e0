pub mod a001_bouquet;
pub mod a002_basket;
pub mod a003_order;
pub mod a004_admin_order;
pub mod a005_customer;
pub mod a006_admin_bouquet;
pub mod common;
