use contracts::domain::a005_customer::aggregate::AdminCustomer;
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct CustomerListState {
    pub items: Vec<AdminCustomer>,
    pub page: u32,
    pub page_size: u32,
    pub is_loaded: bool,
}

impl Default for CustomerListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            page_size: 50,
            is_loaded: false,
        }
    }
}

impl CustomerListState {
    pub fn offset(&self) -> u32 {
        self.page.saturating_mul(self.page_size)
    }

    /// A full page means there may be more
    pub fn has_next(&self) -> bool {
        self.items.len() as u32 >= self.page_size
    }

    /// Apply a block toggle locally once the server confirmed it
    pub fn set_blocked(&mut self, email: &str, blocked: bool) {
        if let Some(customer) = self.items.iter_mut().find(|c| c.email == email) {
            customer.is_blocked = blocked;
        }
    }
}

pub fn create_state() -> RwSignal<CustomerListState> {
    RwSignal::new(CustomerListState::default())
}
