use contracts::domain::a001_bouquet::aggregate::{BouquetId, BouquetListItem};
use contracts::domain::a006_admin_bouquet::aggregate::AdminBouquetListParams;
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct BouquetListState {
    pub items: Vec<BouquetListItem>,
    pub page: u32,
    pub page_size: u32,
    pub is_loaded: bool,
}

impl Default for BouquetListState {
    fn default() -> Self {
        let defaults = AdminBouquetListParams::default();
        Self {
            items: Vec::new(),
            page: 0,
            page_size: defaults.limit,
            is_loaded: false,
        }
    }
}

impl BouquetListState {
    pub fn params(&self) -> AdminBouquetListParams {
        AdminBouquetListParams {
            limit: self.page_size,
            offset: self.page.saturating_mul(self.page_size),
        }
    }

    /// A full page means there may be more
    pub fn has_next(&self) -> bool {
        self.items.len() as u32 >= self.page_size
    }

    /// Drop a deleted bouquet without waiting for the refetch
    pub fn remove(&mut self, id: BouquetId) {
        self.items.retain(|b| b.id != id);
    }
}

pub fn create_state() -> RwSignal<BouquetListState> {
    RwSignal::new(BouquetListState::default())
}
