use contracts::domain::a001_bouquet::aggregate::{
    BouquetListItem, BouquetSearchParams, BouquetType, FlowerType,
};
use leptos::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, Default)]
pub struct CatalogState {
    pub items: Vec<BouquetListItem>,
    /// Raw filter input, parsed on search
    pub price_min: String,
    pub price_max: String,
    /// Filter options, loaded once
    pub bouquet_types: Vec<BouquetType>,
    pub flower_types: Vec<FlowerType>,
    pub selected_bouquet_types: Vec<Uuid>,
    pub selected_flower_types: Vec<Uuid>,
    pub offset: u32,
    pub has_more: bool,
    pub is_loaded: bool,
}

fn parse_price(value: &str) -> Option<u64> {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

fn toggle(selected: &mut Vec<Uuid>, id: Uuid) {
    if let Some(pos) = selected.iter().position(|s| *s == id) {
        selected.remove(pos);
    } else {
        selected.push(id);
    }
}

impl CatalogState {
    pub fn search_params(&self, limit: u32, offset: u32) -> BouquetSearchParams {
        BouquetSearchParams {
            price_min: parse_price(&self.price_min),
            price_max: parse_price(&self.price_max),
            limit,
            offset,
            bouquet_type_ids: self.selected_bouquet_types.clone(),
            flower_type_ids: self.selected_flower_types.clone(),
        }
    }

    pub fn toggle_bouquet_type(&mut self, id: Uuid) {
        toggle(&mut self.selected_bouquet_types, id);
    }

    pub fn toggle_flower_type(&mut self, id: Uuid) {
        toggle(&mut self.selected_flower_types, id);
    }

    pub fn has_type_filter(&self) -> bool {
        !self.selected_bouquet_types.is_empty() || !self.selected_flower_types.is_empty()
    }

    pub fn clear_type_filters(&mut self) {
        self.selected_bouquet_types.clear();
        self.selected_flower_types.clear();
    }

    /// First page replaces the list, later pages append
    pub fn apply_page(&mut self, page: Vec<BouquetListItem>, limit: u32, offset: u32) {
        self.has_more = page.len() as u32 >= limit && limit > 0;
        if offset == 0 {
            self.items = page;
        } else {
            self.items.extend(page);
        }
        self.offset = offset;
        self.is_loaded = true;
    }

    pub fn next_offset(&self, limit: u32) -> u32 {
        self.offset.saturating_add(limit)
    }
}

pub fn create_state() -> RwSignal<CatalogState> {
    RwSignal::new(CatalogState::default())
}
