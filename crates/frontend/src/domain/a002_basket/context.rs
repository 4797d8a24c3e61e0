use contracts::domain::a001_bouquet::aggregate::BouquetId;
use contracts::domain::a002_basket::aggregate::{Basket, BasketItem, Product};
use leptos::ev;
use leptos::prelude::*;

use super::store::BasketStore;
use crate::shared::config::config;
use crate::shared::storage::BrowserStorage;

/// Reactive handle over the basket store.
///
/// Readers track `version`; every mutation bumps it, so the header badge, the
/// checkout modal and the product cards re-read storage after any change.
#[derive(Clone, Copy)]
pub struct BasketContext {
    store: StoredValue<BasketStore<BrowserStorage>>,
    version: RwSignal<u64>,
}

impl BasketContext {
    pub fn new() -> Self {
        Self {
            store: StoredValue::new(BasketStore::new(
                BrowserStorage,
                config().basket.storage_key.clone(),
            )),
            version: RwSignal::new(0),
        }
    }

    /// Re-read the basket when another tab writes it
    pub fn listen_other_tabs(&self) {
        let key = config().basket.storage_key.clone();
        let this = *self;
        let handle = window_event_listener(ev::storage, move |event| {
            // `key` is null when the whole storage was cleared
            if event.key().map_or(true, |k| k == key) {
                log::debug!("basket changed in another tab");
                this.touch();
            }
        });
        on_cleanup(move || handle.remove());
    }

    fn touch(&self) {
        // the signal may already be disposed when a late callback fires
        self.version.try_update(|v| *v = v.wrapping_add(1));
    }

    fn read<R>(&self, f: impl FnOnce(&BasketStore<BrowserStorage>) -> R) -> R {
        self.version.track();
        self.store.with_value(f)
    }

    fn write(&self, f: impl FnOnce(&BasketStore<BrowserStorage>)) {
        self.store.with_value(f);
        self.touch();
    }

    /// Current basket without subscribing, for event handlers
    pub fn snapshot(&self) -> Basket {
        self.store.with_value(|s| s.basket())
    }

    pub fn items(&self) -> Vec<BasketItem> {
        self.read(|s| s.items())
    }

    pub fn item_quantity(&self, id: BouquetId) -> u32 {
        self.read(|s| s.item_quantity(id))
    }

    pub fn has_item(&self, id: BouquetId) -> bool {
        self.read(|s| s.has_item(id))
    }

    pub fn total_items(&self) -> u64 {
        self.read(|s| s.total_items())
    }

    pub fn total_price(&self) -> u64 {
        self.read(|s| s.total_price())
    }

    pub fn add_item(&self, product: Product, quantity: u32) {
        self.write(|s| s.add_item(product, quantity));
    }

    pub fn remove_item(&self, id: BouquetId) {
        self.write(|s| s.remove_item(id));
    }

    pub fn update_quantity(&self, id: BouquetId, quantity: u32) {
        self.write(|s| s.update_quantity(id, quantity));
    }

    pub fn clear(&self) {
        self.write(|s| s.clear());
    }
}

impl Default for BasketContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_basket() -> BasketContext {
    use_context::<BasketContext>().expect("BasketContext not found in component tree")
}
