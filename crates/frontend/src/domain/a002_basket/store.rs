//! Basket Store: synchronous CRUD over the basket persisted under one storage key.
//!
//! Every operation re-reads storage, so the store never caches a snapshot and
//! other surfaces (or other tabs) always see the last write.

use contracts::domain::a001_bouquet::aggregate::BouquetId;
use contracts::domain::a002_basket::aggregate::{Basket, BasketItem, Product};

use crate::shared::storage::KeyValueStorage;

#[derive(Debug, Clone)]
pub struct BasketStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> BasketStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Absent or unreadable storage is an empty basket
    fn load(&self) -> Basket {
        let Some(raw) = self.storage.get(&self.key) else {
            return Basket::new();
        };
        match serde_json::from_str::<Basket>(&raw) {
            Ok(basket) => basket.normalized(),
            Err(e) => {
                log::warn!("Ошибка при чтении корзины из storage ('{}'): {}", self.key, e);
                Basket::new()
            }
        }
    }

    fn save(&self, basket: &Basket) {
        match serde_json::to_string(basket) {
            Ok(json) => self.storage.set(&self.key, &json),
            Err(e) => log::error!("Ошибка при сохранении корзины: {}", e),
        }
    }

    /// Read-modify-write of the whole basket
    fn mutate<R>(&self, f: impl FnOnce(&mut Basket) -> R) -> R {
        let mut basket = self.load();
        let result = f(&mut basket);
        self.save(&basket);
        result
    }

    pub fn basket(&self) -> Basket {
        self.load()
    }

    pub fn items(&self) -> Vec<BasketItem> {
        self.load().items
    }

    /// Добавить товар в корзину или увеличить количество, если товар уже есть
    pub fn add_item(&self, product: Product, quantity: u32) {
        log::debug!("basket: add {} x{}", product.id, quantity);
        self.mutate(|b| b.add(product, quantity));
    }

    /// Удалить товар; absent ids are ignored
    pub fn remove_item(&self, product_id: BouquetId) {
        self.mutate(|b| b.remove(product_id));
    }

    /// Overwrite the quantity; zero removes the line, absent ids are ignored
    pub fn update_quantity(&self, product_id: BouquetId, quantity: u32) {
        self.mutate(|b| b.set_quantity(product_id, quantity));
    }

    pub fn item_quantity(&self, product_id: BouquetId) -> u32 {
        self.load().quantity_of(product_id)
    }

    pub fn total_items(&self) -> u64 {
        self.load().total_items()
    }

    pub fn total_price(&self) -> u64 {
        self.load().total_price()
    }

    pub fn has_item(&self, product_id: BouquetId) -> bool {
        self.load().contains(product_id)
    }

    pub fn clear(&self) {
        self.save(&Basket::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;
    use uuid::Uuid;

    const KEY: &str = "flowers-store-basket";

    fn product(n: u128, price: u64) -> Product {
        Product {
            id: BouquetId::new(Uuid::from_u128(n)),
            name: format!("Букет {}", n),
            price,
            image: None,
        }
    }

    fn store() -> (BasketStore<MemoryStorage>, MemoryStorage) {
        let storage = MemoryStorage::new();
        (BasketStore::new(storage.clone(), KEY), storage)
    }

    #[test]
    fn test_empty_when_storage_absent() {
        let (store, _) = store();
        assert!(store.items().is_empty());
        assert_eq!(store.total_price(), 0);
        assert_eq!(store.item_quantity(product(1, 1).id), 0);
    }

    #[test]
    fn test_corrupt_storage_reads_as_empty() {
        let (store, storage) = store();
        storage.set(KEY, "{not json");
        assert!(store.items().is_empty());
        // the next write replaces the corrupt value
        store.add_item(product(1, 100), 1);
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn test_add_twice_yields_one_item() {
        let (store, _) = store();
        store.add_item(product(1, 1000), 2);
        store.add_item(product(1, 1000), 3);
        let items = store.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 5);
    }

    #[test]
    fn test_writes_through_to_storage() {
        let (store, storage) = store();
        store.add_item(product(1, 1000), 2);
        let other = BasketStore::new(storage, KEY);
        assert_eq!(other.item_quantity(product(1, 1000).id), 2);
    }

    #[test]
    fn test_update_quantity_zero_equals_remove() {
        let (a, _) = store();
        let (b, _) = store();
        for s in [&a, &b] {
            s.add_item(product(1, 100), 1);
            s.add_item(product(2, 200), 4);
        }
        a.update_quantity(product(2, 200).id, 0);
        b.remove_item(product(2, 200).id);
        assert_eq!(a.items(), b.items());

        // absent id
        a.update_quantity(product(9, 1).id, 0);
        b.remove_item(product(9, 1).id);
        assert_eq!(a.items(), b.items());
    }

    #[test]
    fn test_update_quantity_overwrites() {
        let (store, _) = store();
        store.add_item(product(1, 100), 3);
        store.update_quantity(product(1, 100).id, 7);
        assert_eq!(store.item_quantity(product(1, 100).id), 7);
        store.update_quantity(product(2, 100).id, 7);
        assert!(!store.has_item(product(2, 100).id));
    }

    #[test]
    fn test_invariants_over_operation_sequence() {
        let (store, _) = store();
        let ops: [(u128, i8); 10] = [
            (1, 2),
            (2, 1),
            (1, 1),
            (3, 5),
            (2, -1),
            (3, 0),
            (1, 4),
            (4, 2),
            (4, -1),
            (5, 1),
        ];
        for (n, op) in ops {
            let p = product(n, 100 * n as u64);
            match op {
                -1 => store.remove_item(p.id),
                0 => store.update_quantity(p.id, 0),
                q => store.add_item(p, q as u32),
            }
            let items = store.items();
            let mut ids: Vec<_> = items.iter().map(|i| i.product.id).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), items.len());
            let expected: u64 = items.iter().map(|i| i.product.price * u64::from(i.quantity)).sum();
            assert_eq!(store.total_price(), expected);
        }
        assert_eq!(store.item_quantity(product(1, 100).id), 7);
        assert!(!store.has_item(product(3, 300).id));
    }

    #[test]
    fn test_total_then_clear() {
        let (store, _) = store();
        store.add_item(product(1, 5600), 2);
        assert_eq!(store.total_price(), 11200);
        assert_eq!(store.total_items(), 2);
        store.clear();
        assert_eq!(store.total_price(), 0);
        assert!(store.items().is_empty());
    }
}
