use serde::{Deserialize, Serialize};

use crate::domain::a001_bouquet::aggregate::BouquetId;

/// Товар, как он хранится в корзине: снимок карточки каталога на момент добавления
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: BouquetId,
    pub name: String,
    /// Цена в рублях
    pub price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Позиция корзины
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketItem {
    pub product: Product,
    pub quantity: u32,
}

impl BasketItem {
    pub fn line_total(&self) -> u64 {
        self.product.price.saturating_mul(u64::from(self.quantity))
    }
}

/// Корзина покупателя.
///
/// Holds at most one item per product id and never an item with zero quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basket {
    #[serde(default)]
    pub items: Vec<BasketItem>,
}

impl Basket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge duplicate product ids and drop empty lines.
    ///
    /// Storage is written by other tabs and older builds, so loaded data is normalized
    /// before use.
    pub fn normalized(self) -> Self {
        let mut basket = Basket::new();
        for item in self.items {
            basket.add(item.product, item.quantity);
        }
        basket
    }

    /// Добавить товар или увеличить количество
    pub fn add(&mut self, product: Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|i| i.product.id == product.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(quantity);
            }
            None => self.items.push(BasketItem { product, quantity }),
        }
    }

    /// Удалить товар. Returns whether anything was removed.
    pub fn remove(&mut self, product_id: BouquetId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product.id != product_id);
        self.items.len() != before
    }

    /// Overwrite the quantity of an existing line; zero removes it.
    /// Returns whether the basket changed.
    pub fn set_quantity(&mut self, product_id: BouquetId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(product_id);
        }
        match self.items.iter_mut().find(|i| i.product.id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn quantity_of(&self, product_id: BouquetId) -> u32 {
        self.items
            .iter()
            .find(|i| i.product.id == product_id)
            .map(|i| i.quantity)
            .unwrap_or(0)
    }

    pub fn contains(&self, product_id: BouquetId) -> bool {
        self.items.iter().any(|i| i.product.id == product_id)
    }

    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    pub fn total_price(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |acc, i| acc.saturating_add(i.line_total()))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
