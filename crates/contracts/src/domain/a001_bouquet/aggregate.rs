use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::a002_basket::aggregate::Product;
use crate::domain::common::AggregateId;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор букета
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BouquetId(pub Uuid);

impl BouquetId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }
}

impl AggregateId for BouquetId {
    fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    fn uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for BouquetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// Catalog DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BouquetImage {
    pub id: Uuid,
    pub image_path: String,
    pub order: i32,
}

/// Букет в выдаче каталога (`GET /api/v1/bouquet/search`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BouquetListItem {
    pub id: BouquetId,
    pub name: String,
    /// Цена в рублях
    pub price: u64,
    #[serde(default)]
    pub main_image: Option<BouquetImage>,
}

impl BouquetListItem {
    /// Snapshot of the bouquet as the basket stores it
    pub fn to_product(&self) -> Product {
        Product {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            image: self.main_image.as_ref().map(|img| img.image_path.clone()),
        }
    }
}

/// Тип букета (`GET /api/v1/bouquet/types`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BouquetType {
    pub id: Uuid,
    pub name: String,
}

/// Вид цветов (`GET /api/v1/flower/`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowerType {
    pub id: Uuid,
    pub name: String,
}

/// Карточка букета (`GET /api/v1/bouquet/{id}`, `GET /admin/bouquet/{id}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BouquetDetail {
    pub id: BouquetId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: u64,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub purchase_count: u32,
    #[serde(default)]
    pub view_count: u32,
    #[serde(default)]
    pub bouquet_type: Option<BouquetType>,
    #[serde(default)]
    pub flower_types: Vec<FlowerType>,
    #[serde(default)]
    pub images: Vec<BouquetImage>,
    /// Only the admin endpoint sends it
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl BouquetDetail {
    /// Images in display order
    pub fn sorted_images(&self) -> Vec<BouquetImage> {
        let mut images = self.images.clone();
        images.sort_by_key(|img| img.order);
        images
    }

    pub fn flower_names(&self) -> String {
        self.flower_types
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn to_product(&self) -> Product {
        Product {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            image: self.sorted_images().into_iter().next().map(|img| img.image_path),
        }
    }
}

/// Query parameters for the catalog search
///
/// The type filters are sent as repeated keys (`flower_type_ids=a&flower_type_ids=b`),
/// which serde_qs does not produce, so they are skipped here and appended by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BouquetSearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<u64>,
    pub limit: u32,
    pub offset: u32,
    #[serde(skip)]
    pub bouquet_type_ids: Vec<Uuid>,
    #[serde(skip)]
    pub flower_type_ids: Vec<Uuid>,
}

impl Default for BouquetSearchParams {
    fn default() -> Self {
        Self {
            price_min: None,
            price_max: None,
            limit: 20,
            offset: 0,
            bouquet_type_ids: Vec::new(),
            flower_type_ids: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_item_without_image() {
        let json = r#"{"id":"6f1c1d3e-4f4e-4b8e-9a55-1b1a3c2d4e5f","name":"Пионы","price":5600,"main_image":null}"#;
        let item: BouquetListItem = serde_json::from_str(json).unwrap();
        let product = item.to_product();
        assert_eq!(product.name, "Пионы");
        assert_eq!(product.price, 5600);
        assert_eq!(product.image, None);
    }

    #[test]
    fn test_list_item_takes_main_image_path() {
        let json = r#"{
            "id":"6f1c1d3e-4f4e-4b8e-9a55-1b1a3c2d4e5f",
            "name":"Розы",
            "price":3200,
            "main_image":{"id":"0b7a8c4e-2d1f-4a3b-8c5d-6e7f8a9b0c1d","image_path":"/static/roses.webp","order":0}
        }"#;
        let item: BouquetListItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.to_product().image.as_deref(), Some("/static/roses.webp"));
    }

    #[test]
    fn test_detail_product_uses_first_image_by_order() {
        let json = r#"{
            "id":"6f1c1d3e-4f4e-4b8e-9a55-1b1a3c2d4e5f",
            "name":"Тюльпаны",
            "description":null,
            "price":2500,
            "quantity":4,
            "purchase_count":10,
            "view_count":120,
            "bouquet_type":{"id":"0b7a8c4e-2d1f-4a3b-8c5d-6e7f8a9b0c1d","name":"Моно"},
            "flower_types":[
                {"id":"1b7a8c4e-2d1f-4a3b-8c5d-6e7f8a9b0c1d","name":"Тюльпан"},
                {"id":"2b7a8c4e-2d1f-4a3b-8c5d-6e7f8a9b0c1d","name":"Эвкалипт"}
            ],
            "images":[
                {"id":"3b7a8c4e-2d1f-4a3b-8c5d-6e7f8a9b0c1d","image_path":"/static/b.webp","order":2},
                {"id":"4b7a8c4e-2d1f-4a3b-8c5d-6e7f8a9b0c1d","image_path":"/static/a.webp","order":1}
            ]
        }"#;
        let detail: BouquetDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.is_active, None);
        assert_eq!(detail.flower_names(), "Тюльпан, Эвкалипт");
        assert_eq!(detail.to_product().image.as_deref(), Some("/static/a.webp"));
    }

    #[test]
    fn test_type_filters_not_in_serialized_params() {
        let params = BouquetSearchParams {
            flower_type_ids: vec![Uuid::nil()],
            ..Default::default()
        };
        let value = serde_json::to_value(&params).unwrap();
        assert!(value.get("flower_type_ids").is_none());
        assert_eq!(value["limit"], 20);
    }

    #[test]
    fn test_bouquet_id_from_string() {
        assert!(BouquetId::from_string("not-a-uuid").is_err());
        let id = BouquetId::from_string("6f1c1d3e-4f4e-4b8e-9a55-1b1a3c2d4e5f").unwrap();
        assert_eq!(id.as_string(), "6f1c1d3e-4f4e-4b8e-9a55-1b1a3c2d4e5f");
    }
}
