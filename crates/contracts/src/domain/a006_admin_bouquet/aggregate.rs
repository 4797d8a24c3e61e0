use serde::{Deserialize, Serialize};

/// Paging for `GET /admin/bouquet/`; the list items are
/// [`BouquetListItem`](crate::domain::a001_bouquet::aggregate::BouquetListItem)
/// and include archived bouquets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminBouquetListParams {
    pub limit: u32,
    pub offset: u32,
}

impl Default for AdminBouquetListParams {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
        }
    }
}
