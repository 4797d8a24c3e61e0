use contracts::domain::a001_bouquet::aggregate::{
    BouquetDetail, BouquetId, BouquetListItem, BouquetSearchParams, BouquetType, FlowerType,
};

use crate::shared::api_utils::{append_repeated, request_json, with_query, ApiError, HttpMethod};

/// Path of the catalog search, type filters as repeated keys
pub fn search_path(params: &BouquetSearchParams) -> String {
    let path = with_query("/api/v1/bouquet/search", params);
    let path = append_repeated(path, "bouquet_type_ids", &params.bouquet_type_ids);
    append_repeated(path, "flower_type_ids", &params.flower_type_ids)
}

/// Каталог букетов (публичный, без авторизации)
pub async fn search_bouquets(params: &BouquetSearchParams) -> Result<Vec<BouquetListItem>, ApiError> {
    request_json(HttpMethod::Get, &search_path(params), None, None).await
}

pub async fn fetch_bouquet(id: BouquetId) -> Result<BouquetDetail, ApiError> {
    let path = format!("/api/v1/bouquet/{}", id);
    request_json(HttpMethod::Get, &path, None, None).await
}

pub async fn fetch_bouquet_types() -> Result<Vec<BouquetType>, ApiError> {
    request_json(HttpMethod::Get, "/api/v1/bouquet/types", None, None).await
}

pub async fn fetch_flower_types() -> Result<Vec<FlowerType>, ApiError> {
    request_json(HttpMethod::Get, "/api/v1/flower/", None, None).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_search_path_repeats_type_ids() {
        let params = BouquetSearchParams {
            price_min: Some(1000),
            bouquet_type_ids: vec![Uuid::from_u128(1)],
            flower_type_ids: vec![Uuid::from_u128(2), Uuid::from_u128(3)],
            ..Default::default()
        };
        assert_eq!(
            search_path(&params),
            "/api/v1/bouquet/search?price_min=1000&limit=20&offset=0\
             &bouquet_type_ids=00000000-0000-0000-0000-000000000001\
             &flower_type_ids=00000000-0000-0000-0000-000000000002\
             &flower_type_ids=00000000-0000-0000-0000-000000000003"
        );
    }
}
