//! Букеты в админке: список со снятыми с продажи, архивирование, удаление

use contracts::domain::a001_bouquet::aggregate::{BouquetDetail, BouquetId, BouquetListItem};
use contracts::domain::a006_admin_bouquet::aggregate::AdminBouquetListParams;

use crate::shared::api_utils::{request_json, send, with_query, ApiError, HttpMethod};
use crate::system::auth::context::AuthSession;

pub async fn fetch_bouquets(
    session: AuthSession,
    params: AdminBouquetListParams,
) -> Result<Vec<BouquetListItem>, ApiError> {
    let path = with_query("/admin/bouquet/", &params);
    session
        .run(|token| {
            let path = path.clone();
            async move { request_json(HttpMethod::Get, &path, None, token.as_deref()).await }
        })
        .await
}

pub async fn fetch_bouquet(session: AuthSession, id: BouquetId) -> Result<BouquetDetail, ApiError> {
    let path = format!("/admin/bouquet/{}", id);
    session
        .run(|token| {
            let path = path.clone();
            async move { request_json(HttpMethod::Get, &path, None, token.as_deref()).await }
        })
        .await
}

/// Снять букет с продажи
pub async fn archive_bouquet(session: AuthSession, id: BouquetId) -> Result<(), ApiError> {
    let path = format!("/admin/bouquet/{}/archive", id);
    session
        .run(|token| {
            let path = path.clone();
            async move {
                send(HttpMethod::Post, &path, None, token.as_deref()).await?;
                Ok(())
            }
        })
        .await
}

pub async fn delete_bouquet(session: AuthSession, id: BouquetId) -> Result<(), ApiError> {
    let path = format!("/admin/bouquet/{}", id);
    session
        .run(|token| {
            let path = path.clone();
            async move {
                send(HttpMethod::Delete, &path, None, token.as_deref()).await?;
                Ok(())
            }
        })
        .await
}
