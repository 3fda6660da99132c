use actix_web::{web, HttpResponse};
use crate::auth::Identity;
use crate::error::AppError;
use crate::items::models::ItemRequest;
use crate::AppState;
use tracing::{info, warn};

pub async fn list_items(
    _identity: Identity,
    state: web::Data<AppState>,
) -> HttpResponse {
    HttpResponse::Ok().json(state.item_store.list().await)
}

pub async fn create_item(
    identity: Identity,
    req: web::Json<ItemRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    match state.item_store.create(req.text()).await {
        Ok(item) => {
            info!("{} created item {}", identity.username, item.id);
            Ok(HttpResponse::Created().json(item))
        }
        Err(e) => {
            warn!("{} failed to create item: {}", identity.username, e);
            Err(e.into())
        }
    }
}

pub async fn update_item(
    identity: Identity,
    path: web::Path<i64>,
    req: web::Json<ItemRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    match state.item_store.update(id, req.text()).await {
        Ok(item) => {
            info!("{} updated item {}", identity.username, id);
            Ok(HttpResponse::Ok().json(item))
        }
        Err(e) => {
            warn!("{} failed to update item {}: {}", identity.username, id, e);
            Err(e.into())
        }
    }
}

pub async fn delete_item(
    identity: Identity,
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    state.item_store.delete(id).await.map_err(|e| {
        warn!("{} failed to delete item {}: {}", identity.username, id, e);
        AppError::from(e)
    })?;

    info!("{} deleted item {}", identity.username, id);
    Ok(HttpResponse::NoContent().finish())
}

/// Test-only hook that empties the collection. Mounted only when
/// `server.enable_test_routes` is set.
pub async fn reset_items(state: web::Data<AppState>) -> HttpResponse {
    state.item_store.reset().await;
    warn!("Item store reset through test hook");
    HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
}
