//! Favorite routes. All require authentication.

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use sb_shared::types::ApiResponse;

use crate::dto::{AddFavoriteRequest, FavoriteStatusResponse};
use crate::error::ApiError;
use crate::middleware::{AuthContext, JwtAuth};
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/favorites")
            .wrap(JwtAuth)
            .route("", web::get().to(list_favorites))
            .route("", web::post().to(add_favorite))
            .route("/room/{room_id}", web::get().to(favorite_status))
            .route("/room/{room_id}", web::delete().to(remove_by_room))
            .route("/{id}", web::delete().to(remove_favorite)),
    );
}

/// GET /api/v1/favorites
async fn list_favorites(
    state: web::Data<AppState>,
    ctx: AuthContext,
) -> Result<HttpResponse, ApiError> {
    let items = state.favorite_service.list(ctx.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(items)))
}

/// POST /api/v1/favorites
async fn add_favorite(
    state: web::Data<AppState>,
    ctx: AuthContext,
    payload: web::Json<AddFavoriteRequest>,
) -> Result<HttpResponse, ApiError> {
    let favorite = state
        .favorite_service
        .add(ctx.user_id, payload.room_id)
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(favorite)))
}

/// GET /api/v1/favorites/room/{room_id}
async fn favorite_status(
    state: web::Data<AppState>,
    ctx: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let room_id = path.into_inner();
    let is_favorite = state.favorite_service.is_favorite(ctx.user_id, room_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(FavoriteStatusResponse {
        room_id,
        is_favorite,
    })))
}

/// DELETE /api/v1/favorites/room/{room_id}
async fn remove_by_room(
    state: web::Data<AppState>,
    ctx: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    state
        .favorite_service
        .remove_by_room(ctx.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Favorite removed")))
}

/// DELETE /api/v1/favorites/{id}
async fn remove_favorite(
    state: web::Data<AppState>,
    ctx: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    state
        .favorite_service
        .remove(ctx.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Favorite removed")))
}
