use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, JsonOrForm};
use crate::features::auth::guards::RequireAdmin;
use crate::features::categories::dtos::{
    AddCategoryDto, BulkDeleteCategoriesDto, CategoriesDeletedDto, CategoryAddedDto,
    CategoryListQuery,
};
use crate::features::categories::models::CategoryKind;
use crate::features::categories::services::CategoryService;
use crate::shared::types::{ApiResponse, Meta};

/// List category labels of one kind
#[utoipa::path(
    get,
    path = "/api/categories",
    params(CategoryListQuery),
    responses(
        (status = 200, description = "Labels sorted alphabetically", body = ApiResponse<Vec<String>>),
        (status = 400, description = "Invalid category type")
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    Query(query): Query<CategoryListQuery>,
) -> Result<Json<ApiResponse<Vec<String>>>> {
    let kind: CategoryKind = query.kind.parse()?;
    let labels = service.list(kind).await?;
    let total = labels.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(labels),
        None,
        Some(Meta { total }),
    )))
}

/// Event labels for the mobile report form
#[utoipa::path(
    get,
    path = "/api/mobile-event-categories",
    responses(
        (status = 200, description = "Event labels in creation order", body = ApiResponse<Vec<String>>),
    ),
    tag = "categories"
)]
pub async fn list_mobile_event_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<String>>>> {
    let labels = service.list_in_id_order(CategoryKind::Event).await?;
    Ok(Json(ApiResponse::success(Some(labels), None, None)))
}

/// Add a category (admin). Adding an existing label succeeds without a new row.
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = AddCategoryDto,
    responses(
        (status = 200, description = "Category present", body = ApiResponse<CategoryAddedDto>),
        (status = 400, description = "Invalid type or empty name"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_category(
    State(service): State<Arc<CategoryService>>,
    RequireAdmin(_admin): RequireAdmin,
    JsonOrForm(dto): JsonOrForm<AddCategoryDto>,
) -> Result<Json<ApiResponse<CategoryAddedDto>>> {
    let (kind, name) = dto.parse()?;
    let created = service.add(kind, &name).await?;

    let message = if created {
        "Category added"
    } else {
        "Category already exists"
    };
    Ok(Json(ApiResponse::success(
        Some(CategoryAddedDto {
            name,
            kind: kind.to_string(),
            created,
        }),
        Some(message.to_string()),
        None,
    )))
}

/// Delete categories by exact label (admin)
#[utoipa::path(
    post,
    path = "/api/categories/bulk-delete",
    request_body = BulkDeleteCategoriesDto,
    responses(
        (status = 200, description = "Matching labels deleted", body = ApiResponse<CategoriesDeletedDto>),
        (status = 400, description = "Invalid type or empty names"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn bulk_delete_categories(
    State(service): State<Arc<CategoryService>>,
    RequireAdmin(_admin): RequireAdmin,
    AppJson(dto): AppJson<BulkDeleteCategoriesDto>,
) -> Result<Json<ApiResponse<CategoriesDeletedDto>>> {
    let kind: CategoryKind = dto.kind.parse()?;
    let deleted = service.bulk_delete(kind, &dto.names).await?;
    Ok(Json(ApiResponse::success(
        Some(CategoriesDeletedDto { deleted }),
        None,
        None,
    )))
}
