use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tower_cookies::Cookies;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Category, Program};
use crate::moderation::ROLE_ADMIN;
use crate::routes::current_user;
use crate::store::CatalogStore;
use crate::InnerState;

/// How many programs a category page shows, newest first.
const CATEGORY_SHOWCASE_LIMIT: i64 = 3;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    pub category: Category,
    pub programs: Vec<Program>,
}

pub async fn all_categories(
    State(inner): State<InnerState>,
) -> Result<Json<Vec<Category>>, AppError> {
    let InnerState { db, .. } = inner;

    let categories = db.categories().await.map_err(AppError::Database)?;

    Ok(Json(categories))
}

#[tracing::instrument(name = "Create category", skip(cookies, inner, payload))]
pub async fn create_category(
    cookies: Cookies,
    State(inner): State<InnerState>,
    Json(payload): Json<CategoryPayload>,
) -> Result<Json<Category>, AppError> {
    let InnerState { db, .. } = inner;

    let user = current_user(&cookies, &db).await?;
    if user.role != ROLE_ADMIN {
        return Err(AppError::AccessDenied {
            action: "create category".to_string(),
        });
    }

    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(
            "category name must not be empty".to_string(),
        ));
    }

    if db
        .category_by_name(name)
        .await
        .map_err(AppError::Database)?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "category {} already exists",
            name
        )));
    }

    let category = db
        .insert_category(&Category {
            id: Some(Uuid::new_v4().to_string()),
            created_at: None,
            updated_at: None,
            name: name.to_string(),
        })
        .await
        .map_err(AppError::Database)?;

    tracing::debug!(
        "category id {:?} category name {}",
        category.id,
        category.name
    );

    Ok(Json(category))
}

pub async fn show_category(
    State(inner): State<InnerState>,
    Path(name): Path<String>,
) -> Result<Json<CategoryDetail>, AppError> {
    let InnerState { db, .. } = inner;

    let category = db
        .category_by_name(&name)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::not_found("category", name.clone()))?;

    let category_id = category.id.clone().unwrap_or_default();
    let programs = db
        .latest_programs_in_category(&category_id, CATEGORY_SHOWCASE_LIMIT)
        .await
        .map_err(AppError::Database)?;

    Ok(Json(CategoryDetail { category, programs }))
}
