use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::error::{AppError, Result};
use crate::features::categories::models::CategoryKind;

#[derive(Debug, Deserialize, IntoParams)]
pub struct CategoryListQuery {
    /// `risk` or `event`
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// New category label, posted as JSON or as a form
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddCategoryDto {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl AddCategoryDto {
    pub fn parse(&self) -> Result<(CategoryKind, String)> {
        let kind = self.kind.parse()?;
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest(
                "Category name is required".to_string(),
            ));
        }
        Ok((kind, name.to_string()))
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BulkDeleteCategoriesDto {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub names: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryAddedDto {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// False when the label already existed
    pub created: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoriesDeletedDto {
    pub deleted: u64,
}
