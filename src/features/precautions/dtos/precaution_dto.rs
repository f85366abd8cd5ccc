use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::precautions::models::Precaution;

/// New precaution, posted as JSON or as an urlencoded form
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePrecautionDto {
    #[validate(length(min = 5, max = 200, message = "Title must be 5-200 characters"))]
    #[serde(default)]
    pub title: String,

    #[validate(length(min = 10, max = 1000, message = "Explanation must be 10-1000 characters"))]
    #[serde(default)]
    pub explanation: String,
}

impl CreatePrecautionDto {
    /// Surrounding whitespace does not count toward the length limits
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            explanation: self.explanation.trim().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletePrecautionsDto {
    #[serde(default)]
    pub ids: Vec<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedPrecautionsDto {
    pub deleted_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrecautionResponseDto {
    pub id: i32,
    pub title: String,
    pub explanation: String,
}

impl From<Precaution> for PrecautionResponseDto {
    fn from(p: Precaution) -> Self {
        Self {
            id: p.id,
            title: p.title.unwrap_or_default(),
            explanation: p.explanation.unwrap_or_default(),
        }
    }
}
