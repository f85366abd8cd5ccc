use sqlx::FromRow;

/// Database model for a safety precaution
#[derive(Debug, Clone, FromRow)]
pub struct Precaution {
    pub id: i32,
    pub title: Option<String>,
    pub explanation: Option<String>,
}
