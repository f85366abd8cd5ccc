use sqlx::PgPool;

use crate::core::error::{conflict_on_unique, AppError, Result};
use crate::features::precautions::dtos::{CreatePrecautionDto, PrecautionResponseDto};
use crate::features::precautions::models::Precaution;

const DUPLICATE_TITLE: &str = "A precaution with this title already exists";

/// Service for admin-curated safety precautions
pub struct PrecautionService {
    pool: PgPool,
}

impl PrecautionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<PrecautionResponseDto>> {
        let rows = sqlx::query_as::<_, Precaution>(
            "SELECT id, title, explanation FROM precautions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list precautions: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Insert a precaution whose title is not taken yet (case-insensitive).
    ///
    /// Expects an already trimmed and validated dto. A concurrent insert of the
    /// same title loses on `idx_precautions_title_lower` and is also a `Conflict`.
    pub async fn create(&self, dto: CreatePrecautionDto) -> Result<PrecautionResponseDto> {
        let mut tx = self.pool.begin().await?;

        let duplicate: Option<i32> = sqlx::query_scalar(
            "SELECT id FROM precautions WHERE LOWER(title) = LOWER($1) LIMIT 1",
        )
        .bind(&dto.title)
        .fetch_optional(&mut *tx)
        .await?;

        if duplicate.is_some() {
            return Err(AppError::Conflict(DUPLICATE_TITLE.to_string()));
        }

        let row = sqlx::query_as::<_, Precaution>(
            r#"
            INSERT INTO precautions (title, explanation)
            VALUES ($1, $2)
            RETURNING id, title, explanation
            "#,
        )
        .bind(&dto.title)
        .bind(&dto.explanation)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, DUPLICATE_TITLE))?;

        tx.commit().await?;

        tracing::info!("Precaution created: id={}", row.id);
        Ok(row.into())
    }

    /// Delete the given ids that exist. None of them existing is a `NotFound`.
    pub async fn delete_many(&self, ids: &[i32]) -> Result<u64> {
        if ids.is_empty() {
            return Err(AppError::BadRequest(
                "No precaution ids were given".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let existing: Vec<i32> =
            sqlx::query_scalar("SELECT id FROM precautions WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&mut *tx)
                .await?;

        if existing.is_empty() {
            return Err(AppError::NotFound(
                "No precautions found to delete".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM precautions WHERE id = ANY($1)")
            .bind(&existing)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Deleted {} precautions ({} requested)",
            result.rows_affected(),
            ids.len()
        );
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::lazy_pool;
    use std::sync::Arc;
    use tokio::task::JoinSet;

    fn precaution(title: &str) -> CreatePrecautionDto {
        CreatePrecautionDto {
            title: title.to_string(),
            explanation: "Wear it at all times on site".to_string(),
        }
    }

    #[tokio::test]
    async fn test_delete_with_no_ids_is_bad_request() {
        let service = PrecautionService::new(lazy_pool());
        let result = service.delete_many(&[]).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_duplicate_title_ignoring_case_is_conflict(pool: PgPool) {
        let service = PrecautionService::new(pool);
        service.create(precaution("Hard hat use")).await.unwrap();

        let result = service.create(precaution("HARD HAT USE")).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_concurrent_same_title_inserts_once(pool: PgPool) {
        let service = Arc::new(PrecautionService::new(pool));
        let mut tasks = JoinSet::new();
        for i in 0..8 {
            let service = service.clone();
            let title = if i % 2 == 0 { "Safety goggles" } else { "SAFETY GOGGLES" };
            tasks.spawn(async move { service.create(precaution(title)).await });
        }

        let mut created = 0;
        let mut conflicts = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined.unwrap() {
                Ok(_) => created += 1,
                Err(AppError::Conflict(_)) => conflicts += 1,
                Err(e) => panic!("unexpected error: {}", e),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(conflicts, 7);
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_delete_of_only_missing_ids_is_not_found(pool: PgPool) {
        let service = PrecautionService::new(pool);
        let kept = service.create(precaution("Gloves required")).await.unwrap();

        let result = service.delete_many(&[kept.id + 100, kept.id + 200]).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(service.list().await.unwrap().len(), 1);

        let deleted = service.delete_many(&[kept.id, kept.id + 100]).await.unwrap();
        assert_eq!(deleted, 1);
        assert!(service.list().await.unwrap().is_empty());
    }
}
