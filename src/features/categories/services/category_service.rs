use sqlx::{Executor, PgPool, Postgres};

use crate::core::error::{AppError, Result};
use crate::features::categories::models::CategoryKind;

/// Service for the risk and event category taxonomies
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Labels of one kind, sorted alphabetically
    pub async fn list(&self, kind: CategoryKind) -> Result<Vec<String>> {
        let sql = format!(
            "SELECT type FROM {} WHERE type IS NOT NULL ORDER BY type ASC",
            kind.table()
        );
        let labels: Vec<String> = sqlx::query_scalar(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list {} categories: {:?}", kind, e);
                AppError::Database(e)
            })?;

        Ok(labels)
    }

    /// Labels of one kind in insertion order, as the mobile picker shows them
    pub async fn list_in_id_order(&self, kind: CategoryKind) -> Result<Vec<String>> {
        let sql = format!(
            "SELECT type FROM {} WHERE type IS NOT NULL ORDER BY id",
            kind.table()
        );
        let labels: Vec<String> = sqlx::query_scalar(&sql).fetch_all(&self.pool).await?;

        Ok(labels)
    }

    /// Add a label unless one with the same name (ignoring case) exists.
    ///
    /// Returns whether a row was inserted.
    pub async fn add(&self, kind: CategoryKind, name: &str) -> Result<bool> {
        let created = insert_if_missing(&self.pool, kind, name).await?;
        if created {
            tracing::info!("Added {} category '{}'", kind, name);
        }
        Ok(created)
    }

    /// Delete labels by exact match
    pub async fn bulk_delete(&self, kind: CategoryKind, names: &[String]) -> Result<u64> {
        if names.is_empty() {
            return Err(AppError::BadRequest(
                "No category names were given".to_string(),
            ));
        }

        let sql = format!("DELETE FROM {} WHERE type = ANY($1)", kind.table());
        let result = sqlx::query(&sql).bind(names).execute(&self.pool).await?;

        tracing::info!("Deleted {} {} categories", result.rows_affected(), kind);
        Ok(result.rows_affected())
    }

    /// Insert the default labels that are missing. Safe to run on every start.
    pub async fn seed_defaults(&self) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for kind in CategoryKind::ALL {
            for label in kind.defaults() {
                if insert_if_missing(&mut *tx, kind, label).await? {
                    inserted += 1;
                }
            }
        }

        tx.commit().await?;

        if inserted > 0 {
            tracing::info!("Seeded {} default categories", inserted);
        }
        Ok(inserted)
    }
}

async fn insert_if_missing<'e, E>(executor: E, kind: CategoryKind, name: &str) -> Result<bool>
where
    E: Executor<'e, Database = Postgres>,
{
    let sql = format!(
        r#"
        INSERT INTO {table} (type)
        SELECT $1
        WHERE NOT EXISTS (SELECT 1 FROM {table} WHERE LOWER(type) = LOWER($1))
        ON CONFLICT (type) DO NOTHING
        "#,
        table = kind.table()
    );

    let result = sqlx::query(&sql).bind(name).execute(executor).await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::lazy_pool;

    #[tokio::test]
    async fn test_bulk_delete_requires_names() {
        let service = CategoryService::new(lazy_pool());
        let result = service.bulk_delete(CategoryKind::Risk, &[]).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_add_same_label_twice_inserts_once(pool: PgPool) {
        let service = CategoryService::new(pool);

        assert!(service.add(CategoryKind::Event, "Forklift collision").await.unwrap());
        assert!(!service.add(CategoryKind::Event, "FORKLIFT COLLISION").await.unwrap());

        let labels = service.list(CategoryKind::Event).await.unwrap();
        assert_eq!(labels, vec!["Forklift collision".to_string()]);
        assert!(service.list(CategoryKind::Risk).await.unwrap().is_empty());
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_seeding_twice_adds_nothing_new(pool: PgPool) {
        let service = CategoryService::new(pool);

        let first = service.seed_defaults().await.unwrap();
        let second = service.seed_defaults().await.unwrap();

        assert!(first > 0);
        assert_eq!(second, 0);
        assert_eq!(
            service.list_in_id_order(CategoryKind::Risk).await.unwrap(),
            CategoryKind::Risk
                .defaults()
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
        );
    }
}
