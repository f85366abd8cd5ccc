use sqlx::{PgPool, Postgres, Transaction};

use crate::core::error::{conflict_on_unique, AppError, Result};
use crate::features::users::models::{CreateUser, User, UserSummary};
use crate::shared::constants::{MIN_USER_SEARCH_LEN, USER_SEARCH_LIMIT};

const EMAIL_REGISTERED: &str = "This email address is already registered";
const EMAIL_TAKEN: &str = "This email address is used by another user";

/// Service for user account persistence
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by email, ignoring case
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, fullname, email, password, role
            FROM users
            WHERE LOWER(email) = LOWER($1)
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to find user by email: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, fullname, email, password, role FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Insert a new user, rejecting an email that is already registered.
    ///
    /// The duplicate check and the insert share one transaction. A concurrent
    /// registration of the same email loses on `idx_users_email_lower`.
    pub async fn create(&self, data: CreateUser) -> Result<User> {
        let mut tx = self.pool.begin().await?;

        if Self::email_exists(&mut tx, &data.email, None).await? {
            return Err(AppError::Conflict(EMAIL_REGISTERED.to_string()));
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (fullname, email, password, role)
            VALUES ($1, $2, $3, FALSE)
            RETURNING id, fullname, email, password, role
            "#,
        )
        .bind(&data.fullname)
        .bind(&data.email)
        .bind(&data.password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, EMAIL_REGISTERED))?;

        tx.commit().await?;

        tracing::info!("User registered: id={}", user.id);
        Ok(user)
    }

    /// Change email and password together (profile form).
    pub async fn update_credentials(
        &self,
        user_id: i32,
        email: &str,
        password_hash: &str,
    ) -> Result<User> {
        let mut tx = self.pool.begin().await?;

        if Self::email_exists(&mut tx, email, Some(user_id)).await? {
            return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET email = $1, password = $2
            WHERE id = $3
            RETURNING id, fullname, email, password, role
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, EMAIL_TAKEN))?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        tx.commit().await?;
        Ok(user)
    }

    pub async fn update_email(&self, user_id: i32, email: &str) -> Result<User> {
        let mut tx = self.pool.begin().await?;

        if Self::email_exists(&mut tx, email, Some(user_id)).await? {
            return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET email = $1
            WHERE id = $2
            RETURNING id, fullname, email, password, role
            "#,
        )
        .bind(email)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, EMAIL_TAKEN))?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        tx.commit().await?;
        Ok(user)
    }

    pub async fn update_password(&self, user_id: i32, password_hash: &str) -> Result<()> {
        let result = sqlx::query("UPDATE users SET password = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }
        Ok(())
    }

    /// Search users by name for the witness picker.
    ///
    /// Queries shorter than two characters return nothing.
    pub async fn search(&self, query: &str) -> Result<Vec<UserSummary>> {
        let query = query.trim();
        if query.chars().count() < MIN_USER_SEARCH_LEN {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT id, fullname
            FROM users
            WHERE LOWER(fullname) LIKE LOWER($1)
            ORDER BY fullname
            LIMIT $2
            "#,
        )
        .bind(like_pattern(query))
        .bind(USER_SEARCH_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Grant the admin flag to the account with the given email.
    ///
    /// Returns false when no such account exists.
    pub async fn promote_to_admin(&self, email: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET role = TRUE WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn email_exists(
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool> {
        let exists: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT 1 FROM users
            WHERE LOWER(email) = LOWER($1) AND ($2::INT IS NULL OR id <> $2)
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(exists.is_some())
    }
}

/// Build a `LIKE` substring pattern, escaping the wildcard characters in the input.
pub fn like_pattern(input: &str) -> String {
    let escaped = input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
