use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{ReportFilter, UpperBound};
use crate::features::reports::models::{NewReport, ReportRow};
use crate::features::users::services::like_pattern;

const REPORT_COLUMNS: &str = r#"
    SELECT r.id, r.user_id, r.type, r.date, r.fullname,
           u.fullname AS reporter_name, r.details, r.witnesses, r.department
    FROM reports r
    LEFT JOIN users u ON r.user_id = u.id
"#;

const REPORT_COUNT: &str = r#"
    SELECT COUNT(*)
    FROM reports r
    LEFT JOIN users u ON r.user_id = u.id
"#;

/// Service for report persistence and the admin listing
pub struct ReportService {
    pool: PgPool,
}

impl ReportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, report: NewReport) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO reports (user_id, type, date, fullname, details, witnesses, department)
            VALUES ($1, $2, NOW(), $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(report.user_id)
        .bind(&report.report_type)
        .bind(&report.fullname)
        .bind(&report.details)
        .bind(&report.witnesses)
        .bind(&report.department)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert report: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Report stored: id={}, type={}, user_id={}",
            id,
            report.report_type,
            report.user_id
        );
        Ok(id)
    }

    /// Filtered page of reports, newest first, with the total matching count
    pub async fn list(
        &self,
        filter: &ReportFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ReportRow>, i64)> {
        let mut count_query = QueryBuilder::<Postgres>::new(REPORT_COUNT);
        push_filters(&mut count_query, filter);
        let total = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut query = page_query(filter, limit, offset);
        let rows = query
            .build_query_as::<ReportRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, total))
    }

    /// Reports submitted at or after `since`, newest first
    pub async fn submitted_since(&self, since: DateTime<Utc>) -> Result<Vec<ReportRow>> {
        let mut query = QueryBuilder::<Postgres>::new(REPORT_COLUMNS);
        query.push(" WHERE r.date >= ").push_bind(since);
        query.push(" ORDER BY r.date DESC");

        let rows = query
            .build_query_as::<ReportRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

fn page_query<'a>(
    filter: &'a ReportFilter,
    limit: i64,
    offset: i64,
) -> QueryBuilder<'a, Postgres> {
    let mut query = QueryBuilder::<Postgres>::new(REPORT_COLUMNS);
    push_filters(&mut query, filter);
    query.push(" ORDER BY r.date DESC, r.id DESC");
    query.push(" LIMIT ").push_bind(limit);
    query.push(" OFFSET ").push_bind(offset);
    query
}

/// Append the WHERE clause, binding every user-supplied value
fn push_filters<'a>(query: &mut QueryBuilder<'a, Postgres>, filter: &'a ReportFilter) {
    let mut prefix = " WHERE ";
    let mut next = |query: &mut QueryBuilder<'a, Postgres>| {
        query.push(prefix);
        prefix = " AND ";
    };

    if let Some(name) = &filter.name {
        next(query);
        query
            .push("LOWER(COALESCE(u.fullname, r.fullname, '')) LIKE LOWER(")
            .push_bind(like_pattern(name))
            .push(")");
    }

    if let Some(report_type) = &filter.report_type {
        next(query);
        query
            .push("LOWER(r.type) = LOWER(")
            .push_bind(report_type.as_str())
            .push(")");
    }

    if let Some(from) = filter.from {
        next(query);
        query.push("r.date >= ").push_bind(from);
    }

    match filter.to {
        Some(UpperBound::Inclusive(to)) => {
            next(query);
            query.push("r.date <= ").push_bind(to);
        }
        Some(UpperBound::Before(to)) => {
            next(query);
            query.push("r.date < ").push_bind(to);
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::models::CreateUser;
    use crate::features::users::services::UserService;
    use crate::shared::constants::{REPORT_TYPE_EMERGENCY, REPORT_TYPE_RISK};
    use crate::shared::types::Page;
    use chrono::TimeZone;

    async fn reporter(pool: &PgPool, fullname: &str, email: &str) -> i32 {
        UserService::new(pool.clone())
            .create(CreateUser {
                fullname: fullname.to_string(),
                email: email.to_string(),
                password_hash: "$argon2id$stub".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    fn report(user_id: i32, fullname: &str, report_type: &str) -> NewReport {
        NewReport {
            user_id,
            report_type: report_type.to_string(),
            fullname: fullname.to_string(),
            details: Some("Departman: Depo | Detaylar: Kablo açık".to_string()),
            witnesses: None,
            department: Some("Depo".to_string()),
        }
    }

    fn normalized(sql: &str) -> String {
        sql.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_no_filters_has_no_where_clause() {
        let filter = ReportFilter::default();
        let query = page_query(&filter, 20, 0);
        let sql = normalized(query.sql());

        assert!(!sql.contains("WHERE"));
        assert!(sql.ends_with("ORDER BY r.date DESC, r.id DESC LIMIT $1 OFFSET $2"));
    }

    #[test]
    fn test_all_filters_are_bound_in_order() {
        let filter = ReportFilter {
            name: Some("ayşe".to_string()),
            report_type: Some("Acil Yardım Sinyali".to_string()),
            from: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            to: Some(UpperBound::Before(
                Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
            )),
        };
        let query = page_query(&filter, 10, 30);
        let sql = normalized(query.sql());

        assert!(sql.contains(
            "WHERE LOWER(COALESCE(u.fullname, r.fullname, '')) LIKE LOWER($1) \
             AND LOWER(r.type) = LOWER($2) AND r.date >= $3 AND r.date < $4"
        ));
        assert!(sql.ends_with("LIMIT $5 OFFSET $6"));
    }

    #[test]
    fn test_inclusive_upper_bound() {
        let filter = ReportFilter {
            to: Some(UpperBound::Inclusive(Utc::now())),
            ..Default::default()
        };
        let mut query = QueryBuilder::<Postgres>::new(REPORT_COUNT);
        push_filters(&mut query, &filter);

        assert!(normalized(query.sql()).ends_with("WHERE r.date <= $1"));
    }

    #[test]
    fn test_user_input_never_reaches_sql_text() {
        let filter = ReportFilter {
            name: Some("x'; DROP TABLE reports; --".to_string()),
            ..Default::default()
        };
        let query = page_query(&filter, 20, 0);
        assert!(!query.sql().contains("DROP TABLE"));
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_listing_pages_through_matching_reports(pool: PgPool) {
        let ayse = reporter(&pool, "Ayşe Yılmaz", "ayse@example.com").await;
        let mehmet = reporter(&pool, "Mehmet Demir", "mehmet@example.com").await;
        let service = ReportService::new(pool);

        for _ in 0..3 {
            service
                .create(report(ayse, "Ayşe Yılmaz", REPORT_TYPE_RISK))
                .await
                .unwrap();
        }
        service
            .create(report(mehmet, "Mehmet Demir", REPORT_TYPE_EMERGENCY))
            .await
            .unwrap();

        let filter = ReportFilter {
            name: Some("ayşe".to_string()),
            ..Default::default()
        };

        let (rows, total) = service.list(&filter, 2, 0).await.unwrap();
        assert_eq!(total, 3);
        let first = Page::new(rows, total, 0);
        assert_eq!(first.items.len(), 2);
        assert!(first.has_more);
        assert_eq!(first.next_offset, 2);
        assert!(first
            .items
            .iter()
            .all(|r| r.reporter_name.as_deref() == Some("Ayşe Yılmaz")));

        let (rows, total) = service.list(&filter, 2, first.next_offset).await.unwrap();
        let second = Page::new(rows, total, first.next_offset);
        assert_eq!(second.items.len(), 1);
        assert!(!second.has_more);

        let mut ids: Vec<i64> = first.items.iter().chain(&second.items).map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);

        let by_type = ReportFilter {
            report_type: Some(REPORT_TYPE_EMERGENCY.to_lowercase()),
            ..Default::default()
        };
        let (rows, total) = service.list(&by_type, 20, 0).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(rows[0].user_id, Some(mehmet));
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_reports_from_one_user_get_distinct_ids(pool: PgPool) {
        let ayse = reporter(&pool, "Ayşe Yılmaz", "ayse@example.com").await;
        let service = ReportService::new(pool);

        let first = service
            .create(report(ayse, "Ayşe Yılmaz", REPORT_TYPE_RISK))
            .await
            .unwrap();
        let second = service
            .create(report(ayse, "Ayşe Yılmaz", REPORT_TYPE_RISK))
            .await
            .unwrap();

        assert_ne!(first, second);
        let recent = service
            .submitted_since(Utc::now() - chrono::Duration::minutes(1))
            .await
            .unwrap();
        assert_eq!(recent.len(), 2);
    }
}
