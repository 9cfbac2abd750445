//! Page check repository.
//!
//! Checks are append-only: every fetch of a tracked URL adds one row,
//! and history is read newest first. Failed fetches never reach this
//! repository, so every stored row describes a received response.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};

use super::parse_datetime;
use super::pool::{DbError, DbPool};
use super::records::{LastInsertRowId, NewUrlCheck, UrlCheckRecord};
use crate::models::{PageInfo, UrlCheck};
use crate::schema::url_checks;
use crate::{with_conn, with_conn_split};

/// Convert a database record to a domain model.
impl From<UrlCheckRecord> for UrlCheck {
    fn from(record: UrlCheckRecord) -> Self {
        UrlCheck {
            id: record.id,
            url_id: record.url_id,
            status_code: record.status_code,
            h1: record.h1,
            title: record.title,
            description: record.description,
            created_at: parse_datetime(&record.created_at),
        }
    }
}

/// Repository for page checks.
#[derive(Clone)]
pub struct CheckRepository {
    pool: DbPool,
}

impl CheckRepository {
    /// Create a new check repository with an existing pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Record one check of a tracked URL and return the stored row.
    pub async fn save(&self, url_id: i32, info: &PageInfo) -> Result<UrlCheck, DbError> {
        let info = info.clone();
        let created_at = Utc::now().to_rfc3339();

        let id = with_conn_split!(self.pool,
            sqlite: conn => {
                conn.transaction(|conn| {
                    let info = info.clone();
                    let created_at = created_at.clone();
                    Box::pin(async move {
                        diesel::insert_into(url_checks::table)
                            .values(NewUrlCheck {
                                url_id,
                                status_code: Some(i32::from(info.status_code)),
                                h1: &info.h1,
                                title: &info.title,
                                description: &info.description,
                                created_at: &created_at,
                            })
                            .execute(conn)
                            .await?;

                        diesel::sql_query("SELECT last_insert_rowid()")
                            .get_result::<LastInsertRowId>(conn)
                            .await
                            .map(|row| row.id as i32)
                    })
                })
                .await
            },
            postgres: conn => {
                diesel::insert_into(url_checks::table)
                    .values(NewUrlCheck {
                        url_id,
                        status_code: Some(i32::from(info.status_code)),
                        h1: &info.h1,
                        title: &info.title,
                        description: &info.description,
                        created_at: &created_at,
                    })
                    .returning(url_checks::id)
                    .get_result::<i32>(&mut conn)
                    .await
            }
        )?;

        Ok(UrlCheck {
            id,
            url_id,
            status_code: Some(i32::from(info.status_code)),
            h1: info.h1,
            title: info.title,
            description: info.description,
            created_at: parse_datetime(&created_at),
        })
    }

    /// List every check recorded for a URL, newest first.
    pub async fn list_for_url(&self, url_id: i32) -> Result<Vec<UrlCheck>, DbError> {
        with_conn!(self.pool, conn => {
            url_checks::table
                .filter(url_checks::url_id.eq(url_id))
                .order(url_checks::id.desc())
                .load::<UrlCheckRecord>(&mut conn)
                .await
                .map(|records| records.into_iter().map(UrlCheck::from).collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::context::DbContext;
    use super::*;
    use tempfile::tempdir;

    async fn setup_test_db() -> (DbContext, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");

        let ctx = DbContext::new(&db_path);
        ctx.init_schema().await.unwrap();

        (ctx, dir)
    }

    fn sample_info(status_code: u16, title: &str) -> PageInfo {
        PageInfo {
            status_code,
            h1: "Heading".to_string(),
            title: title.to_string(),
            description: "A page.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_returns_stored_row() {
        let (ctx, _dir) = setup_test_db().await;
        let url_id = ctx.urls().save("https://example.com").await.unwrap();
        let repo = ctx.checks();

        let check = repo.save(url_id, &sample_info(200, "Example")).await.unwrap();

        assert!(check.id > 0);
        assert_eq!(check.url_id, url_id);
        assert_eq!(check.status_code, Some(200));
        assert_eq!(check.title, "Example");
        assert_eq!(check.h1, "Heading");
    }

    #[tokio::test]
    async fn test_list_for_url_newest_first() {
        let (ctx, _dir) = setup_test_db().await;
        let url_id = ctx.urls().save("https://example.com").await.unwrap();
        let repo = ctx.checks();

        let first = repo.save(url_id, &sample_info(301, "Old")).await.unwrap();
        let second = repo.save(url_id, &sample_info(500, "Down")).await.unwrap();
        let third = repo.save(url_id, &sample_info(200, "New")).await.unwrap();

        let history = repo.list_for_url(url_id).await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].id, third.id);
        assert_eq!(history[0].title, "New");
        assert_eq!(history[1].id, second.id);
        assert_eq!(history[2].id, first.id);
    }

    #[tokio::test]
    async fn test_list_for_url_isolated_per_url() {
        let (ctx, _dir) = setup_test_db().await;
        let urls = ctx.urls();
        let repo = ctx.checks();

        let a = urls.save("https://a.example").await.unwrap();
        let b = urls.save("https://b.example").await.unwrap();
        repo.save(a, &sample_info(200, "A")).await.unwrap();

        assert_eq!(repo.list_for_url(a).await.unwrap().len(), 1);
        assert!(repo.list_for_url(b).await.unwrap().is_empty());
    }
}
