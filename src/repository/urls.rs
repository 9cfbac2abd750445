//! Tracked URL repository.
//!
//! URLs are stored in canonical form with a unique constraint on `name`,
//! so every spelling of a site resolves to one row. Inserts run inside a
//! transaction so the generated id always belongs to the row just
//! written.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};

use super::pool::{DbError, DbPool};
use super::records::{LastInsertRowId, NewUrl, UrlRecord};
use super::{parse_datetime, parse_datetime_opt};
use crate::models::{Url, UrlListRow};
use crate::schema::urls;
use crate::{with_conn, with_conn_split};

/// Convert a database record to a domain model.
impl From<UrlRecord> for Url {
    fn from(record: UrlRecord) -> Self {
        Url {
            id: record.id,
            name: record.name,
            created_at: parse_datetime(&record.created_at),
        }
    }
}

/// One row of the URL listing query.
#[derive(QueryableByName)]
struct UrlListRecord {
    #[diesel(sql_type = diesel::sql_types::Integer)]
    id: i32,
    #[diesel(sql_type = diesel::sql_types::Text)]
    name: String,
    #[diesel(sql_type = diesel::sql_types::Text)]
    created_at: String,
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Integer>)]
    check_status_code: Option<i32>,
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    check_created_at: Option<String>,
}

impl From<UrlListRecord> for UrlListRow {
    fn from(record: UrlListRecord) -> Self {
        UrlListRow {
            id: record.id,
            name: record.name,
            created_at: parse_datetime(&record.created_at),
            last_check_at: parse_datetime_opt(record.check_created_at),
            last_status_code: record.check_status_code,
        }
    }
}

/// Listing query: every URL joined to its most recent check, newest
/// URL first. Runs unchanged on both backends.
const LIST_WITH_LATEST_CHECK: &str = "\
    SELECT u.id, u.name, u.created_at, \
           c.status_code AS check_status_code, c.created_at AS check_created_at \
    FROM urls u \
    LEFT JOIN url_checks c ON c.url_id = u.id \
        AND c.id = (SELECT MAX(c2.id) FROM url_checks c2 WHERE c2.url_id = u.id) \
    ORDER BY u.id DESC";

/// Repository for tracked URLs.
#[derive(Clone)]
pub struct UrlRepository {
    pool: DbPool,
}

impl UrlRepository {
    /// Create a new URL repository with an existing pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a URL by ID.
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Url>, DbError> {
        with_conn!(self.pool, conn => {
            urls::table
                .find(id)
                .first::<UrlRecord>(&mut conn)
                .await
                .optional()
                .map(|opt| opt.map(Url::from))
        })
    }

    /// Get a URL by its canonical name.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Url>, DbError> {
        with_conn!(self.pool, conn => {
            urls::table
                .filter(urls::name.eq(name))
                .first::<UrlRecord>(&mut conn)
                .await
                .optional()
                .map(|opt| opt.map(Url::from))
        })
    }

    /// Insert a URL and return its generated id.
    ///
    /// Fails with a unique violation when the name is already stored;
    /// use [`insert_or_get`](Self::insert_or_get) to tolerate duplicates.
    pub async fn save(&self, name: &str) -> Result<i32, DbError> {
        let name = name.to_string();
        let created_at = Utc::now().to_rfc3339();

        with_conn_split!(self.pool,
            sqlite: conn => {
                conn.transaction(|conn| {
                    let name = name.clone();
                    let created_at = created_at.clone();
                    Box::pin(async move {
                        diesel::insert_into(urls::table)
                            .values(NewUrl {
                                name: &name,
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
                diesel::insert_into(urls::table)
                    .values(NewUrl {
                        name: &name,
                        created_at: &created_at,
                    })
                    .returning(urls::id)
                    .get_result::<i32>(&mut conn)
                    .await
            }
        )
    }

    /// Insert a URL, or return the existing row's id when the name is
    /// already stored.
    ///
    /// The second element is `true` when a new row was written.
    pub async fn insert_or_get(&self, name: &str) -> Result<(i32, bool), DbError> {
        let name = name.to_string();
        let created_at = Utc::now().to_rfc3339();

        with_conn_split!(self.pool,
            sqlite: conn => {
                conn.transaction(|conn| {
                    let name = name.clone();
                    let created_at = created_at.clone();
                    Box::pin(async move {
                        let inserted = diesel::insert_into(urls::table)
                            .values(NewUrl {
                                name: &name,
                                created_at: &created_at,
                            })
                            .on_conflict_do_nothing()
                            .execute(conn)
                            .await?;

                        if inserted > 0 {
                            let row = diesel::sql_query("SELECT last_insert_rowid()")
                                .get_result::<LastInsertRowId>(conn)
                                .await?;
                            Ok((row.id as i32, true))
                        } else {
                            let record: UrlRecord = urls::table
                                .filter(urls::name.eq(&name))
                                .first(conn)
                                .await?;
                            Ok((record.id, false))
                        }
                    })
                })
                .await
            },
            postgres: conn => {
                let inserted: Option<i32> = diesel::insert_into(urls::table)
                    .values(NewUrl {
                        name: &name,
                        created_at: &created_at,
                    })
                    .on_conflict_do_nothing()
                    .returning(urls::id)
                    .get_result(&mut conn)
                    .await
                    .optional()?;

                match inserted {
                    Some(id) => Ok((id, true)),
                    None => {
                        let record: UrlRecord = urls::table
                            .filter(urls::name.eq(&name))
                            .first(&mut conn)
                            .await?;
                        Ok((record.id, false))
                    }
                }
            }
        )
    }

    /// List every URL with a summary of its most recent check, newest
    /// first.
    pub async fn list_all(&self) -> Result<Vec<UrlListRow>, DbError> {
        with_conn!(self.pool, conn => {
            diesel::sql_query(LIST_WITH_LATEST_CHECK)
                .load::<UrlListRecord>(&mut conn)
                .await
                .map(|records| records.into_iter().map(UrlListRow::from).collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::context::DbContext;
    use super::*;
    use crate::models::PageInfo;
    use chrono::Datelike;
    use tempfile::tempdir;

    async fn setup_test_db() -> (DbContext, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");

        let ctx = DbContext::new(&db_path);
        ctx.init_schema().await.unwrap();

        (ctx, dir)
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let (ctx, _dir) = setup_test_db().await;
        let repo = ctx.urls();

        let id = repo.save("https://example.com").await.unwrap();
        assert!(id > 0);

        let by_id = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(by_id.name, "https://example.com");
        assert!(by_id.created_at.year() >= 2024);

        let by_name = repo.get_by_name("https://example.com").await.unwrap().unwrap();
        assert_eq!(by_name.id, id);

        assert!(repo.get_by_id(9999).await.unwrap().is_none());
        assert!(repo.get_by_name("https://missing.example").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_duplicate_name_fails() {
        let (ctx, _dir) = setup_test_db().await;
        let repo = ctx.urls();

        repo.save("https://example.com").await.unwrap();
        let err = repo.save("https://example.com").await.unwrap_err();

        assert!(matches!(
            err,
            DbError::DatabaseError(diesel::result::DatabaseErrorKind::UniqueViolation, _)
        ));
    }

    #[tokio::test]
    async fn test_insert_or_get_returns_existing_id() {
        let (ctx, _dir) = setup_test_db().await;
        let repo = ctx.urls();

        let (first_id, inserted) = repo.insert_or_get("https://example.com").await.unwrap();
        assert!(inserted);

        let (second_id, inserted) = repo.insert_or_get("https://example.com").await.unwrap();
        assert!(!inserted);
        assert_eq!(first_id, second_id);

        let (other_id, inserted) = repo.insert_or_get("https://other.example").await.unwrap();
        assert!(inserted);
        assert_ne!(first_id, other_id);
    }

    #[tokio::test]
    async fn test_list_all_newest_first_with_latest_check() {
        let (ctx, _dir) = setup_test_db().await;
        let repo = ctx.urls();
        let checks = ctx.checks();

        let first = repo.save("https://first.example").await.unwrap();
        let second = repo.save("https://second.example").await.unwrap();

        let old = PageInfo {
            status_code: 500,
            h1: String::new(),
            title: String::new(),
            description: String::new(),
        };
        let recent = PageInfo {
            status_code: 200,
            h1: "Hello".to_string(),
            title: "First".to_string(),
            description: String::new(),
        };
        checks.save(first, &old).await.unwrap();
        checks.save(first, &recent).await.unwrap();

        let rows = repo.list_all().await.unwrap();
        assert_eq!(rows.len(), 2);

        // Newest URL first.
        assert_eq!(rows[0].id, second);
        assert!(rows[0].last_check_at.is_none());
        assert!(rows[0].last_status_code.is_none());

        // The older URL carries its most recent check only.
        assert_eq!(rows[1].id, first);
        assert_eq!(rows[1].last_status_code, Some(200));
        assert!(rows[1].last_check_at.is_some());
    }

    #[tokio::test]
    async fn test_list_all_empty() {
        let (ctx, _dir) = setup_test_db().await;
        assert!(ctx.urls().list_all().await.unwrap().is_empty());
    }
}
