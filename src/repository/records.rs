//! Diesel ORM records for database tables.
//!
//! These records provide compile-time type checking for database
//! operations. Timestamps travel as RFC 3339 text and are parsed into
//! `DateTime<Utc>` at the domain boundary.

use diesel::prelude::*;

use crate::schema;

/// Tracked URL record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::urls)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UrlRecord {
    pub id: i32,
    pub name: String,
    pub created_at: String,
}

/// New tracked URL for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::urls)]
pub struct NewUrl<'a> {
    pub name: &'a str,
    pub created_at: &'a str,
}

/// Page check record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::url_checks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UrlCheckRecord {
    pub id: i32,
    pub url_id: i32,
    pub status_code: Option<i32>,
    pub h1: String,
    pub title: String,
    pub description: String,
    pub created_at: String,
}

/// New page check for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::url_checks)]
pub struct NewUrlCheck<'a> {
    pub url_id: i32,
    pub status_code: Option<i32>,
    pub h1: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub created_at: &'a str,
}

/// Row shape of `SELECT last_insert_rowid()` on SQLite.
#[derive(QueryableByName)]
pub(crate) struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::BigInt, column_name = "last_insert_rowid()")]
    pub id: i64,
}
