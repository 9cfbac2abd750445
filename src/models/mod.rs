//! Data models for tracked URLs and their checks.

mod check;
mod url;

pub use check::{PageInfo, UrlCheck};
pub use url::{Url, UrlListRow};
