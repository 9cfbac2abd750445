//! HTTP request handlers for the web interface and JSON API.

mod api;
mod pages;
mod static_files;

pub use api::{api_url_detail, api_urls};
pub use pages::{create_check, create_url, index, list_urls, url_detail};
pub use static_files::serve_css;
