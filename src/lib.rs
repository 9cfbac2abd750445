//! Pagecheck - URL tracking and page check service.
//!
//! Stores normalized URLs and records the result of fetching each one:
//! HTTP status plus the page's h1, title and meta description. Exposes
//! both a web UI and a CLI over the same repositories.

pub mod checker;
pub mod cli;
pub mod config;
pub mod models;
pub mod repository;
pub mod schema;
pub mod server;
pub mod urls;
