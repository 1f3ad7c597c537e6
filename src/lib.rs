//! Library catalog service
//!
//! Books (`livres`) and categories (`categorie`) exposed as HTTP/JSON CRUD
//! over a SQLite store, assembled from the workspace's kernel, db and http
//! crates.

pub mod app;
pub mod modules;

pub use app::Catalog;
