//! Infrastructure layer: configuration, SQLite pool and the catalog repository.

pub mod catalog;
pub mod config;
pub mod db;

pub use catalog::{CatalogRepository, RepoError, RepoResult};
pub use config::{AppConfig, ConfigError, DbConfig};
