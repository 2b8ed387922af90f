use anyhow::Context;

use fromager_infra::{CatalogRepository, DbConfig, db};

/// Shared handler state: one repository over the connection pool.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub catalog: CatalogRepository,
}

impl AppServices {
    pub fn new(catalog: CatalogRepository) -> Self {
        Self { catalog }
    }
}

/// Connect to the configured database and wire the repository.
pub async fn build_services(config: &DbConfig) -> anyhow::Result<AppServices> {
    let pool = db::connect(config)
        .await
        .with_context(|| format!("failed to open database {}", config.url))?;
    Ok(AppServices::new(CatalogRepository::new(pool)))
}

/// Throwaway in-memory database (dev/test).
pub async fn build_in_memory_services() -> anyhow::Result<AppServices> {
    let pool = db::connect_in_memory()
        .await
        .context("failed to open in-memory database")?;
    Ok(AppServices::new(CatalogRepository::new(pool)))
}
