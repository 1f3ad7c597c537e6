pub mod categories;
pub mod livres;

use biblio_kernel::ModuleRegistry;
use sqlx::SqlitePool;

/// Register the catalog modules, each wired to the shared pool
pub fn register_all(registry: &mut ModuleRegistry, pool: &SqlitePool) {
    registry.register(categories::create_module(pool.clone()));
    registry.register(livres::create_module(pool.clone()));
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use biblio_kernel::{settings::DatabaseSettings, ModuleRegistry};
    use sqlx::SqlitePool;

    /// In-memory pool with the catalog schema applied
    pub async fn memory_pool() -> SqlitePool {
        migrated_pool("sqlite::memory:".to_string()).await
    }

    /// File-backed pool with the default connection limit, schema applied
    pub async fn file_pool(dir: &Path) -> SqlitePool {
        migrated_pool(format!("sqlite://{}", dir.join("catalog.db").display())).await
    }

    async fn migrated_pool(url: String) -> SqlitePool {
        let settings = DatabaseSettings {
            url,
            ..DatabaseSettings::default()
        };
        let pool = biblio_db::connect(&settings).await.unwrap();

        let mut registry = ModuleRegistry::new();
        super::register_all(&mut registry, &pool);
        biblio_db::run_migrations(&pool, &registry.collect_migrations())
            .await
            .unwrap();

        pool
    }

    pub async fn seed_categorie(pool: &SqlitePool, libelle: &str) -> i64 {
        sqlx::query("INSERT INTO categorie (libelle) VALUES (?)")
            .bind(libelle)
            .execute(pool)
            .await
            .unwrap()
            .last_insert_rowid()
    }
}
