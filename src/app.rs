use anyhow::Context;
use axum::Router;
use sqlx::SqlitePool;

use biblio_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// A bootstrapped catalog: settings, pool, and the registered modules
pub struct Catalog {
    settings: Settings,
    pool: SqlitePool,
    registry: ModuleRegistry,
}

impl Catalog {
    /// Connect, apply migrations when configured, and initialize modules
    pub async fn bootstrap(settings: Settings) -> anyhow::Result<Self> {
        let pool = biblio_db::connect(&settings.database).await?;

        let mut registry = ModuleRegistry::new();
        modules::register_all(&mut registry, &pool);

        if settings.database.run_migrations {
            let applied = biblio_db::run_migrations(&pool, &registry.collect_migrations())
                .await
                .context("failed to apply migrations")?;
            tracing::info!(applied, "schema up to date");
        }

        registry
            .init_all(&InitCtx {
                settings: &settings,
            })
            .await?;

        Ok(Self {
            settings,
            pool,
            registry,
        })
    }

    /// The full HTTP router, middleware included
    pub fn router(&self) -> Router {
        biblio_http::build_router(&self.registry, &self.settings)
    }

    /// Serve until ctrl-c, then stop modules and close the pool
    pub async fn serve(self) -> anyhow::Result<()> {
        let ctx = InitCtx {
            settings: &self.settings,
        };
        self.registry.start_all(&ctx).await?;

        biblio_http::start_server(&self.registry, &self.settings, shutdown_signal()).await?;

        self.registry.stop_all().await?;
        self.pool.close().await;
        tracing::info!("biblio-app stopped");
        Ok(())
    }
}

/// Apply pending migrations without starting the server
pub async fn migrate(settings: &Settings) -> anyhow::Result<usize> {
    let pool = biblio_db::connect(&settings.database).await?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &pool);

    let applied = biblio_db::run_migrations(&pool, &registry.collect_migrations()).await?;
    pool.close().await;
    Ok(applied)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
