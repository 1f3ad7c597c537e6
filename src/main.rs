use anyhow::Context;
use biblio_app::Catalog;
use biblio_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load biblio settings")?;
    biblio_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "biblio-app bootstrap starting"
    );

    let catalog = Catalog::bootstrap(settings).await?;

    tracing::info!("biblio-app bootstrap complete");
    catalog.serve().await
}
