use anyhow::Context;
use biblio_kernel::settings::Settings;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "biblio", version, about = "Library catalog service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending migrations and serve the HTTP API
    Serve,
    /// Apply pending migrations and exit
    Migrate,
    /// Print the resolved settings as JSON
    Settings,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load biblio settings")?;

    match cli.command {
        Command::Serve => {
            biblio_telemetry::init(&settings.telemetry)?;
            let catalog = biblio_app::Catalog::bootstrap(settings).await?;
            catalog.serve().await
        }
        Command::Migrate => {
            biblio_telemetry::init(&settings.telemetry)?;
            let applied = biblio_app::app::migrate(&settings).await?;
            tracing::info!(applied, "migrations complete");
            println!("applied {applied} migration(s)");
            Ok(())
        }
        Command::Settings => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["biblio", "migrate"]).unwrap();
        assert!(matches!(cli.command, Command::Migrate));
        assert!(Cli::try_parse_from(["biblio"]).is_err());
    }
}
