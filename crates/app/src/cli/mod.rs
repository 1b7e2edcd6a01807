use clap::{Args, Parser, Subcommand};
use storefront::money::StoreCurrency;
use storefront_app::context::AppContext;

mod promotion;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Promotion(promotion::PromotionCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Promotion(command) => promotion::run(command).await,
        }
    }
}

/// Connection settings shared by every subcommand.
#[derive(Debug, Args)]
pub(crate) struct ConnectionArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// ISO 4217 code used to format amounts
    #[arg(long, env = "STORE_CURRENCY", default_value = "VND")]
    currency: String,
}

impl ConnectionArgs {
    pub(crate) async fn connect(&self) -> Result<AppContext, String> {
        let currency = StoreCurrency::from_code(&self.currency).map_err(|error| error.to_string())?;

        AppContext::from_database_url(&self.database_url, currency)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}
