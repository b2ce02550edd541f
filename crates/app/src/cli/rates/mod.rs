use clap::{Args, Subcommand};
use commissions_app::{
    database::{self, DEFAULT_MAX_CONNECTIONS, Db},
    domain::commission_rates::PgCommissionRatesService,
};

mod create;
mod delete;
mod list_active;
mod restore;

#[derive(Debug, Args)]
pub(crate) struct RatesCommand {
    #[command(subcommand)]
    command: RatesSubcommand,
}

#[derive(Debug, Subcommand)]
enum RatesSubcommand {
    Create(create::CreateRateArgs),
    Delete(delete::DeleteRateArgs),
    Restore(restore::RestoreRateArgs),
    ListActive(list_active::ListActiveRatesArgs),
}

pub(crate) async fn run(command: RatesCommand) -> Result<(), String> {
    match command.command {
        RatesSubcommand::Create(args) => create::run(args).await,
        RatesSubcommand::Delete(args) => delete::run(args).await,
        RatesSubcommand::Restore(args) => restore::run(args).await,
        RatesSubcommand::ListActive(args) => list_active::run(args).await,
    }
}

async fn connect(database_url: &str) -> Result<PgCommissionRatesService, String> {
    let pool = database::connect(database_url, DEFAULT_MAX_CONNECTIONS)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    Ok(PgCommissionRatesService::new(Db::new(pool)))
}
