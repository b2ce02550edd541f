use clap::Args;
use commissions_app::domain::commission_rates::CommissionRatesService;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct RestoreRateArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Commission rate UUID to restore
    #[arg(long)]
    uuid: Uuid,
}

pub(crate) async fn run(args: RestoreRateArgs) -> Result<(), String> {
    let service = super::connect(&args.database_url).await?;

    service
        .restore_commission_rate(args.uuid.into())
        .await
        .map_err(|error| format!("failed to restore commission rate {}: {error}", args.uuid))?;

    println!("restored commission rate {}", args.uuid);

    Ok(())
}
