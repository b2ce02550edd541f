use clap::Args;
use commissions_app::domain::commission_rates::CommissionRatesService;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct DeleteRateArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Commission rate UUID to soft-delete
    #[arg(long)]
    uuid: Uuid,
}

pub(crate) async fn run(args: DeleteRateArgs) -> Result<(), String> {
    let service = super::connect(&args.database_url).await?;

    service
        .delete_commission_rate(args.uuid.into())
        .await
        .map_err(|error| format!("failed to delete commission rate {}: {error}", args.uuid))?;

    println!("deleted commission rate {}", args.uuid);

    Ok(())
}
