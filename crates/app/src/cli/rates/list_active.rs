use clap::Args;
use commissions_app::domain::commission_rates::CommissionRatesService;

#[derive(Debug, Args)]
pub(crate) struct ListActiveRatesArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ListActiveRatesArgs) -> Result<(), String> {
    let service = super::connect(&args.database_url).await?;

    let rates = service
        .list_active_commission_rates()
        .await
        .map_err(|error| format!("failed to list commission rates: {error}"))?;

    if rates.is_empty() {
        println!("no active commission rates");
        return Ok(());
    }

    for rate in rates {
        println!("commission_rate_uuid: {}", rate.uuid);
        println!("name: {}", rate.name);
        println!("fee: {}", rate.fee);
        println!("description: {}", rate.description);
        println!("updated_at: {}", rate.updated_at);
        println!();
    }

    Ok(())
}
