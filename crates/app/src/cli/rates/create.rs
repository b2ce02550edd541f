use clap::Args;
use commissions_app::domain::commission_rates::{
    CommissionRatesService, validation::CommissionRateInput,
};

#[derive(Debug, Args)]
pub(crate) struct CreateRateArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Display name, unique across all rates
    #[arg(long)]
    name: String,

    /// Non-negative decimal fee
    #[arg(long, allow_hyphen_values = true)]
    fee: String,

    /// Free-form description
    #[arg(long)]
    description: String,
}

pub(crate) async fn run(args: CreateRateArgs) -> Result<(), String> {
    let rate = CommissionRateInput {
        name: args.name,
        fee: args.fee,
        description: args.description,
    }
    .validate()
    .map_err(|error| format!("invalid {}: {error}", error.field()))?;

    let service = super::connect(&args.database_url).await?;

    let created = service
        .create_commission_rate(rate)
        .await
        .map_err(|error| format!("failed to create commission rate: {error}"))?;

    println!("commission_rate_uuid: {}", created.uuid);
    println!("name: {}", created.name);
    println!("fee: {}", created.fee);
    println!("created_at: {}", created.created_at);

    Ok(())
}
