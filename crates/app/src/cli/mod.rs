use clap::{Parser, Subcommand};

mod rates;

#[derive(Debug, Parser)]
#[command(name = "commissions-app", about = "Commissions CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Rates(rates::RatesCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Rates(command) => rates::run(command).await,
        }
    }
}
