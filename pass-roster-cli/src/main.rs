mod cli;
mod config;
mod pass;
mod processor;
mod roster;

use anyhow::Result;
use clap::Parser;
use colored::*;

use crate::cli::Cli;
use crate::config::Config;
use crate::pass::Pass2uClient;
use crate::processor::RosterProcessor;
use crate::roster::XlsxRosterStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // A missing .env is fine, variables may come from the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let config = Config::from_env();
    let client = Pass2uClient::new(&config);
    let store = XlsxRosterStore::new(&cli.file);

    log::info!("Processing roster {}", store.path().display());

    let summary = RosterProcessor::new(&config, &client, &client)
        .run(&store)
        .await?;

    log::info!(
        "Done: {} created, {} already issued, {} invalid dates, {} failed",
        summary.created,
        summary.already_issued,
        summary.invalid_date,
        summary.failed
    );

    let unresolved = summary.invalid_date + summary.failed;
    let status = format!(
        "{}/{} members have a pass link",
        summary.created + summary.already_issued,
        summary.total()
    );
    if unresolved == 0 {
        println!("{}", status.green().bold());
    } else {
        println!(
            "{} ({} unresolved, re-run to retry)",
            status.yellow().bold(),
            unresolved
        );
    }

    Ok(())
}
