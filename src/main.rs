mod api;
mod cache;
mod config;
mod ddns;
#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use api::{DnsApiClient, PorkbunClient};
use cache::PrevIpStore;
use clap::Parser;
use config::Cli;
use ddns::Ddns;
use log::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let settings = cli.settings();
    let secrets = config::load_secrets_or_default(&settings.secrets_path);
    let client = PorkbunClient::new(settings.base_url, secrets);

    if cli.is_ping() {
        let ip = client.ping().await.context("ping failed")?;
        println!("your ip is {}", ip);
        return Ok(());
    }

    info!("Checking A records for {}", cli.target);
    let mut ddns = Ddns::new(client, PrevIpStore::new(settings.cache_path), cli.target);
    ddns.run().await?;
    Ok(())
}
