use blepp_client::ClientConfig;
use blepp_client::cli::{self, Cli};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    blepp_client::tracing::init(args.verbose);

    let config = args.apply_overrides(ClientConfig::load()?);
    tracing::debug!(
        api = %config.api_base_url,
        data_dir = %config.data_dir.display(),
        "Loaded configuration"
    );

    cli::run(args.command, &config).await.inspect_err(|e| {
        tracing::debug!("Command failed: {:?}", e);
    })
}
