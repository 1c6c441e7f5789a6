//! cloudflare-ddns - point Cloudflare DNS records at the current public IP.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use cloudflare_ddns::config::Config;
use cloudflare_ddns::detector::IpDetector;
use cloudflare_ddns::providers::{CloudflareProvider, DnsProvider};
use cloudflare_ddns::updater::DomainUpdater;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "cloudflare-ddns")]
#[command(about = "Update Cloudflare DNS records to the current public IP")]
#[command(version)]
struct Cli {
    /// The API Token that has the Zone.DNS permission for the specific zone
    #[arg(long, env = "CF_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// The Global (not CA) Cloudflare API Key
    #[arg(long, env = "CF_API_KEY", hide_env_values = true)]
    key: Option<String>,

    /// Email address associated with your Cloudflare account
    #[arg(long, env = "CF_API_EMAIL")]
    email: Option<String>,

    /// Comma separated domain names to update (i.e. mypage.example.com OR example.com)
    #[arg(long, env = "CF_DOMAIN")]
    domain: Option<String>,

    /// Alternative IP address service endpoint [default: https://api.ipify.org/]
    #[arg(long, env = "CF_IP_ENDPOINT")]
    ipendpoint: Option<String>,

    /// Enable debug logging
    #[arg(long, env = "CF_DEBUG")]
    debug: bool,

    /// Enable JSON log output
    #[arg(long, env = "CF_JSON")]
    json: bool,

    /// Path to config file
    #[arg(short, long, env = "CF_DDNS_CONFIG")]
    config: Option<PathBuf>,
}

/// Merge the config file with flags and environment, flags winning.
fn settings(cli: Cli) -> anyhow::Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;

    if cli.token.is_some() {
        config.credentials.token = cli.token;
    }
    if cli.key.is_some() {
        config.credentials.key = cli.key;
    }
    if cli.email.is_some() {
        config.credentials.email = cli.email;
    }
    if let Some(domain) = cli.domain {
        config.domains = vec![domain];
    }
    if let Some(endpoint) = cli.ipendpoint {
        config.ip_endpoint = endpoint;
    }
    config.log.debug |= cli.debug;
    config.log.json |= cli.json;

    if config.domains.is_empty() {
        return Err(Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "the following required arguments were not provided:\n  --domain <DOMAIN>",
            )
            .into());
    }

    Ok(config)
}

async fn run(config: Config) -> anyhow::Result<()> {
    let credentials = config.credentials()?;
    let provider = CloudflareProvider::new(credentials);
    let detector = IpDetector::with_endpoint(config.ip_endpoint.as_str())?;

    tracing::debug!(
        provider = provider.name(),
        endpoint = detector.endpoint(),
        "starting update"
    );

    let updater = DomainUpdater::new(provider, detector);
    let results = updater.run(&config.domain_list()).await?;

    tracing::debug!(updated = results.len(), "all records updated");
    Ok(())
}

/// Process exit status: 0 on success, clap's code for usage errors, 1 otherwise.
fn exit_status(result: &anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => match e.downcast_ref::<clap::Error>() {
            Some(usage) => u8::try_from(usage.exit_code()).unwrap_or(2),
            None => 1,
        },
    }
}

async fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = settings(cli)?;
    config.log.init()?;
    run(config).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let result = execute(Cli::parse()).await;

    if let Err(e) = &result {
        match e.downcast_ref::<clap::Error>() {
            Some(usage) => {
                let _ = usage.print();
            }
            None => {
                tracing::error!(error = %e, "update failed");
                eprintln!("Error: {}", e);
            }
        }
    }

    ExitCode::from(exit_status(&result))
}
