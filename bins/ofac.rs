use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgGroup, Args, Parser, Subcommand};
use client::{RemoteDataClient, SearchQuery};
use dotenvy::dotenv;
use models::SearchResponse;
use tracing::{error, info};
use uuid::Uuid;

/// Query the OFAC search backend from the command line.
#[derive(Debug, Parser)]
#[command(name = "ofac", version, about)]
struct Cli {
    /// Path to a TOML config file (defaults to $CONFIG_PATH or config.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Backend base URL, overriding config and OFAC_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Print client metrics to stderr after the call
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search SDNs, alternate names, addresses and denied persons
    Search(SearchArgs),
    /// Alternate names of an SDN
    Alts { sdn_id: String },
    /// Addresses of an SDN
    Addresses { sdn_id: String },
    /// Known SDN types
    SdnTypes,
    /// Known sanction programs
    Programs,
}

#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("fields")
        .multiple(true)
        .args([
            "q", "id", "name", "alt_name", "address", "city", "state", "providence", "zip",
            "country", "limit",
        ])
))]
struct SearchArgs {
    /// Send this query string as-is instead of building one from flags
    #[arg(long, conflicts_with = "fields")]
    raw: Option<String>,
    #[arg(long)]
    q: Option<String>,
    /// ID from an SDN's remarks
    #[arg(long)]
    id: Option<String>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    alt_name: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    providence: Option<String>,
    #[arg(long)]
    zip: Option<String>,
    #[arg(long)]
    country: Option<String>,
    #[arg(long)]
    limit: Option<u32>,
}

impl SearchArgs {
    fn query_string(&self) -> String {
        if let Some(raw) = &self.raw {
            return raw.clone();
        }
        let query = SearchQuery {
            q: self.q.clone(),
            id: self.id.clone(),
            name: self.name.clone(),
            alt_name: self.alt_name.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            providence: self.providence.clone(),
            zip: self.zip.clone(),
            country: self.country.clone(),
            limit: self.limit,
        };
        query.to_query_string()
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<configs::AppConfig> {
    let mut cfg = match &cli.config {
        // An explicit path must exist.
        Some(p) => configs::load_from_file(p).with_context(|| format!("loading {p}"))?,
        None => configs::load_or_default(&configs::config_path())?,
    };
    if let Some(url) = &cli.base_url {
        cfg.client.base_url = url.clone();
    }
    cfg.normalize_and_validate()?;
    Ok(cfg)
}

/// A search the backend rejected comes back as a body with only `error`
/// set; that is a failure, not an empty result.
fn search_output(resp: SearchResponse) -> anyhow::Result<serde_json::Value> {
    if let Some(err) = &resp.error {
        anyhow::bail!("backend rejected search: {err}");
    }
    Ok(serde_json::to_value(resp)?)
}

async fn run(cli: &Cli, client: &RemoteDataClient) -> anyhow::Result<serde_json::Value> {
    let value = match &cli.command {
        Command::Search(args) => {
            let qs = args.query_string();
            info!(event = "search", query = %qs, "searching");
            search_output(client.search(&qs).await?)?
        }
        Command::Alts { sdn_id } => serde_json::to_value(client.get_sdn_alts(sdn_id).await?)?,
        Command::Addresses { sdn_id } => {
            serde_json::to_value(client.get_sdn_addresses(sdn_id).await?)?
        }
        Command::SdnTypes => serde_json::to_value(client.get_sdn_types("").await?)?,
        Command::Programs => serde_json::to_value(client.get_programs("").await?)?,
    };
    Ok(value)
}

fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();

    let cfg = match load_config(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    if cli.json_logs {
        common::utils::logging::init_logging_json();
    } else {
        common::utils::logging::init_logging(&cfg.logging.format);
    }

    let run_id = Uuid::new_v4();
    info!(
        event = "start",
        %run_id,
        base_url = %cfg.client.base_url,
        version = env!("CARGO_PKG_VERSION"),
        "ofac client starting"
    );

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    let exit_code = rt.block_on(async {
        let client = match RemoteDataClient::new(&cfg.client) {
            Ok(c) => c,
            Err(e) => {
                error!(event = "client_build_failed", error = %e, "failed to build client");
                return ExitCode::FAILURE;
            }
        };
        match run(&cli, &client).await {
            Ok(value) => match serde_json::to_string_pretty(&value) {
                Ok(text) => {
                    println!("{text}");
                    info!(event = "stop", %run_id, "request completed");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!(event = "encode_failed", error = %e, "cannot render response");
                    ExitCode::FAILURE
                }
            },
            Err(e) => {
                error!(event = "request_failed", %run_id, error = %e, "request failed");
                ExitCode::FAILURE
            }
        }
    });

    if cli.metrics {
        match common::observability::encode_metrics() {
            Ok(text) => eprintln!("{text}"),
            Err(e) => error!(event = "metrics_failed", error = %e, "cannot encode metrics"),
        }
    }
    exit_code
}
