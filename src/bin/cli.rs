use clap::{Parser, Subcommand};
use perfectmind_flow::cli::config::Config;
use perfectmind_flow::integrations::{self, perfectmind};
use perfectmind_flow::stream_engine::{ExecutionItem, NodeParameters};
use perfectmind_flow::PerfectMindNode;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use anyhow::{Context, Result, anyhow};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug)]
struct CredentialArgs {
    #[arg(long, env = "PERFECTMIND_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,
    #[arg(long, env = "PERFECTMIND_API_VERSION", default_value = perfectmind::credentials::DEFAULT_API_VERSION)]
    api_version: String,
    #[arg(long, env = "PERFECTMIND_CLIENT_NUMBER", default_value = "")]
    client_number: String,
    #[arg(long, env = "PERFECTMIND_USERNAME", default_value = "")]
    username: String,
    #[arg(long, env = "PERFECTMIND_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,
    #[arg(long, env = "PERFECTMIND_SUBDOMAIN", default_value = "")]
    sub_domain: String,
}

impl CredentialArgs {
    fn into_secrets(self) -> HashMap<String, String> {
        HashMap::from([
            ("apiKey".to_string(), self.api_key),
            ("apiVersion".to_string(), self.api_version),
            ("clientNumber".to_string(), self.client_number),
            ("username".to_string(), self.username),
            ("password".to_string(), self.password),
            ("subDomain".to_string(), self.sub_domain),
        ])
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the node and credential descriptions as JSON
    Describe,
    /// Execute the PerfectMind node once
    Run {
        /// YAML or JSON file with the node parameters
        #[arg(short, long)]
        parameters: PathBuf,
        /// Number of empty input items
        #[arg(long, default_value_t = 1, conflicts_with = "input")]
        items: usize,
        /// JSON array file with input item payloads
        #[arg(long)]
        input: Option<PathBuf>,
        #[command(flatten)]
        credentials: CredentialArgs,
    },
    /// Update the stored CLI settings
    Config {
        #[arg(long)]
        api_host: Option<String>,
        #[arg(long)]
        scheme: Option<String>,
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

fn load_items(input: Option<PathBuf>, count: usize) -> Result<Vec<ExecutionItem>> {
    match input {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read input items from {:?}", path))?;
            let payloads: Vec<Value> = serde_json::from_str(&content)
                .with_context(|| format!("Input file {:?} must hold a JSON array", path))?;
            Ok(payloads.into_iter().map(ExecutionItem::new).collect())
        }
        None => Ok((0..count).map(|_| ExecutionItem::new(json!({}))).collect()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    match args.command {
        Commands::Describe => {
            let description = json!({
                "nodes": perfectmind_flow::node_registry::get_node_registry(),
                "credentials": integrations::get_integration_definitions(),
            });
            println!("{}", serde_json::to_string_pretty(&description)?);
        }
        Commands::Run { parameters, items, input, credentials } => {
            let content = fs::read_to_string(&parameters)
                .with_context(|| format!("Failed to read parameters from {:?}", parameters))?;
            let config: Value = serde_yaml::from_str(&content)?;

            let settings = Config::load()?;
            let node = PerfectMindNode::new(
                perfectmind::PerfectMindCredentials::from_secrets(&credentials.into_secrets()),
                NodeParameters::new(config, &perfectmind::node_description())?,
            )
            .with_endpoint(settings.endpoint())
            .with_client(settings.build_client()?);

            let items = load_items(input, items)?;
            let output = node.execute(&items).await?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Config { api_host, scheme, timeout_secs } => {
            let mut settings = Config::load()?;
            if api_host.is_none() && scheme.is_none() && timeout_secs.is_none() {
                return Err(anyhow!("Nothing to update: pass --api-host, --scheme or --timeout-secs"));
            }
            settings.api_host = api_host.or(settings.api_host);
            settings.scheme = scheme.or(settings.scheme);
            settings.timeout_secs = timeout_secs.or(settings.timeout_secs);
            settings.save()?;
            println!("Saved settings to {}", Config::get_path()?.display());
        }
    }

    Ok(())
}
