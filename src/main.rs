// AskData - command line entry point

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use askdata::{
    export_filename, format_cell_value, rows_to_csv, synthesize, table_columns, AppState,
    ChartPipeline, ChartSpec, ChatExchange, ChatResponse, CommandResponse, ConfigService,
    RawChatResponse, SettingsUpdate,
};

#[derive(Parser, Debug)]
#[command(name = "askdata")]
#[command(about = "Ask natural-language questions of an analytics service")]
#[command(version)]
struct Cli {
    /// Config file to use instead of ~/.askdata/config.json
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `askdata_charts=trace` (overrides RUST_LOG)
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask one question and print the answer
    Ask {
        question: String,
        /// Print the exchange and chart specification as JSON
        #[arg(long)]
        json: bool,
        /// Also write the result rows as CSV into this directory
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,
    },
    /// Run a saved raw answer (file or stdin) through the chart pipeline
    Normalize {
        /// Raw answer JSON; reads stdin when omitted
        path: Option<PathBuf>,
    },
    /// Show or change the configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Print the config file location
    Path,
    /// Update individual settings
    Set(SetArgs),
    /// Restore the defaults
    Reset,
}

#[derive(Args, Debug)]
struct SetArgs {
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    api_timeout_ms: Option<u64>,
    #[arg(long)]
    enable_debug_logging: Option<bool>,
    #[arg(long)]
    demo_mode: Option<bool>,
    #[arg(long)]
    demo_delay_ms: Option<u64>,
    #[arg(long)]
    accept_unknown_chart_types: Option<bool>,
    #[arg(long)]
    history_limit: Option<usize>,
    /// Proxy URL (`scheme://[user[:pass]@]host:port`), or `none` to clear
    #[arg(long)]
    proxy: Option<String>,
}

impl SetArgs {
    fn into_update(self) -> anyhow::Result<SettingsUpdate> {
        let proxy = match self.proxy.as_deref() {
            None => None,
            Some(arg) => Some(
                SettingsUpdate::proxy_from_arg(arg)
                    .with_context(|| format!("invalid proxy {}", arg))?,
            ),
        };
        Ok(SettingsUpdate {
            api_url: self.api_url,
            api_timeout_ms: self.api_timeout_ms,
            enable_debug_logging: self.enable_debug_logging,
            demo_mode: self.demo_mode,
            demo_delay_ms: self.demo_delay_ms,
            accept_unknown_chart_types: self.accept_unknown_chart_types,
            history_limit: self.history_limit,
            proxy,
        })
    }
}

#[derive(Serialize)]
struct AskOutput<'a> {
    exchange: &'a ChatExchange,
    chart_spec: Option<ChartSpec>,
}

#[derive(Serialize)]
struct NormalizeOutput {
    response: ChatResponse,
    chart_spec: Option<ChartSpec>,
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<ConfigService> {
    let service = match path {
        Some(path) => ConfigService::with_path(path)?,
        None => ConfigService::new()?,
    };
    Ok(service)
}

fn init_tracing(filter: Option<&str>, debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = match filter {
        Some(f) => EnvFilter::new(f),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config_service = load_config(cli.config)?;
    init_tracing(
        cli.log.as_deref(),
        config_service.get_config().enable_debug_logging,
    );

    match cli.cmd {
        Command::Ask {
            question,
            json,
            export,
        } => {
            let state = AppState::new();
            state.initialize_with(config_service).await?;
            let exchange = state.ask(&question).await?;
            let spec = exchange.response.chart_data.as_ref().and_then(synthesize);

            if json {
                let output = CommandResponse::ok(AskOutput {
                    exchange: &exchange,
                    chart_spec: spec,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_exchange(&exchange, spec.as_ref());
            }

            if let Some(dir) = export {
                if !exchange.response.data.is_empty() {
                    let path = dir.join(export_filename());
                    std::fs::write(&path, rows_to_csv(&exchange.response.data))
                        .with_context(|| format!("writing {}", path.display()))?;
                    eprintln!("Exported {} rows to {}", exchange.response.data.len(), path.display());
                }
            }
        }
        Command::Normalize { path } => {
            let text = match path {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let raw: RawChatResponse =
                serde_json::from_str(&text).context("input is not a raw answer object")?;

            let pipeline = ChartPipeline::new(config_service.get_config().validation_options());
            let rows = raw.rows();
            let outcome = pipeline.process(raw.chart_data.as_ref(), &rows);
            let response = ChatResponse::from_raw(raw, outcome.chart);
            let chart_spec = response.chart_data.as_ref().and_then(synthesize);
            println!(
                "{}",
                serde_json::to_string_pretty(&NormalizeOutput {
                    response,
                    chart_spec
                })?
            );
        }
        Command::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                println!("{}", serde_json::to_string_pretty(config_service.get_config())?);
            }
            ConfigAction::Path => println!("{}", config_service.path().display()),
            ConfigAction::Set(args) => {
                let updated = config_service.update_config(args.into_update()?)?;
                println!("{}", serde_json::to_string_pretty(&updated)?);
            }
            ConfigAction::Reset => {
                config_service.reset()?;
                println!("{}", serde_json::to_string_pretty(config_service.get_config())?);
            }
        },
    }

    Ok(())
}

fn print_exchange(exchange: &ChatExchange, spec: Option<&ChartSpec>) {
    let response = &exchange.response;
    println!("{}", exchange.summary());
    if response.is_error() {
        println!("{}", response.message.as_deref().unwrap_or("Unknown error"));
        return;
    }

    if !response.insight.is_empty() {
        println!("\n{}", response.insight);
    }
    if !response.sql_query.is_empty() {
        println!("\nSQL: {}", response.sql_query);
    }

    let columns = table_columns(&response.data);
    if !columns.is_empty() {
        println!("\n{}", columns.join("\t"));
        for row in &response.data {
            let cells: Vec<String> = columns
                .iter()
                .map(|c| row.get(c).map(format_cell_value).unwrap_or_else(|| "-".to_string()))
                .collect();
            println!("{}", cells.join("\t"));
        }
    }

    if let Some(chart) = &response.chart_data {
        println!("\nChart: {}", chart.display_title());
        match spec {
            Some(spec) => {
                for (i, dataset) in spec.datasets().iter().enumerate() {
                    let values = spec
                        .value_labels(i)
                        .map(|labels| labels.join(", "))
                        .unwrap_or_else(|| format!("{} points", dataset.data.len()));
                    println!("  {} [{}]: {}", spec.kind, dataset.label, values);
                }
            }
            None => println!("  pre-rendered image"),
        }
    }
}
