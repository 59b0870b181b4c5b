//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::simulated_executor::SimulatedExecutor;
use crate::adapters::synthetic_adapter::SyntheticAdapter;
use crate::domain::app_config::{AppConfig, DataSource, SyntheticConfig};
use crate::domain::config_validation::{
    optional_f64, optional_i64, provider, required_date, strategy_kind, validate_config,
    validate_data_config,
};
use crate::domain::error::TradekitError;
use crate::domain::execution::ExecutionConfig;
use crate::domain::format::{format_currency, format_percentage, format_signed_currency};
use crate::domain::order::OrderStatus;
use crate::domain::pipeline::{self, RunReport, RunRequest};
use crate::domain::strategy::{StrategyConfig, build_strategy};
use crate::domain::time_range::TimeRange;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::execution_port::ExecutionPort;

#[derive(Parser, Debug)]
#[command(name = "tradekit", about = "Trading strategy experimentation tool")]
pub struct Cli {
    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch data, run the strategy once and execute its decision
    Run {
        #[arg(short, long)]
        config: PathBuf,
        /// Overrides [run] symbol
        #[arg(long)]
        symbol: Option<String>,
        /// Submit the order without simulating a fill
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols available from the configured provider
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Install the stderr tracing subscriber. Safe to call more than once.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "tradekit=debug" } else { "tradekit=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    let outcome = match cli.command {
        Command::Run {
            config,
            symbol,
            dry_run,
        } => run_command(&config, symbol.as_deref(), dry_run),
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { config } => run_list_symbols(&config),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, TradekitError> {
    tracing::info!(path = %path.display(), "loading config");
    FileConfigAdapter::from_file(path)
}

/// Validate the whole file, then convert it into an [`AppConfig`].
pub fn build_app_config(
    config: &dyn ConfigPort,
    symbol_override: Option<&str>,
) -> Result<AppConfig, TradekitError> {
    validate_config(config)?;

    let start = required_date(config, "data", "start")?;
    let end = required_date(config, "data", "end")?;
    let range = TimeRange::from_dates(start, end)?;

    let data = build_data_source(config)?;

    Ok(AppConfig {
        data,
        range,
        symbol: resolve_symbol(symbol_override, config)?,
        window: optional_i64(config, "run", "window")?.unwrap_or(0) as usize,
        strategy: build_strategy_config(config)?,
        execution: build_execution_config(config)?,
    })
}

pub fn build_data_source(config: &dyn ConfigPort) -> Result<DataSource, TradekitError> {
    if provider(config)? == "synthetic" {
        let defaults = SyntheticConfig::default();
        let mut symbols: Vec<String> = config
            .get_list("data", "symbols")
            .into_iter()
            .map(|s| s.to_uppercase())
            .collect();
        if symbols.is_empty() {
            symbols = defaults.symbols.clone();
        }
        return Ok(DataSource::Synthetic(SyntheticConfig {
            seed: optional_i64(config, "data", "seed")?
                .map(|s| s as u64)
                .unwrap_or(defaults.seed),
            start_price: optional_f64(config, "data", "start_price")?
                .unwrap_or(defaults.start_price),
            interval_minutes: optional_i64(config, "data", "interval_minutes")?
                .unwrap_or(defaults.interval_minutes),
            symbols,
        }));
    }

    config
        .get_trimmed("data", "data_dir")
        .map(|dir| DataSource::Csv {
            data_dir: PathBuf::from(dir),
        })
        .ok_or_else(|| TradekitError::config_missing("data", "data_dir"))
}

pub fn build_strategy_config(config: &dyn ConfigPort) -> Result<StrategyConfig, TradekitError> {
    let quantity = optional_f64(config, "strategy", "quantity")?.unwrap_or(1.0);

    match strategy_kind(config)?.as_str() {
        "sma_crossover" => Ok(StrategyConfig::SmaCrossover {
            quantity,
            short_window: optional_i64(config, "strategy", "short_window")?.unwrap_or(10) as usize,
            long_window: optional_i64(config, "strategy", "long_window")?.unwrap_or(30) as usize,
        }),
        _ => Ok(StrategyConfig::Threshold {
            quantity,
            buy_above: optional_f64(config, "strategy", "buy_above")?
                .ok_or_else(|| TradekitError::config_missing("strategy", "buy_above"))?,
            sell_below: optional_f64(config, "strategy", "sell_below")?,
        }),
    }
}

pub fn build_execution_config(config: &dyn ConfigPort) -> Result<ExecutionConfig, TradekitError> {
    let defaults = ExecutionConfig::default();
    Ok(ExecutionConfig {
        slippage_pct: optional_f64(config, "execution", "slippage_pct")?
            .unwrap_or(defaults.slippage_pct),
        reference_price: optional_f64(config, "execution", "reference_price")?
            .unwrap_or(defaults.reference_price),
        auto_fill: config.get_bool("execution", "auto_fill", defaults.auto_fill),
    })
}

/// `--symbol` wins over `[run] symbol`; either way trimmed and upper-cased.
pub fn resolve_symbol(
    symbol_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<String, TradekitError> {
    symbol_override
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .or_else(|| config.get_trimmed("run", "symbol").map(|s| s.to_uppercase()))
        .ok_or_else(|| TradekitError::config_missing("run", "symbol"))
}

pub fn build_data_port(source: &DataSource) -> Box<dyn DataPort> {
    match source {
        DataSource::Csv { data_dir } => Box::new(CsvAdapter::new(data_dir.clone())),
        DataSource::Synthetic(config) => Box::new(SyntheticAdapter::new(config.clone())),
    }
}

/// Build the configured strategy and run one decision cycle.
pub fn run_session(
    app: &AppConfig,
    data_port: &dyn DataPort,
    executor: &mut dyn ExecutionPort,
) -> Result<RunReport, TradekitError> {
    let strategy = build_strategy(&app.strategy)?;
    tracing::info!(strategy = strategy.name(), provider = app.data.name(), "starting run");

    let request = RunRequest {
        symbol: app.symbol.clone(),
        range: app.range,
        window: app.window,
    };
    pipeline::run(&request, data_port, strategy.as_ref(), executor)
}

pub fn render_report(report: &RunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Symbol:      {}", report.symbol);
    let _ = writeln!(
        out,
        "Records:     {} ({} to {})",
        report.records, report.first_timestamp, report.last_timestamp
    );
    let _ = writeln!(out, "Window:      {}", report.window);
    let _ = writeln!(out, "Last close:  {}", format_currency(report.last_close));
    let _ = writeln!(out, "Strategy:    {}", report.strategy);

    match &report.intent {
        Some(intent) => {
            let _ = writeln!(out, "Decision:    {}", intent);
        }
        None => {
            let _ = writeln!(out, "Decision:    hold");
        }
    }

    if let Some(result) = &report.result {
        match result.status {
            OrderStatus::Filled => {
                let price = result.executed_price.unwrap_or_default();
                let _ = writeln!(
                    out,
                    "Order:       filled {} {} {} @ {}",
                    result.side(),
                    result.executed_quantity,
                    result.symbol(),
                    format_currency(price)
                );
                if let Some(notional) = result.notional() {
                    let _ = writeln!(out, "Cash flow:   {}", format_signed_currency(notional));
                }
            }
            OrderStatus::Submitted => {
                let _ = writeln!(out, "Order:       submitted {}", result.intent);
            }
            OrderStatus::Rejected => {
                let _ = writeln!(
                    out,
                    "Order:       rejected ({})",
                    result.reason.as_deref().unwrap_or("no reason given")
                );
            }
        }
    }
    out
}

fn run_command(
    config_path: &Path,
    symbol_override: Option<&str>,
    dry_run: bool,
) -> Result<(), TradekitError> {
    let adapter = load_config(config_path)?;
    let mut app = build_app_config(&adapter, symbol_override)?;
    if dry_run {
        app.execution.auto_fill = false;
    }

    let data_port = build_data_port(&app.data);
    let mut executor = SimulatedExecutor::new(app.execution.clone());
    let report = run_session(&app, data_port.as_ref(), &mut executor)?;

    print!("{}", render_report(&report));
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), TradekitError> {
    let adapter = load_config(config_path)?;
    let app = build_app_config(&adapter, None)?;
    let strategy = build_strategy(&app.strategy)?;

    println!("Provider:    {}", app.data.name());
    match &app.data {
        DataSource::Csv { data_dir } => println!("Data dir:    {}", data_dir.display()),
        DataSource::Synthetic(s) => println!(
            "Synthetic:   seed {}, start {}, every {} min",
            s.seed,
            format_currency(s.start_price),
            s.interval_minutes
        ),
    }
    println!("Range:       {}", app.range);
    println!("Symbol:      {}", app.symbol);
    println!(
        "Strategy:    {} (warmup {})",
        app.strategy.kind(),
        strategy.warmup()
    );
    match &app.strategy {
        StrategyConfig::Threshold {
            quantity,
            buy_above,
            sell_below,
        } => println!(
            "Levels:      buy {quantity} above {}, sell below {}",
            format_currency(*buy_above),
            sell_below.map_or_else(|| "never".to_string(), format_currency)
        ),
        StrategyConfig::SmaCrossover {
            quantity,
            short_window,
            long_window,
        } => println!("Windows:     SMA({short_window}) vs SMA({long_window}), quantity {quantity}"),
    }
    println!(
        "Slippage:    {}",
        format_percentage(app.execution.slippage_pct)
    );
    println!("\nConfiguration is valid.");
    Ok(())
}

fn run_list_symbols(config_path: &Path) -> Result<(), TradekitError> {
    let adapter = load_config(config_path)?;
    validate_data_config(&adapter)?;
    let source = build_data_source(&adapter)?;
    let data_port = build_data_port(&source);

    let symbols = data_port.list_symbols()?;
    if symbols.is_empty() {
        tracing::warn!(provider = source.name(), "no symbols found");
    }
    for symbol in &symbols {
        println!("{}", symbol);
    }
    tracing::info!(count = symbols.len(), "symbols listed");
    Ok(())
}
