use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use riskterm_terminal::{RiskTerminal, SearchOutcome, Symbol, TerminalConfig, VarResponse};

#[derive(Parser, Debug)]
#[clap(name = "riskterm", about = "Security risk terminal")]
struct Args {
    /// YAML configuration file; defaults apply when omitted
    #[clap(short, long)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rolling VaR, volatility and moving averages for one security
    Analyze {
        symbol: String,

        /// Number of most recent dates to print
        #[clap(short, long, default_value_t = 10)]
        rows: usize,
    },

    /// Look up a security by ticker or ISIN
    Search { query: String },

    /// Portfolio VaR from the risk backend, positions given as SYMBOL=WEIGHT
    Var {
        #[clap(required = true)]
        positions: Vec<String>,
    },

    /// Show the search history
    History {
        #[clap(short, long, default_value_t = 20)]
        limit: usize,
    },
}

fn parse_position(arg: &str) -> Result<(Symbol, f64)> {
    let (symbol, weight) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected SYMBOL=WEIGHT, got {:?}", arg))?;
    let weight: f64 = weight
        .trim()
        .parse()
        .with_context(|| format!("Invalid weight in {:?}", arg))?;
    Ok((Symbol::new(symbol), weight))
}

fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

fn print_var(response: &VarResponse) {
    match response {
        VarResponse::Table { var_table } => {
            for row in var_table {
                println!("{:>10} {:>5}  {:.2}", row.horizon, row.confidence_level, row.var);
            }
        }
        _ => {
            let rows = response
                .securities()
                .chain(response.portfolio().map(|figures| ("Portfolio", figures)));
            for (name, figures) in rows {
                println!("{}", name);
                for (key, value) in figures {
                    println!("  {:<28} {:.3}%", key, value * 100.0);
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    riskterm_terminal::init_tracing();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            TerminalConfig::load(path)?
        }
        None => TerminalConfig::default(),
    }
    .with_env_overrides();

    let mut terminal = RiskTerminal::from_config(&config)?;

    match args.command {
        Command::Analyze { symbol, rows } => {
            let analysis = terminal.analyze_security(&Symbol::new(&symbol)).await?;
            let report = &analysis.report;

            if let Some(profile) = &analysis.profile {
                println!("{} ({}) ${:.2}", profile.company_name, profile.symbol, profile.price);
            }
            println!(
                "Sharpe {:.2}  Sortino {:.2}  (annualized)",
                report.sharpe_ratio, report.sortino_ratio
            );
            println!(
                "{:<12} {:>10} {:>10} {:>10} {:>10} {:>10}",
                "date", "close", "VaR %", "vol %", "SMA short", "SMA long"
            );

            let offset = report.dates.len() - report.rolling_var.len();
            let start = report.dates.len().saturating_sub(rows);
            for i in start..report.dates.len() {
                let risk_index = i.checked_sub(offset);
                println!(
                    "{:<12} {:>10.2} {:>10} {:>10} {:>10} {:>10}",
                    report.dates[i],
                    report.closes[i],
                    format_value(risk_index.map(|j| report.rolling_var.values[j] * 100.0)),
                    format_value(risk_index.map(|j| report.rolling_volatility.values[j] * 100.0)),
                    format_value(report.moving_averages.short[i]),
                    format_value(report.moving_averages.long[i]),
                );
            }
        }
        Command::Search { query } => match terminal.search(&query).await? {
            Some(SearchOutcome::Found {
                profile,
                resolved_from,
            }) => {
                if let Some(isin) = resolved_from {
                    println!("ISIN {} resolved to {}", isin, profile.symbol);
                }
                println!("{} ({}) price ${:.2}", profile.company_name, profile.symbol, profile.price);
            }
            Some(SearchOutcome::NotFound { symbol }) => {
                println!("No results found for {}", symbol);
            }
            Some(SearchOutcome::UnresolvedIsin { isin }) => {
                println!("ISIN {} not found in OpenFIGI", isin);
            }
            None => println!("Empty query"),
        },
        Command::Var { positions } => {
            for arg in &positions {
                let (symbol, weight) = parse_position(arg)?;
                let name = symbol.to_string();
                terminal.add_position(symbol, name, weight)?;
            }
            if terminal.portfolio().is_over_allocated() {
                println!("Warning: total weight exceeds 100%");
            }
            let response = terminal.calculate_var().await?;
            print_var(&response);
        }
        Command::History { limit } => {
            for entry in terminal.query_log().recent(limit) {
                println!("{}  {}", entry.timestamp.format("%Y-%m-%d %H:%M:%S"), entry.query);
            }
        }
    }

    Ok(())
}
