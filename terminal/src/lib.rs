//! # riskterm-terminal: Security Search, Portfolio VaR and Risk Charts
//!
//! This library drives the risk terminal's two workflows on top of external
//! market-data, identifier and risk services.
//!
//! ## Core Components
//!
//! - **RiskTerminal**: session controller owning clients, portfolio and query log
//! - **Providers**: `MarketDataProvider`, `RiskBackend` and `IdentifierResolver`
//!   traits with HTTP implementations (FinancialModelingPrep, the remote risk
//!   backend, OpenFIGI)
//! - **Portfolio**: up to five percent-weighted positions
//! - **QueryLog**: append-only search history
//! - **Risk Integration**: single-security rolling VaR, volatility and moving
//!   averages via riskterm-risk
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use riskterm_terminal::{RiskTerminal, TerminalConfig, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TerminalConfig::default().with_env_overrides();
//!     let mut terminal = RiskTerminal::from_config(&config)?;
//!
//!     terminal.add_position(Symbol::new("AAPL"), "Apple Inc.", 60.0)?;
//!     terminal.add_position(Symbol::new("MSFT"), "Microsoft Corporation", 40.0)?;
//!     let var = terminal.calculate_var().await?;
//!     println!("{:?}", var.portfolio());
//!
//!     let analysis = terminal.analyze_security(&Symbol::new("AAPL")).await?;
//!     println!("Latest 95% VaR: {:?}", analysis.report.latest_var());
//!     Ok(())
//! }
//! ```

// Public modules
pub mod config;
pub mod error;
pub mod portfolio;
pub mod providers;
pub mod query_log;
pub mod search;
pub mod types;

// Internal modules
mod engine;

// Re-export main types
pub use config::{BackendConfig, MarketDataConfig, ResolverConfig, TerminalConfig};
pub use engine::{RiskTerminal, SearchOutcome, SecurityAnalysis, PRICE_TABLE_ROWS};
pub use error::{TerminalError, TerminalResult};
pub use portfolio::{Portfolio, Position, MAX_POSITIONS};
pub use query_log::{QueryLog, QueryLogEntry};
pub use search::SecurityQuery;
pub use types::{
    HistoricalBar, OptimizationResult, PortfolioRequest, PriceTable, PriceTableRow,
    SecurityProfile, Symbol, VarFigures, VarResponse, VarTableRow,
};

// Initialize tracing
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
