//! Wire types for the market-data provider and the risk backend
//!
//! Field names follow the upstream JSON (`companyName`, `mktCap`, `VaR_Table`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use riskterm_risk::PricePoint;

/// Ticker symbol, always upper-case
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a symbol, trimming and upper-casing the input
    pub fn new(symbol: impl AsRef<str>) -> Self {
        Self(symbol.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Company profile record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityProfile {
    pub symbol: Symbol,

    pub company_name: String,

    /// Last traded price
    pub price: f64,

    /// Market capitalization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mkt_cap: Option<f64>,
}

/// One `{date, close}` record of a historical price response
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalBar {
    pub date: NaiveDate,
    pub close: f64,
}

impl From<HistoricalBar> for PricePoint {
    fn from(bar: HistoricalBar) -> Self {
        PricePoint::new(bar.date, bar.close)
    }
}

/// Historical price response, newest record first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoricalPriceResponse {
    #[serde(default)]
    pub symbol: Option<Symbol>,

    #[serde(default)]
    pub historical: Vec<HistoricalBar>,
}

/// Body of `/calculate_var` and `/optimize_portfolio`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRequest {
    pub symbols: Vec<Symbol>,

    /// Percent weights, in the same order as `symbols`
    pub weights: Vec<f64>,
}

/// Body of `/fetch_prices`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRequest {
    pub symbols: Vec<Symbol>,
}

/// Key of the aggregate row in a per-symbol VaR response
pub const PORTFOLIO_ROW: &str = "Portfolio";

/// Named VaR figures for one row (`VaR_1d_95`, `Hist_VaR_1D_95`, ...)
pub type VarFigures = BTreeMap<String, f64>;

/// One row of the tabular VaR response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarTableRow {
    /// e.g. "1 day(s)"
    pub horizon: String,

    /// e.g. "95%"
    pub confidence_level: String,

    #[serde(rename = "VaR")]
    pub var: f64,
}

/// `/calculate_var` response in any of its observed shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VarResponse {
    /// `{"error": "..."}`
    Error { error: String },

    /// `{"VaR_Table": [...]}`
    Table {
        #[serde(rename = "VaR_Table")]
        var_table: Vec<VarTableRow>,
    },

    /// `{"AAPL": {"VaR_1d_95": ...}, "Portfolio": {...}}`
    BySymbol(BTreeMap<String, VarFigures>),
}

impl VarResponse {
    /// Figures for a single security row
    pub fn security(&self, symbol: &Symbol) -> Option<&VarFigures> {
        match self {
            VarResponse::BySymbol(rows) => rows.get(symbol.as_str()),
            _ => None,
        }
    }

    /// Per-security rows, excluding the portfolio aggregate
    pub fn securities(&self) -> impl Iterator<Item = (&str, &VarFigures)> + '_ {
        let rows = match self {
            VarResponse::BySymbol(rows) => Some(rows),
            _ => None,
        };

        rows.into_iter()
            .flat_map(|rows| rows.iter())
            .filter(|(name, _)| name.as_str() != PORTFOLIO_ROW)
            .map(|(name, figures)| (name.as_str(), figures))
    }

    /// The optional aggregate row
    pub fn portfolio(&self) -> Option<&VarFigures> {
        match self {
            VarResponse::BySymbol(rows) => rows.get(PORTFOLIO_ROW),
            _ => None,
        }
    }
}

/// `/optimize_portfolio` response, kept as an open JSON object
pub type OptimizationResult = BTreeMap<String, serde_json::Value>;

/// `/fetch_prices` response: closes per symbol per date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    #[serde(default)]
    pub prices: BTreeMap<String, BTreeMap<NaiveDate, f64>>,
}

/// One date row of a [`PriceTable`] view
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTableRow {
    pub date: NaiveDate,

    /// One entry per requested symbol; `None` where that symbol has no close
    pub closes: Vec<Option<f64>>,
}

impl PriceTable {
    pub fn is_empty(&self) -> bool {
        self.prices.values().all(BTreeMap::is_empty)
    }

    /// Newest-first rows over the union of dates, at most `limit` of them
    pub fn recent_rows(&self, symbols: &[Symbol], limit: usize) -> Vec<PriceTableRow> {
        let mut dates: Vec<NaiveDate> = symbols
            .iter()
            .filter_map(|s| self.prices.get(s.as_str()))
            .flat_map(|by_date| by_date.keys().copied())
            .collect();
        dates.sort_unstable_by(|a, b| b.cmp(a));
        dates.dedup();
        dates.truncate(limit);

        dates
            .into_iter()
            .map(|date| PriceTableRow {
                date,
                closes: symbols
                    .iter()
                    .map(|s| self.prices.get(s.as_str()).and_then(|m| m.get(&date)).copied())
                    .collect(),
            })
            .collect()
    }
}
