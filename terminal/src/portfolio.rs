//! Portfolio of up to five weighted securities
//!
//! Positions are validated on entry, in the same order the checks are
//! reported to the user: capacity first, then weight, then duplicates.

use serde::{Deserialize, Serialize};

use crate::error::{TerminalError, TerminalResult};
use crate::types::{PortfolioRequest, Symbol};

/// Maximum number of positions in a portfolio
pub const MAX_POSITIONS: usize = 5;

/// Weights are percentages in `(0, MAX_WEIGHT]`
pub const MAX_WEIGHT: f64 = 100.0;

/// One weighted security
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: Symbol,
    pub name: String,

    /// Percent of the portfolio
    pub weight: f64,
}

/// Ordered list of positions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    positions: Vec<Position>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a position after checking capacity, weight range and duplicates
    pub fn add(&mut self, symbol: Symbol, name: impl Into<String>, weight: f64) -> TerminalResult<()> {
        if self.positions.len() >= MAX_POSITIONS {
            return Err(TerminalError::PortfolioFull { max: MAX_POSITIONS });
        }

        // Negated comparison also rejects NaN
        if !(weight > 0.0 && weight <= MAX_WEIGHT) {
            return Err(TerminalError::InvalidWeight(weight));
        }

        if self.contains(&symbol) {
            return Err(TerminalError::DuplicatePosition(symbol.to_string()));
        }

        self.positions.push(Position {
            symbol,
            name: name.into(),
            weight,
        });
        Ok(())
    }

    /// Remove and return the position at `index`
    pub fn remove(&mut self, index: usize) -> TerminalResult<Position> {
        if index >= self.positions.len() {
            return Err(TerminalError::PositionNotFound(index));
        }
        Ok(self.positions.remove(index))
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.positions.iter().any(|p| &p.symbol == symbol)
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.positions.len() >= MAX_POSITIONS
    }

    /// Sum of all weights, in percent
    pub fn total_weight(&self) -> f64 {
        self.positions.iter().map(|p| p.weight).sum()
    }

    /// Whether the weights add up to more than 100%. Allowed, but flagged.
    pub fn is_over_allocated(&self) -> bool {
        self.total_weight() > MAX_WEIGHT
    }

    pub fn symbols(&self) -> Vec<Symbol> {
        self.positions.iter().map(|p| p.symbol.clone()).collect()
    }

    pub fn weights(&self) -> Vec<f64> {
        self.positions.iter().map(|p| p.weight).collect()
    }

    /// Request body for the risk backend, weights sent as entered
    pub fn to_request(&self) -> TerminalResult<PortfolioRequest> {
        if self.is_empty() {
            return Err(TerminalError::EmptyPortfolio);
        }

        Ok(PortfolioRequest {
            symbols: self.symbols(),
            weights: self.weights(),
        })
    }
}
