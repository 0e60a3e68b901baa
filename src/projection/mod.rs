//! Projection engine for per-instrument series and portfolio aggregation

mod aggregate;
mod amortization;
mod engine;
mod goals;
mod growth;
mod result;

pub use aggregate::{aggregate_portfolio, PortfolioTotals};
pub use amortization::{amortization_series, AmortizationSeries, AppreciationTiming};
pub use engine::{SimulationConfig, SimulationEngine};
pub use goals::project_goals;
pub use growth::{growth_series, SeedPolicy, ZERO_START_EPSILON};
pub use result::{month_date, GoalMarker, InstrumentSeries, NetWorthRow, SimulationResult};

// ============================================================================
// Default Annual Rates
// ============================================================================
// These are the rates a starter plan begins from. Every kind of growth
// account shares the same compounding math and differs only in defaults
// and display grouping.

/// Default annual growth rate for retirement accounts (5%)
pub const DEFAULT_RETIREMENT_GROWTH_RATE: f64 = 0.05;

/// Default annual growth rate for investment accounts (7%)
pub const DEFAULT_INVESTMENT_GROWTH_RATE: f64 = 0.07;

/// Default annual growth rate for savings accounts (1.5%)
pub const DEFAULT_SAVINGS_GROWTH_RATE: f64 = 0.015;

/// Default annual interest rate for loans (3%)
pub const DEFAULT_LOAN_INTEREST_RATE: f64 = 0.03;
