//! AssetFlow - Deterministic monthly net-worth projection engine
//!
//! This library provides:
//! - Growth-account compounding with explicit seeding policies
//! - Loan amortization with an appreciating collateral/equity track
//! - Portfolio aggregation into assets, liabilities, and net worth
//! - Goal markers projected onto the simulation horizon
//!
//! One simulation run is a pure function of its inputs: the engine keeps no
//! state between calls and never raises on arithmetic faults (non-finite
//! intermediates are clamped to zero at the point of occurrence).

pub mod instrument;
pub mod projection;
pub mod rates;

// Re-export commonly used types
pub use instrument::{Goal, GrowthInstrument, GrowthKind, LoanInstrument, Plan, PlanError};
pub use projection::{
    NetWorthRow, SimulationConfig, SimulationEngine, SimulationResult,
};
