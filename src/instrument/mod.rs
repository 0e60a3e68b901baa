//! Instrument data structures and plan loading

mod data;
pub mod loader;

pub use data::{Goal, GrowthInstrument, GrowthKind, LoanInstrument};
pub use loader::{load_instruments_from_reader, load_plan, load_plan_from_reader, Plan, PlanError};
