//! Instrument and goal value types
//!
//! Instruments are immutable value objects built once per simulation run.
//! Labels are display-only and need not be unique; an instrument has no
//! identity beyond its position in the input sequence.

use serde::{Deserialize, Serialize};

/// Display grouping for growth accounts.
///
/// All three kinds share identical compounding math. The kind selects the
/// seeding policy (retirement accounts guard the seed step against a
/// near-zero starting value) and the default rates used in starter plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthKind {
    Retirement,
    Investment,
    Savings,
}

/// A compounding account: retirement, investment, or savings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthInstrument {
    /// Display label (non-unique)
    pub label: String,

    /// Account grouping; selects the seed policy
    pub kind: GrowthKind,

    /// Starting value (>= 0)
    pub start_value: f64,

    /// Contribution added every month (>= 0)
    pub monthly_contribution: f64,

    /// Annual growth rate as a fraction, e.g. 0.05 = 5% (>= 0)
    pub annual_growth_rate: f64,
}

/// An amortizing loan with an appreciating reference asset.
///
/// `start_balance` doubles as the initial value of the underlying asset
/// (house, vehicle, ...) whose appreciation runs independently of the
/// payoff schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInstrument {
    /// Display label (non-unique)
    pub label: String,

    /// Initial loan balance, also the reference asset's starting value (>= 0)
    pub start_balance: f64,

    /// Payment applied every active month (>= 0)
    pub monthly_payment: f64,

    /// Annual interest rate as a fraction (>= 0); accrues at the nominal
    /// monthly rate (annual / 12)
    pub annual_interest_rate: f64,

    /// Month offset at which the loan becomes active; balance and equity
    /// are 0 before this
    #[serde(default)]
    pub start_month: u32,

    /// Annual appreciation (or depreciation, if negative) of the reference
    /// asset, in [-1, 1]
    #[serde(default)]
    pub appreciation_rate: f64,

    /// Count this loan's equity among total assets. The balance is counted
    /// as a liability regardless.
    #[serde(default)]
    pub include_equity_as_asset: bool,
}

/// A financial goal overlaid on the net-worth series.
///
/// Goals are markers only; they are never validated against achievability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Display name
    pub name: String,

    /// Target amount (>= 0)
    pub amount: f64,

    /// Month offset into the horizon. Goals at or beyond the horizon are
    /// silently excluded from the overlay.
    pub target_month: u32,
}
