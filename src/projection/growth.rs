//! Growth-account series: compounding with periodic contributions

use crate::instrument::GrowthKind;
use crate::rates::{monthly_compound_rate, sanitize};

/// Starting values at or below this are treated as a zero start by the
/// guarded seed policy
pub const ZERO_START_EPSILON: f64 = 0.001;

/// Whether the starting value receives one period of growth before the
/// first contribution is added (the "seed" step at month 0).
///
/// Two policies exist because the two historical call sites behaved
/// differently, and first-month output depends on which one applies:
/// - `Guarded` skips the seed step entirely when the starting value is at
///   or below [`ZERO_START_EPSILON`], leaving month 0 at the inactive value
///   0; the recurrence then picks up from there (month 1 becomes a plain
///   contribution). Used for retirement accounts.
/// - `Unconditional` always applies the seed step. Used for investment and
///   savings accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedPolicy {
    Guarded,
    Unconditional,
}

impl SeedPolicy {
    /// Seed policy for a growth-account kind
    pub fn for_kind(kind: GrowthKind) -> Self {
        match kind {
            GrowthKind::Retirement => SeedPolicy::Guarded,
            GrowthKind::Investment | GrowthKind::Savings => SeedPolicy::Unconditional,
        }
    }
}

/// Project a growth account over `months` periods.
///
/// The annual rate converts to its compounded monthly equivalent
/// (`(1 + annual)^(1/12) - 1`), the seed step grows the starting value for
/// one period before the first contribution lands, and each subsequent
/// month applies `value * (1 + rate) + contribution`. Every computed value
/// passes through the non-finite clamp, so a pathological rate degrades the
/// account to zero instead of poisoning the aggregate.
pub fn growth_series(
    start_value: f64,
    monthly_contribution: f64,
    annual_growth_rate: f64,
    months: u32,
    seed_policy: SeedPolicy,
) -> Vec<f64> {
    let months = months as usize;
    if months == 0 {
        return Vec::new();
    }

    let monthly_rate = monthly_compound_rate(annual_growth_rate);
    let mut values = vec![0.0; months];

    let seed_applies = match seed_policy {
        SeedPolicy::Unconditional => true,
        SeedPolicy::Guarded => start_value > ZERO_START_EPSILON,
    };
    if seed_applies {
        values[0] = sanitize(start_value * (1.0 + monthly_rate) + monthly_contribution);
    }

    for month in 1..months {
        values[month] = sanitize(values[month - 1] * (1.0 + monthly_rate) + monthly_contribution);
    }

    values
}
