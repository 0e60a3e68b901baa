//! Plan loading and the input-validation boundary
//!
//! A plan file (JSON) carries the full run configuration: growth accounts,
//! loans, goals, and the horizon in years. Instruments can alternatively be
//! loaded from a CSV table with one row per instrument. Range validation
//! happens here, at the boundary; the projection engine trusts its inputs
//! and defends only against non-finite arithmetic.

use super::{Goal, GrowthInstrument, GrowthKind, LoanInstrument};
use crate::projection::{
    DEFAULT_INVESTMENT_GROWTH_RATE, DEFAULT_LOAN_INTEREST_RATE, DEFAULT_RETIREMENT_GROWTH_RATE,
    DEFAULT_SAVINGS_GROWTH_RATE,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Maximum simulation horizon in years
pub const MAX_YEARS: u32 = 50;

/// Errors raised at the plan-loading boundary
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("failed to read plan file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse plan JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse instrument CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown instrument kind '{0}' (expected retirement, investment, savings, or loan)")]
    UnknownKind(String),

    #[error("invalid plan: {0}")]
    Invalid(String),
}

/// Full run configuration loaded from a plan file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Horizon in years (1 to 50); the horizon in months is `years * 12`
    #[serde(default = "default_years")]
    pub years: u32,

    #[serde(default)]
    pub growth_accounts: Vec<GrowthInstrument>,

    #[serde(default)]
    pub loans: Vec<LoanInstrument>,

    #[serde(default)]
    pub goals: Vec<Goal>,
}

fn default_years() -> u32 {
    10
}

impl Plan {
    /// Horizon length in months
    pub fn months(&self) -> u32 {
        self.years * 12
    }

    /// Range-check every input per the documented contracts.
    ///
    /// Rates and amounts must be non-negative finite values; the loan
    /// appreciation rate is the sole signed input, bounded to [-1, 1].
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.years == 0 || self.years > MAX_YEARS {
            return Err(PlanError::Invalid(format!(
                "years must be between 1 and {}, got {}",
                MAX_YEARS, self.years
            )));
        }

        for account in &self.growth_accounts {
            require_non_negative(&account.label, "start_value", account.start_value)?;
            require_non_negative(
                &account.label,
                "monthly_contribution",
                account.monthly_contribution,
            )?;
            require_non_negative(
                &account.label,
                "annual_growth_rate",
                account.annual_growth_rate,
            )?;
        }

        for loan in &self.loans {
            require_non_negative(&loan.label, "start_balance", loan.start_balance)?;
            require_non_negative(&loan.label, "monthly_payment", loan.monthly_payment)?;
            require_non_negative(
                &loan.label,
                "annual_interest_rate",
                loan.annual_interest_rate,
            )?;
            if !loan.appreciation_rate.is_finite()
                || loan.appreciation_rate < -1.0
                || loan.appreciation_rate > 1.0
            {
                return Err(PlanError::Invalid(format!(
                    "{}: appreciation_rate must be within [-1, 1], got {}",
                    loan.label, loan.appreciation_rate
                )));
            }
        }

        for goal in &self.goals {
            require_non_negative(&goal.name, "amount", goal.amount)?;
        }

        Ok(())
    }

    /// Starter plan with one instrument of each kind, using the default
    /// rates and amounts a new user would begin from.
    pub fn starter() -> Self {
        Self {
            years: 10,
            growth_accounts: vec![
                GrowthInstrument {
                    label: "Retirement Account 1".to_string(),
                    kind: GrowthKind::Retirement,
                    start_value: 10_000.0,
                    monthly_contribution: 500.0,
                    annual_growth_rate: DEFAULT_RETIREMENT_GROWTH_RATE,
                },
                GrowthInstrument {
                    label: "Investment 1".to_string(),
                    kind: GrowthKind::Investment,
                    start_value: 5_000.0,
                    monthly_contribution: 200.0,
                    annual_growth_rate: DEFAULT_INVESTMENT_GROWTH_RATE,
                },
                GrowthInstrument {
                    label: "Savings Account 1".to_string(),
                    kind: GrowthKind::Savings,
                    start_value: 2_000.0,
                    monthly_contribution: 100.0,
                    annual_growth_rate: DEFAULT_SAVINGS_GROWTH_RATE,
                },
            ],
            loans: vec![LoanInstrument {
                label: "Loan 1".to_string(),
                start_balance: 15_000.0,
                monthly_payment: 300.0,
                annual_interest_rate: DEFAULT_LOAN_INTEREST_RATE,
                start_month: 0,
                appreciation_rate: 0.0,
                include_equity_as_asset: false,
            }],
            goals: vec![Goal {
                name: "Goal 1".to_string(),
                amount: 10_000.0,
                target_month: 120,
            }],
        }
    }
}

fn require_non_negative(label: &str, field: &str, value: f64) -> Result<(), PlanError> {
    if !value.is_finite() || value < 0.0 {
        return Err(PlanError::Invalid(format!(
            "{}: {} must be a non-negative finite number, got {}",
            label, field, value
        )));
    }
    Ok(())
}

/// Load and validate a plan from a JSON file
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<Plan, PlanError> {
    let file = File::open(path.as_ref())?;
    let plan = load_plan_from_reader(BufReader::new(file))?;
    info!(
        "loaded plan: {} growth accounts, {} loans, {} goals, {} year horizon",
        plan.growth_accounts.len(),
        plan.loans.len(),
        plan.goals.len(),
        plan.years
    );
    Ok(plan)
}

/// Load and validate a plan from any reader
pub fn load_plan_from_reader<R: Read>(reader: R) -> Result<Plan, PlanError> {
    let plan: Plan = serde_json::from_reader(reader)?;
    plan.validate()?;
    Ok(plan)
}

/// One CSV row; kind decides which columns apply, the rest stay empty
#[derive(Debug, Deserialize)]
struct InstrumentRecord {
    kind: String,
    label: String,
    start_value: Option<f64>,
    monthly_contribution: Option<f64>,
    annual_growth_rate: Option<f64>,
    start_balance: Option<f64>,
    monthly_payment: Option<f64>,
    annual_interest_rate: Option<f64>,
    start_month: Option<u32>,
    appreciation_rate: Option<f64>,
    include_equity_as_asset: Option<bool>,
}

/// Load instruments from a CSV table with one row per instrument.
///
/// Expected header: `kind,label,start_value,monthly_contribution,
/// annual_growth_rate,start_balance,monthly_payment,annual_interest_rate,
/// start_month,appreciation_rate,include_equity_as_asset`. Columns that do
/// not apply to a row's kind may be left empty.
pub fn load_instruments_from_reader<R: Read>(
    reader: R,
) -> Result<(Vec<GrowthInstrument>, Vec<LoanInstrument>), PlanError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut growth_accounts = Vec::new();
    let mut loans = Vec::new();

    for record in csv_reader.deserialize() {
        let record: InstrumentRecord = record?;
        match record.kind.as_str() {
            "retirement" | "investment" | "savings" => {
                let kind = match record.kind.as_str() {
                    "retirement" => GrowthKind::Retirement,
                    "investment" => GrowthKind::Investment,
                    _ => GrowthKind::Savings,
                };
                growth_accounts.push(GrowthInstrument {
                    label: record.label,
                    kind,
                    start_value: record.start_value.unwrap_or(0.0),
                    monthly_contribution: record.monthly_contribution.unwrap_or(0.0),
                    annual_growth_rate: record.annual_growth_rate.unwrap_or(0.0),
                });
            }
            "loan" => loans.push(LoanInstrument {
                label: record.label,
                start_balance: record.start_balance.unwrap_or(0.0),
                monthly_payment: record.monthly_payment.unwrap_or(0.0),
                annual_interest_rate: record.annual_interest_rate.unwrap_or(0.0),
                start_month: record.start_month.unwrap_or(0),
                appreciation_rate: record.appreciation_rate.unwrap_or(0.0),
                include_equity_as_asset: record.include_equity_as_asset.unwrap_or(false),
            }),
            other => return Err(PlanError::UnknownKind(other.to_string())),
        }
    }

    info!(
        "loaded {} growth accounts and {} loans from CSV",
        growth_accounts.len(),
        loans.len()
    );
    Ok((growth_accounts, loans))
}
