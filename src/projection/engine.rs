//! Simulation engine tying per-instrument series into one result
//!
//! One run is a pure function of its inputs; the engine holds only its
//! configuration and keeps no memory between calls. Instruments are
//! independent, so their series are computed in parallel before the
//! sequential aggregation pass.

use super::aggregate::aggregate_portfolio;
use super::amortization::{amortization_series, AmortizationSeries, AppreciationTiming};
use super::goals::project_goals;
use super::growth::{growth_series, SeedPolicy};
use super::result::{InstrumentSeries, SimulationResult};
use crate::instrument::{Goal, GrowthInstrument, LoanInstrument};
use chrono::NaiveDate;
use log::{debug, info};
use rayon::prelude::*;

/// Configuration shared by every series in a simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Horizon length in months; every output series has exactly this length
    pub months: u32,

    /// Calendar anchor for display dates (month 0 maps to this date)
    pub start_date: NaiveDate,

    /// Appreciation timing for loan collateral; `SinglePerMonth` unless
    /// parity with legacy output is required
    pub appreciation_timing: AppreciationTiming,
}

impl SimulationConfig {
    pub fn new(months: u32, start_date: NaiveDate) -> Self {
        Self {
            months,
            start_date,
            appreciation_timing: AppreciationTiming::default(),
        }
    }
}

/// Runs complete simulations: instruments and goals in, aggregated
/// time series out.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    config: SimulationConfig,
}

impl SimulationEngine {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run one simulation over the configured horizon.
    ///
    /// Inputs are expected to be range-validated at the loading boundary;
    /// the engine defends only against non-finite arithmetic, per the
    /// sanitizer policy.
    pub fn simulate(
        &self,
        growth_instruments: &[GrowthInstrument],
        loan_instruments: &[LoanInstrument],
        goals: &[Goal],
    ) -> SimulationResult {
        let months = self.config.months;
        debug!(
            "simulating {} growth accounts, {} loans over {} months",
            growth_instruments.len(),
            loan_instruments.len(),
            months
        );

        let growth_outputs: Vec<Vec<f64>> = growth_instruments
            .par_iter()
            .map(|account| {
                growth_series(
                    account.start_value,
                    account.monthly_contribution,
                    account.annual_growth_rate,
                    months,
                    SeedPolicy::for_kind(account.kind),
                )
            })
            .collect();

        let loan_outputs: Vec<AmortizationSeries> = loan_instruments
            .par_iter()
            .map(|loan| {
                amortization_series(
                    loan.start_balance,
                    loan.monthly_payment,
                    loan.annual_interest_rate,
                    months,
                    loan.start_month,
                    loan.appreciation_rate,
                    self.config.appreciation_timing,
                )
            })
            .collect();

        let loan_refs: Vec<(&AmortizationSeries, bool)> = loan_outputs
            .iter()
            .zip(loan_instruments)
            .map(|(series, loan)| (series, loan.include_equity_as_asset))
            .collect();

        let totals = aggregate_portfolio(months, &growth_outputs, &loan_refs);
        let rows = totals.reportable_rows(self.config.start_date);

        let mut instrument_series =
            Vec::with_capacity(growth_outputs.len() + 2 * loan_outputs.len());
        for (account, values) in growth_instruments.iter().zip(growth_outputs) {
            instrument_series.push(InstrumentSeries {
                label: account.label.clone(),
                values,
            });
        }
        for (loan, series) in loan_instruments.iter().zip(loan_outputs) {
            instrument_series.push(InstrumentSeries {
                label: format!("{} Balance", loan.label),
                values: series.balances,
            });
            if loan.include_equity_as_asset {
                instrument_series.push(InstrumentSeries {
                    label: format!("{} Equity", loan.label),
                    values: series.equity,
                });
            }
        }

        let goal_markers = project_goals(goals, months, self.config.start_date);

        info!(
            "simulation complete: {} reportable months, {} instrument series, {} goal markers",
            rows.len(),
            instrument_series.len(),
            goal_markers.len()
        );

        SimulationResult {
            rows,
            instrument_series,
            goal_markers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::GrowthKind;
    use approx::assert_relative_eq;

    fn start_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    fn engine(months: u32) -> SimulationEngine {
        SimulationEngine::new(SimulationConfig::new(months, start_date()))
    }

    fn growth(label: &str, kind: GrowthKind, start: f64, contribution: f64, rate: f64) -> GrowthInstrument {
        GrowthInstrument {
            label: label.to_string(),
            kind,
            start_value: start,
            monthly_contribution: contribution,
            annual_growth_rate: rate,
        }
    }

    #[test]
    fn test_aggregation_matches_direct_series() {
        // Two growth instruments: the aggregate at every month is the sum
        // of the individually computed series.
        let a = growth("A", GrowthKind::Investment, 1_000.0, 100.0, 0.06);
        let b = growth("B", GrowthKind::Investment, 0.0, 50.0, 0.0);
        let result = engine(12).simulate(&[a.clone(), b.clone()], &[], &[]);

        let series_a = growth_series(1_000.0, 100.0, 0.06, 12, SeedPolicy::Unconditional);
        let series_b = growth_series(0.0, 50.0, 0.0, 12, SeedPolicy::Unconditional);
        assert_eq!(result.rows.len(), 12);
        assert_relative_eq!(
            result.rows[11].total_assets,
            series_a[11] + series_b[11],
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_flagged_loan_double_counted_in_result() {
        let loan = LoanInstrument {
            label: "House".to_string(),
            start_balance: 200_000.0,
            monthly_payment: 1_200.0,
            annual_interest_rate: 0.04,
            start_month: 0,
            appreciation_rate: 0.03,
            include_equity_as_asset: true,
        };
        let result = engine(12).simulate(&[], &[loan], &[]);

        let series = amortization_series(
            200_000.0,
            1_200.0,
            0.04,
            12,
            0,
            0.03,
            AppreciationTiming::SinglePerMonth,
        );
        let row = &result.rows[5];
        assert_relative_eq!(row.total_liabilities, series.balances[5], epsilon = 1e-6);
        assert_relative_eq!(row.total_assets, series.equity[5], epsilon = 1e-6);
        assert_relative_eq!(
            row.net_worth,
            series.equity[5] - series.balances[5],
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_series_lengths_match_horizon() {
        let a = growth("A", GrowthKind::Retirement, 10_000.0, 500.0, 0.05);
        let loan = LoanInstrument {
            label: "Car".to_string(),
            start_balance: 15_000.0,
            monthly_payment: 300.0,
            annual_interest_rate: 0.03,
            start_month: 6,
            appreciation_rate: -0.15,
            include_equity_as_asset: true,
        };
        let result = engine(120).simulate(&[a], &[loan], &[]);

        assert_eq!(result.rows.len(), 120);
        // Growth label, loan balance, loan equity
        assert_eq!(result.instrument_series.len(), 3);
        for series in &result.instrument_series {
            assert_eq!(series.values.len(), 120);
        }
        assert_eq!(result.instrument_series[1].label, "Car Balance");
        assert_eq!(result.instrument_series[2].label, "Car Equity");
    }

    #[test]
    fn test_unflagged_loan_has_no_equity_series() {
        let loan = LoanInstrument {
            label: "Car".to_string(),
            start_balance: 15_000.0,
            monthly_payment: 300.0,
            annual_interest_rate: 0.03,
            start_month: 0,
            appreciation_rate: 0.0,
            include_equity_as_asset: false,
        };
        let result = engine(24).simulate(&[], &[loan], &[]);
        assert_eq!(result.instrument_series.len(), 1);
        assert_eq!(result.instrument_series[0].label, "Car Balance");
        // Equity excluded from assets as well
        assert_eq!(result.rows[0].total_assets, 0.0);
    }

    #[test]
    fn test_extreme_rate_stays_finite_over_full_horizon() {
        // 600-month horizon with an absurd rate: sanitizer keeps every
        // output value finite instead of aborting the run.
        let a = growth("Hot", GrowthKind::Investment, 1e300, 1e300, 1e12);
        let result = engine(600).simulate(&[a], &[], &[]);
        assert_eq!(result.rows.len(), 600);
        for row in &result.rows {
            assert!(row.total_assets.is_finite());
            assert!(row.net_worth.is_finite());
        }
    }

    #[test]
    fn test_goal_markers_filtered_and_dated() {
        let goals = vec![
            Goal {
                name: "Reachable".to_string(),
                amount: 5_000.0,
                target_month: 12,
            },
            Goal {
                name: "AtHorizon".to_string(),
                amount: 5_000.0,
                target_month: 24,
            },
        ];
        let result = engine(24).simulate(&[], &[], &goals);
        assert_eq!(result.goal_markers.len(), 1);
        assert_eq!(result.goal_markers[0].name, "Reachable");
        assert_eq!(
            result.goal_markers[0].date,
            start_date() + chrono::Duration::days(360)
        );
    }

    #[test]
    fn test_runs_are_independent() {
        // The engine holds no state between calls: identical inputs give
        // identical outputs across repeated runs.
        let a = growth("A", GrowthKind::Savings, 2_000.0, 100.0, 0.015);
        let eng = engine(36);
        let first = eng.simulate(&[a.clone()], &[], &[]);
        let second = eng.simulate(&[a], &[], &[]);
        for (x, y) in first.rows.iter().zip(&second.rows) {
            assert_eq!(x.net_worth, y.net_worth);
        }
    }
}
