//! Portfolio aggregation across instrument series
//!
//! Assets sum every growth series plus the equity of loans flagged to count
//! it; liabilities sum every loan balance unconditionally. A flagged loan is
//! therefore double-counted by design: the debt is owed in full even while
//! the asset behind it carries value.

use super::amortization::AmortizationSeries;
use super::result::{month_date, NetWorthRow};
use chrono::NaiveDate;
use log::warn;

/// Month-indexed aggregate sums, each of horizon length
#[derive(Debug, Clone)]
pub struct PortfolioTotals {
    pub total_assets: Vec<f64>,
    pub total_liabilities: Vec<f64>,
    pub net_worth: Vec<f64>,
}

impl PortfolioTotals {
    /// Convert to dated report rows, dropping any month where an aggregate
    /// is non-finite.
    ///
    /// Per-step sanitization in the series should make this filter a no-op;
    /// it is a final defensive layer, and unlike the sanitizer it excludes
    /// the row instead of zeroing it.
    pub fn reportable_rows(&self, start_date: NaiveDate) -> Vec<NetWorthRow> {
        let mut rows = Vec::with_capacity(self.net_worth.len());
        for month in 0..self.net_worth.len() {
            let assets = self.total_assets[month];
            let liabilities = self.total_liabilities[month];
            let net = self.net_worth[month];
            if !assets.is_finite() || !liabilities.is_finite() || !net.is_finite() {
                warn!("dropping month {} from report: non-finite aggregate", month);
                continue;
            }
            rows.push(NetWorthRow {
                month: month as u32,
                date: month_date(start_date, month as u32),
                total_assets: assets,
                total_liabilities: liabilities,
                net_worth: net,
            });
        }
        rows
    }
}

/// Sum instrument series into portfolio totals.
///
/// `loan_series` pairs each loan's output with its
/// `include_equity_as_asset` flag. Every input series must have length
/// `months`; the invariant holds for anything produced by this crate's
/// series functions.
pub fn aggregate_portfolio(
    months: u32,
    growth_series: &[Vec<f64>],
    loan_series: &[(&AmortizationSeries, bool)],
) -> PortfolioTotals {
    let months = months as usize;
    let mut total_assets = vec![0.0; months];
    let mut total_liabilities = vec![0.0; months];

    for series in growth_series {
        for (month, value) in series.iter().enumerate() {
            total_assets[month] += value;
        }
    }

    for (series, include_equity) in loan_series {
        for (month, balance) in series.balances.iter().enumerate() {
            total_liabilities[month] += balance;
        }
        if *include_equity {
            for (month, equity) in series.equity.iter().enumerate() {
                total_assets[month] += equity;
            }
        }
    }

    let net_worth = total_assets
        .iter()
        .zip(&total_liabilities)
        .map(|(assets, liabilities)| assets - liabilities)
        .collect();

    PortfolioTotals {
        total_assets,
        total_liabilities,
        net_worth,
    }
}
