//! Simulation output types
//!
//! Consumers (tables, charts, exporters) receive these plain records and
//! own all rendering concerns. Dates are display labels only: the horizon
//! uses uniform 30-day months, not calendar months.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Display date for a month index: `start + 30 * month` days
pub fn month_date(start_date: NaiveDate, month: u32) -> NaiveDate {
    start_date + Duration::days(30 * month as i64)
}

/// One month of aggregated portfolio totals
#[derive(Debug, Clone, Serialize)]
pub struct NetWorthRow {
    pub month: u32,
    pub date: NaiveDate,
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
}

/// A single instrument's month-by-month series, labeled for reporting.
///
/// Loans contribute a "`{label} Balance`" series and, when their equity
/// counts as an asset, a "`{label} Equity`" series.
#[derive(Debug, Clone, Serialize)]
pub struct InstrumentSeries {
    pub label: String,
    pub values: Vec<f64>,
}

/// An in-horizon goal pinned to its month on the timeline
#[derive(Debug, Clone, Serialize)]
pub struct GoalMarker {
    pub month: u32,
    pub date: NaiveDate,
    pub amount: f64,
    pub name: String,
}

/// Complete output of one simulation run
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    /// Aggregated monthly totals; months where any aggregate went
    /// non-finite are excluded rather than zeroed
    pub rows: Vec<NetWorthRow>,

    /// Per-instrument series for detailed reporting; every series has
    /// exactly the horizon's length
    pub instrument_series: Vec<InstrumentSeries>,

    /// Goals whose target month falls inside the horizon
    pub goal_markers: Vec<GoalMarker>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_date_uniform_30_days() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(month_date(start, 0), start);
        assert_eq!(
            month_date(start, 1),
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()
        );
        assert_eq!(
            month_date(start, 12),
            start + Duration::days(360)
        );
    }
}
