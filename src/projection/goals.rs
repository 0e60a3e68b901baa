//! Goal markers projected onto the simulation horizon

use super::result::{month_date, GoalMarker};
use crate::instrument::Goal;
use chrono::NaiveDate;

/// Pin each in-horizon goal to its month on the timeline.
///
/// Goals with `target_month >= months` are silently excluded; markers are
/// annotations only and never validated against the net-worth series.
pub fn project_goals(goals: &[Goal], months: u32, start_date: NaiveDate) -> Vec<GoalMarker> {
    goals
        .iter()
        .filter(|goal| goal.target_month < months)
        .map(|goal| GoalMarker {
            month: goal.target_month,
            date: month_date(start_date, goal.target_month),
            amount: goal.amount,
            name: goal.name.clone(),
        })
        .collect()
}
