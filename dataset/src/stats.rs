use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::DayCategory;

/// Aggregate statistics for one stop.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StopStats {
    pub stop_name: String,
    pub municipality: String,
    /// Departures per weekday (German names) and hour of the day
    pub heatmap: BTreeMap<String, Vec<usize>>,
    /// Departures per vehicle type, over the whole week
    pub route_types: BTreeMap<String, usize>,
    /// Older exports lack this
    #[serde(default)]
    pub route_types_by_day: BTreeMap<DayCategory, BTreeMap<String, usize>>,
    pub rank_data: BTreeMap<DayCategory, RankData>,
}

/// How this stop compares to every other stop in the region.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RankData {
    pub dep_per_day: f64,
    /// Averaged between 6 and 20 o'clock
    pub dep_per_hour_avg: f64,
    /// Fraction of stops with the same or fewer departures per day
    pub dep_per_day_worse: f64,
    /// Fraction of stops with more departures per day
    pub dep_per_day_better: f64,
    #[serde(default)]
    pub dep_per_hour_avg_worse: f64,
    #[serde(default)]
    pub dep_per_hour_avg_better: f64,
}

impl StopStats {
    /// Route type counts for one day category, falling back to the weekly totals.
    pub fn route_types_for(&self, day: DayCategory) -> &BTreeMap<String, usize> {
        match self.route_types_by_day.get(&day) {
            Some(counts) if !counts.is_empty() => counts,
            _ => &self.route_types,
        }
    }
}
