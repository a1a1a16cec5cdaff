#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod days;
mod directory;
pub mod encoding;
mod layout;
mod stats;
mod travel_times;

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub use days::{DayCategory, WEEKDAYS};
pub use directory::{StopDirectory, StopRef};
pub use layout::{DataLayout, Resource};
pub use stats::{RankData, StopStats};
pub use travel_times::{Destination, StopInfo, TravelTimes};

/// Everything needed to show one selected stop.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StopPayload {
    #[serde(rename = "travelTimes")]
    travel_times: BTreeMap<DayCategory, TravelTimes>,
    pub stats: StopStats,
}

impl StopPayload {
    /// Assembles a payload from separately fetched travel times. Every day category must be
    /// present.
    pub fn new(travel_times: BTreeMap<DayCategory, TravelTimes>, stats: StopStats) -> Result<Self> {
        let mut payload = Self {
            travel_times,
            stats,
        };
        payload.finalize()?;
        Ok(payload)
    }

    /// Parses the merged format, with all days and stats in one file.
    pub fn parse_merged(bytes: &[u8]) -> Result<Self> {
        let mut payload: Self =
            serde_json::from_slice(bytes).context("parsing merged stop payload")?;
        payload.finalize()?;
        Ok(payload)
    }

    pub fn travel_times(&self, day: DayCategory) -> &TravelTimes {
        // finalize checks every day is present
        &self.travel_times[&day]
    }

    pub fn stop_name(&self) -> &str {
        &self.stats.stop_name
    }

    fn finalize(&mut self) -> Result<()> {
        for day in DayCategory::all() {
            match self.travel_times.get_mut(&day) {
                Some(travel_times) => travel_times.order_furthest_first(),
                None => bail!("{} has no travel times for {day}", self.stats.stop_name),
            }
        }
        Ok(())
    }
}

pub fn parse_json<T: serde::de::DeserializeOwned>(bytes: &[u8], what: &str) -> Result<T> {
    serde_json::from_slice(bytes).with_context(|| format!("parsing {what}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MERGED: &str = r#"{
        "travelTimes": {
            "Werktag": {"destinations": [
                {"coord": [51.0, 7.0], "time": 600, "trans": 0, "name": "Nah"},
                {"coord": [51.2, 7.2], "time": 3000, "trans": 1, "name": "Fern"}
            ], "stop_info": {"coord": [50.9, 6.9]}},
            "Samstag": {"destinations": [], "stop_info": {"coord": [50.9, 6.9]}},
            "Sonntag": {"destinations": [], "stop_info": {"coord": [50.9, 6.9]}}
        },
        "stats": {
            "stop_name": "Köln Hbf",
            "municipality": "Köln",
            "heatmap": {"Montag": [1, 2]},
            "route_types": {"Bus": 3},
            "rank_data": {}
        }
    }"#;

    #[test]
    fn merged_payload_orders_nearest_last() {
        let payload = StopPayload::parse_merged(MERGED.as_bytes()).unwrap();
        assert_eq!(payload.stop_name(), "Köln Hbf");
        let names: Vec<&str> = payload
            .travel_times(DayCategory::Werktag)
            .destinations
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["Fern", "Nah"]);
    }

    #[test]
    fn missing_day_is_rejected() {
        let full = StopPayload::parse_merged(MERGED.as_bytes()).unwrap();
        let mut travel_times = BTreeMap::new();
        travel_times.insert(
            DayCategory::Werktag,
            full.travel_times(DayCategory::Werktag).clone(),
        );
        let err = StopPayload::new(travel_times, full.stats.clone()).unwrap_err();
        assert!(err.to_string().contains("Samstag"));
    }
}
