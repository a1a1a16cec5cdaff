use std::fmt;

use serde::{Deserialize, Serialize};

/// The weekday keys used by the heatmap, in display order.
pub const WEEKDAYS: [&str; 7] = [
    "Montag",
    "Dienstag",
    "Mittwoch",
    "Donnerstag",
    "Freitag",
    "Samstag",
    "Sonntag",
];

/// The three schedule regimes the precomputed data is bucketed into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayCategory {
    Werktag,
    Samstag,
    Sonntag,
}

impl DayCategory {
    pub fn all() -> Vec<Self> {
        vec![Self::Werktag, Self::Samstag, Self::Sonntag]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Werktag => "Werktag",
            Self::Samstag => "Samstag",
            Self::Sonntag => "Sonntag",
        }
    }

    pub fn parse(x: &str) -> Option<Self> {
        Self::all().into_iter().find(|day| day.label() == x)
    }

    /// The pipeline computes travel times for one representative day per category.
    pub(crate) fn travel_times_dir(self) -> &'static str {
        match self {
            Self::Werktag => "travel_times_proc_monday",
            Self::Samstag => "travel_times_proc_saturday",
            Self::Sonntag => "travel_times_proc_sunday",
        }
    }
}

impl fmt::Display for DayCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
