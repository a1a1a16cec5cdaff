use std::collections::BTreeMap;

use colorous::Color;

use dataset::WEEKDAYS;

use super::colors::{scale, NEUTRAL};

const MIN_TICK_HOURS: f64 = 4.0;

/// Departures per weekday and hour, reshaped into a grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Heatmap {
    pub rows: Vec<HeatmapRow>,
    pub columns: usize,
    pub max: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeatmapRow {
    pub weekday: String,
    /// Always `columns` long
    pub counts: Vec<usize>,
}

impl Heatmap {
    pub fn new(data: &BTreeMap<String, Vec<usize>>) -> Self {
        // Monday first, then anything unexpected
        let mut keys: Vec<&String> = data.keys().collect();
        keys.sort_by_key(|k| {
            WEEKDAYS
                .iter()
                .position(|w| *w == k.as_str())
                .unwrap_or(WEEKDAYS.len())
        });

        let columns = data.values().map(|x| x.len()).max().unwrap_or(0);
        let mut rows = Vec::new();
        let mut max = 0;
        for weekday in keys {
            let mut counts = data[weekday].clone();
            counts.resize(columns, 0);
            max = max.max(counts.iter().copied().max().unwrap_or(0));
            rows.push(HeatmapRow {
                weekday: weekday.clone(),
                counts,
            });
        }

        Self { rows, columns, max }
    }

    /// Busier cells are darker. Empty cells are always neutral.
    pub fn color(&self, count: usize) -> Color {
        if count == 0 || self.max == 0 {
            return NEUTRAL;
        }
        scale(1.0 - count as f64 / self.max as f64)
    }

    /// The hours a column covers, for tick labels. Usually there are 24 one-hour columns.
    pub fn hours_per_column(&self) -> f64 {
        if self.columns == 0 {
            1.0
        } else {
            24.0 / self.columns as f64
        }
    }

    /// Where to put hour labels, as `(column, hour)`. Labels are at least 4 hours apart,
    /// whether the columns are single hours or coarser bins.
    pub fn ticks(&self) -> Vec<(usize, usize)> {
        let step = (MIN_TICK_HOURS / self.hours_per_column()).ceil().max(1.0) as usize;
        (0..self.columns)
            .step_by(step)
            .map(|column| {
                let hour = (column as f64 * self.hours_per_column()).round() as usize;
                (column, hour)
            })
            .collect()
    }
}

impl HeatmapRow {
    /// Two-letter label, like "Mo"
    pub fn short_label(&self) -> String {
        self.weekday.chars().take(2).collect()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(pairs: Vec<(&str, Vec<usize>)>) -> BTreeMap<String, Vec<usize>> {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn zero_cells_stay_neutral() {
        let heatmap = Heatmap::new(&input(vec![
            ("Montag", vec![0, 10]),
            ("Dienstag", vec![5, 0]),
        ]));
        assert_eq!(heatmap.max, 10);
        assert_eq!(heatmap.columns, 2);
        assert_eq!(heatmap.rows[0].weekday, "Montag");
        assert_eq!(heatmap.rows[1].weekday, "Dienstag");

        assert_eq!(heatmap.color(0), NEUTRAL);
        assert_ne!(heatmap.color(5), NEUTRAL);
        // The busiest cell gets the darkest end of the scale
        assert_eq!(heatmap.color(10), scale(0.0));
        assert_ne!(heatmap.color(5), heatmap.color(10));
    }

    #[test]
    fn ragged_rows_are_padded() {
        let heatmap = Heatmap::new(&input(vec![
            ("Sonntag", vec![1]),
            ("Feiertag", vec![2, 2, 2]),
            ("Montag", vec![3, 4]),
        ]));
        let order: Vec<&str> = heatmap.rows.iter().map(|r| r.weekday.as_str()).collect();
        assert_eq!(order, vec!["Montag", "Sonntag", "Feiertag"]);
        assert_eq!(heatmap.rows[1].counts, vec![1, 0, 0]);
        assert_eq!(heatmap.rows[0].total(), 7);
        assert_eq!(heatmap.rows[0].short_label(), "Mo");
    }

    #[test]
    fn all_empty() {
        let heatmap = Heatmap::new(&input(vec![("Montag", vec![0; 24])]));
        assert_eq!(heatmap.max, 0);
        assert_eq!(heatmap.color(0), NEUTRAL);
        assert_eq!(heatmap.hours_per_column(), 1.0);
    }

    #[test]
    fn ticks_follow_hours() {
        let hourly = Heatmap::new(&input(vec![("Montag", vec![1; 24])]));
        assert_eq!(
            hourly.ticks(),
            vec![(0, 0), (4, 4), (8, 8), (12, 12), (16, 16), (20, 20)]
        );

        // Six 4-hour bins get a label each
        let binned = Heatmap::new(&input(vec![("Montag", vec![1; 6])]));
        assert_eq!(binned.hours_per_column(), 4.0);
        assert_eq!(
            binned.ticks(),
            vec![(0, 0), (1, 4), (2, 8), (3, 12), (4, 16), (5, 20)]
        );

        let three_hourly = Heatmap::new(&input(vec![("Montag", vec![1; 8])]));
        assert_eq!(three_hourly.ticks(), vec![(0, 0), (2, 6), (4, 12), (6, 18)]);

        assert!(Heatmap::new(&BTreeMap::new()).ticks().is_empty());
    }
}
