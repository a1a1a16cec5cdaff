use dataset::{DayCategory, RankData, StopStats};

use crate::format_decimal;

/// How a stop compares to all others, as three parts of a bar that sum to 1.
#[derive(Clone, Debug, PartialEq)]
pub struct Ranking {
    /// Share of stops with fewer or equal departures
    pub worse: f64,
    /// Share of stops with more departures
    pub better: f64,
    pub equal: f64,
    pub dep_per_hour_avg: f64,
}

impl Ranking {
    pub fn new(data: &RankData) -> Self {
        let mut worse = clamp_fraction(data.dep_per_day_worse);
        let mut better = clamp_fraction(data.dep_per_day_better);
        let sum = worse + better;
        if sum > 1.0 {
            worse /= sum;
            better /= sum;
        }
        Self {
            worse,
            better,
            equal: (1.0 - worse - better).max(0.0),
            dep_per_hour_avg: data.dep_per_hour_avg,
        }
    }

    pub fn for_day(stats: &StopStats, day: DayCategory) -> Option<Self> {
        stats.rank_data.get(&day).map(Self::new)
    }

    pub fn sentence(&self, day: DayCategory) -> String {
        format!(
            "An einem {} zwischen 6 und 20 Uhr gibt es an dieser Station durchschnittlich {} \
             Abfahrten pro Stunde. An {}% aller Haltestellen in NRW gibt es mehr.",
            day,
            format_decimal(self.dep_per_hour_avg, 1),
            format_decimal(self.better * 100.0, 1)
        )
    }
}

fn clamp_fraction(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn rank(worse: f64, better: f64) -> RankData {
        RankData {
            dep_per_day: 100.0,
            dep_per_hour_avg: 6.26,
            dep_per_day_worse: worse,
            dep_per_day_better: better,
            dep_per_hour_avg_worse: 0.0,
            dep_per_hour_avg_better: 0.0,
        }
    }

    #[test]
    fn parts_sum_to_one() {
        let ranking = Ranking::new(&rank(0.7, 0.2));
        assert_relative_eq!(ranking.worse, 0.7);
        assert_relative_eq!(ranking.better, 0.2);
        assert_relative_eq!(ranking.equal, 0.1, epsilon = 1e-9);
    }

    #[test]
    fn out_of_range_input() {
        let ranking = Ranking::new(&rank(1.5, -0.3));
        assert_relative_eq!(ranking.worse, 1.0);
        assert_relative_eq!(ranking.better, 0.0);
        assert_relative_eq!(ranking.equal, 0.0);

        let ranking = Ranking::new(&rank(0.9, 0.6));
        assert_relative_eq!(ranking.worse + ranking.better, 1.0, epsilon = 1e-9);
        assert_relative_eq!(ranking.worse, 0.6, epsilon = 1e-9);
        assert_relative_eq!(ranking.equal, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn german_sentence() {
        let ranking = Ranking::new(&rank(0.5, 0.25));
        assert_eq!(
            ranking.sentence(DayCategory::Samstag),
            "An einem Samstag zwischen 6 und 20 Uhr gibt es an dieser Station durchschnittlich \
             6,3 Abfahrten pro Stunde. An 25,0% aller Haltestellen in NRW gibt es mehr."
        );

        // The share keeps its decimal
        let ranking = Ranking::new(&rank(0.5, 0.123));
        assert!(ranking
            .sentence(DayCategory::Werktag)
            .ends_with("An 12,3% aller Haltestellen in NRW gibt es mehr."));
    }
}
