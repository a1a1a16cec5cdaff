use colorous::Color;
use geom::LonLat;

use dataset::TravelTimes;

use super::colors::travel_time_color;
use crate::format_minutes;

/// Destinations further away than this all get the last color of the scale.
pub const MAX_TRAVEL_TIME_SECONDS: f64 = 3600.0;

#[derive(Clone)]
pub struct Marker {
    pub pos: LonLat,
    pub color: Color,
    pub name: String,
    /// Seconds
    pub time: f64,
    pub transfers: usize,
}

impl Marker {
    pub fn popup_lines(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            format!("Erreichbar in {} min", format_minutes(self.time)),
            format!("Erfordert {} mal Umsteigen", self.transfers),
        ]
    }
}

/// One marker per destination, in drawing order: furthest first, so the nearest end up on top.
/// Without `show_transfers`, only destinations reachable directly are kept.
pub fn markers(travel_times: &TravelTimes, show_transfers: bool) -> Vec<Marker> {
    travel_times
        .destinations
        .iter()
        .filter(|dst| show_transfers || !dst.needs_transfer())
        .map(|dst| Marker {
            pos: dst.lon_lat(),
            color: travel_time_color(dst.time / MAX_TRAVEL_TIME_SECONDS),
            name: dst.name.clone(),
            time: dst.time,
            transfers: dst.transfers,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use dataset::{Destination, StopInfo};

    use super::*;
    use crate::view::colors::scale;

    fn dst(name: &str, time: f64, transfers: usize) -> Destination {
        Destination {
            coord: [51.0, 7.0],
            time,
            transfers,
            name: name.to_string(),
            color: None,
        }
    }

    fn travel_times() -> TravelTimes {
        TravelTimes {
            destinations: vec![
                dst("Bonn Hbf", 5400.0, 1),
                dst("Köln Messe/Deutz", 1800.0, 0),
                dst("Köln-Ehrenfeld", 600.0, 2),
                dst("Köln Dom", 60.0, 0),
            ],
            stop_info: StopInfo { coord: [50.94, 6.96] },
        }
    }

    #[test]
    fn transfer_filter() {
        let tt = travel_times();
        assert_eq!(markers(&tt, true).len(), 4);

        let direct = markers(&tt, false);
        let names: Vec<&str> = direct.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Köln Messe/Deutz", "Köln Dom"]);
        assert!(direct.iter().all(|m| m.transfers == 0));
    }

    #[test]
    fn colors_saturate_after_an_hour() {
        let all = markers(&travel_times(), true);
        assert_eq!(all[0].color, scale(1.0));
        assert_eq!(all[1].color, scale(0.5));
        assert_ne!(all[1].color, all[3].color);
    }

    #[test]
    fn popup() {
        let all = markers(&travel_times(), true);
        assert_eq!(
            all[2].popup_lines(),
            vec![
                "Köln-Ehrenfeld".to_string(),
                "Erreichbar in 10,0 min".to_string(),
                "Erfordert 2 mal Umsteigen".to_string(),
            ]
        );
    }
}
