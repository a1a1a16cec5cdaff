use geom::LonLat;
use serde::{Deserialize, Serialize};

/// Everything reachable from one stop within an hour, for one day category.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TravelTimes {
    pub destinations: Vec<Destination>,
    pub stop_info: StopInfo,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Destination {
    /// `[lat, lon]`
    pub coord: [f64; 2],
    /// Seconds
    pub time: f64,
    #[serde(rename = "trans")]
    pub transfers: usize,
    pub name: String,
    /// Some exports carry a hex color. It's ignored, so the map always matches the legend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StopInfo {
    /// `[lat, lon]`
    pub coord: [f64; 2],
}

impl TravelTimes {
    /// Sorts destinations by decreasing travel time. Later entries are drawn on top, so this
    /// keeps the nearest ones visible.
    pub(crate) fn order_furthest_first(&mut self) {
        self.destinations
            .sort_by(|a, b| b.time.total_cmp(&a.time));
    }

    pub fn origin(&self) -> LonLat {
        self.stop_info.lon_lat()
    }
}

impl Destination {
    pub fn lon_lat(&self) -> LonLat {
        LonLat::new(self.coord[1], self.coord[0])
    }

    pub fn needs_transfer(&self) -> bool {
        self.transfers > 0
    }
}

impl StopInfo {
    pub fn lon_lat(&self) -> LonLat {
        LonLat::new(self.coord[1], self.coord[0])
    }
}
