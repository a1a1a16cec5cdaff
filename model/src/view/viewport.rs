use geom::{GPSBounds, LonLat};

use dataset::TravelTimes;

/// How far around a stop to show when nothing is reachable from it, in degrees.
const NEIGHBORHOOD: f64 = 0.02;

/// Where the camera should go after selecting a stop.
#[derive(Clone, Copy)]
pub enum Viewport {
    /// Show everything between these corners
    Fit { min: LonLat, max: LonLat },
    /// Nothing is reachable; just show the area around the stop
    Center(LonLat),
}

impl Viewport {
    /// Fits every destination for the day, regardless of which ones are currently shown, so
    /// toggling transfers doesn't move the camera.
    pub fn for_stop(travel_times: &TravelTimes) -> Self {
        let mut pts = travel_times.destinations.iter().map(|dst| dst.lon_lat());
        let first = match pts.next() {
            Some(pt) => pt,
            None => return Self::Center(travel_times.origin()),
        };
        let (mut min_lon, mut min_lat) = (first.x(), first.y());
        let (mut max_lon, mut max_lat) = (min_lon, min_lat);
        for pt in pts {
            min_lon = min_lon.min(pt.x());
            min_lat = min_lat.min(pt.y());
            max_lon = max_lon.max(pt.x());
            max_lat = max_lat.max(pt.y());
        }
        Self::Fit {
            min: LonLat::new(min_lon, min_lat),
            max: LonLat::new(max_lon, max_lat),
        }
    }

    /// The area to fit the camera to. Centering becomes a small box around the stop.
    pub fn corners(self) -> (LonLat, LonLat) {
        match self {
            Self::Fit { min, max } => (min, max),
            Self::Center(pt) => (
                LonLat::new(pt.x() - NEIGHBORHOOD, pt.y() - NEIGHBORHOOD),
                LonLat::new(pt.x() + NEIGHBORHOOD, pt.y() + NEIGHBORHOOD),
            ),
        }
    }

    /// Where the map starts, before anything is selected: the whole of NRW.
    pub fn initial() -> Self {
        Self::Fit {
            min: LonLat::new(5.8941, 50.3103),
            max: LonLat::new(9.4868, 52.5295),
        }
    }
}

/// The map never goes beyond this. All coordinates are projected relative to it.
pub fn region() -> GPSBounds {
    let mut bounds = GPSBounds::new();
    bounds.update(LonLat::new(4.21, 48.51));
    bounds.update(LonLat::new(11.77, 53.44));
    bounds
}
