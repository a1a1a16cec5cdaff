use crate::encoding;
use crate::DayCategory;

/// How the per-stop files are laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataLayout {
    /// One file per day category plus one statistics file, fetched together.
    Split,
    /// One file per stop with everything.
    Merged,
}

/// A static JSON file produced by the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    dir: Option<&'static str>,
    stop_name: Option<String>,
}

impl Resource {
    pub fn directory() -> Self {
        Self {
            dir: None,
            stop_name: None,
        }
    }

    pub fn travel_times(day: DayCategory, stop_name: &str) -> Self {
        Self::per_stop(day.travel_times_dir(), stop_name)
    }

    pub fn stats(stop_name: &str) -> Self {
        Self::per_stop("stop_stats", stop_name)
    }

    pub fn merged(stop_name: &str) -> Self {
        Self::per_stop("merged", stop_name)
    }

    fn per_stop(dir: &'static str, stop_name: &str) -> Self {
        Self {
            dir: Some(dir),
            stop_name: Some(stop_name.to_string()),
        }
    }

    /// Relative path of the file on disk.
    pub fn file_path(&self) -> String {
        self.path(encoding::file_key)
    }

    /// Relative path to request from an HTTP server.
    pub fn url_path(&self) -> String {
        self.path(encoding::url_key)
    }

    fn path(&self, key: fn(&str) -> String) -> String {
        match (self.dir, &self.stop_name) {
            (Some(dir), Some(name)) => format!("{dir}/{}.json", key(name)),
            _ => "stops.json".to_string(),
        }
    }
}
