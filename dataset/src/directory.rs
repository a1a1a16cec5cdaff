use std::collections::BTreeMap;

use anyhow::Result;

/// One entry of the stop directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StopRef {
    pub label: String,
    pub municipality: String,
    /// The label, prefixed by the municipality unless it already starts with it. This is what
    /// the search box matches against.
    pub search_value: String,
}

impl StopRef {
    pub fn new(label: String, municipality: String) -> Self {
        let search_value = if label.starts_with(&municipality) {
            label.clone()
        } else {
            format!("{municipality} {label}")
        };
        Self {
            label,
            municipality,
            search_value,
        }
    }
}

/// All stops that have data, loaded once from `stops.json`.
#[derive(Clone, Debug, Default)]
pub struct StopDirectory {
    stops: Vec<StopRef>,
    by_label: BTreeMap<String, usize>,
}

impl StopDirectory {
    /// Parses an array of `[name, municipality]` pairs. The pipeline sorts these by
    /// departures, and that order is kept.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let records: Vec<(String, String)> = crate::parse_json(bytes, "stop directory")?;
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<(String, String)>) -> Self {
        let mut directory = Self::default();
        for (label, municipality) in records {
            if directory.by_label.contains_key(&label) {
                warn!("Stop directory lists {label} twice, keeping the first");
                continue;
            }
            directory
                .by_label
                .insert(label.clone(), directory.stops.len());
            directory.stops.push(StopRef::new(label, municipality));
        }
        directory
    }

    pub fn get(&self, label: &str) -> Option<&StopRef> {
        self.by_label.get(label).map(|idx| &self.stops[*idx])
    }

    pub fn contains(&self, label: &str) -> bool {
        self.by_label.contains_key(label)
    }

    pub fn stops(&self) -> &[StopRef] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_value_prefixes_municipality() {
        let directory = StopDirectory::parse(
            r#"[["Köln Hbf", "Köln"], ["Bahnhof", "Brilon"], ["Köln Hbf", "Köln"]]"#.as_bytes(),
        )
        .unwrap();
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.get("Köln Hbf").unwrap().search_value, "Köln Hbf");
        assert_eq!(
            directory.get("Bahnhof").unwrap().search_value,
            "Brilon Bahnhof"
        );
        assert!(!directory.contains("Essen Hbf"));
    }

    #[test]
    fn malformed_directory_is_an_error() {
        assert!(StopDirectory::parse(b"{\"stops\": []}").is_err());
    }
}
