use std::rc::Rc;

use anyhow::Result;

use dataset::encoding::encode_fragment;
use dataset::StopPayload;

/// What the viewer currently shows.
#[derive(Clone, Debug)]
pub enum Selection {
    Empty,
    Loading {
        stop_name: String,
    },
    Available {
        stop_name: String,
        stop: Rc<StopPayload>,
    },
    Error {
        stop_name: String,
        message: String,
    },
}

impl Selection {
    /// The stop being loaded, shown, or that failed.
    pub fn stop_name(&self) -> Option<&str> {
        match self {
            Selection::Empty => None,
            Selection::Loading { stop_name }
            | Selection::Available { stop_name, .. }
            | Selection::Error { stop_name, .. } => Some(stop_name),
        }
    }
}

/// Identifies one selection request. Only the most recently issued ticket may commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    stop_name: String,
    generation: usize,
}

impl Ticket {
    pub fn stop_name(&self) -> &str {
        &self.stop_name
    }
}

/// A change the caller must make to the shareable URL fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FragmentEffect {
    Set(String),
    Clear,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    Available(FragmentEffect),
    Failed,
    /// A newer request was issued since; the result was dropped.
    Stale,
}

/// The authoritative selection. Every transition replaces the whole state; nothing is patched
/// incrementally.
pub struct SelectionState {
    current: Selection,
    generation: usize,
}

impl SelectionState {
    pub fn new() -> Self {
        Self {
            current: Selection::Empty,
            generation: 0,
        }
    }

    pub fn current(&self) -> &Selection {
        &self.current
    }

    pub fn stop_name(&self) -> Option<&str> {
        self.current.stop_name()
    }

    pub fn stop(&self) -> Option<&Rc<StopPayload>> {
        match self.current {
            Selection::Available { ref stop, .. } => Some(stop),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.current, Selection::Loading { .. })
    }

    /// Starts loading a stop, unless it's already loading or shown. The previous payload is
    /// dropped immediately. Retrying a stop that failed is allowed.
    pub fn select_stop(&mut self, stop_name: &str) -> Option<Ticket> {
        match self.current {
            Selection::Loading { stop_name: ref x } | Selection::Available { stop_name: ref x, .. }
                if x == stop_name =>
            {
                debug!("Ignoring repeated selection of {stop_name}");
                return None;
            }
            _ => {}
        }

        self.generation += 1;
        self.current = Selection::Loading {
            stop_name: stop_name.to_string(),
        };
        Some(Ticket {
            stop_name: stop_name.to_string(),
            generation: self.generation,
        })
    }

    pub fn resolve(&mut self, ticket: Ticket, result: Result<StopPayload>) -> Resolution {
        match result {
            Ok(stop) => self.fetch_succeeded(ticket, stop),
            Err(err) => self.fetch_failed(ticket, err),
        }
    }

    pub fn fetch_succeeded(&mut self, ticket: Ticket, stop: StopPayload) -> Resolution {
        if !self.is_current(&ticket) {
            debug!("Dropping stale result for {}", ticket.stop_name);
            return Resolution::Stale;
        }
        let effect = FragmentEffect::Set(encode_fragment(&ticket.stop_name));
        self.current = Selection::Available {
            stop_name: ticket.stop_name,
            stop: Rc::new(stop),
        };
        Resolution::Available(effect)
    }

    pub fn fetch_failed(&mut self, ticket: Ticket, err: anyhow::Error) -> Resolution {
        if !self.is_current(&ticket) {
            debug!("Dropping stale failure for {}: {err}", ticket.stop_name);
            return Resolution::Stale;
        }
        error!("Couldn't load {}: {err:#}", ticket.stop_name);
        self.current = Selection::Error {
            stop_name: ticket.stop_name,
            message: err.to_string(),
        };
        Resolution::Failed
    }

    pub fn clear_selection(&mut self) -> FragmentEffect {
        // Results of anything still in flight must not resurrect the selection
        self.generation += 1;
        self.current = Selection::Empty;
        FragmentEffect::Clear
    }

    /// The fragment matching the current state, if the state determines one.
    pub fn fragment(&self) -> Option<FragmentEffect> {
        match self.current {
            Selection::Empty => Some(FragmentEffect::Clear),
            Selection::Available { ref stop_name, .. } => {
                Some(FragmentEffect::Set(encode_fragment(stop_name)))
            }
            Selection::Loading { .. } | Selection::Error { .. } => None,
        }
    }

    fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.generation == self.generation && self.is_loading()
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use dataset::{DayCategory, StopStats, TravelTimes};

    use super::*;

    fn payload(stop_name: &str) -> StopPayload {
        let mut travel_times = BTreeMap::new();
        for day in DayCategory::all() {
            travel_times.insert(
                day,
                serde_json::from_str::<TravelTimes>(
                    r#"{"destinations": [], "stop_info": {"coord": [51.0, 7.0]}}"#,
                )
                .unwrap(),
            );
        }
        let stats = StopStats {
            stop_name: stop_name.to_string(),
            municipality: "Köln".to_string(),
            heatmap: BTreeMap::new(),
            route_types: BTreeMap::new(),
            route_types_by_day: BTreeMap::new(),
            rank_data: BTreeMap::new(),
        };
        StopPayload::new(travel_times, stats).unwrap()
    }

    #[test]
    fn happy_path() {
        let mut state = SelectionState::new();
        assert!(state.stop().is_none());
        let ticket = state.select_stop("Köln Hbf").unwrap();
        assert!(state.is_loading());
        assert_eq!(
            state.resolve(ticket, Ok(payload("Köln Hbf"))),
            Resolution::Available(FragmentEffect::Set(encode_fragment("Köln Hbf")))
        );
        assert_eq!(state.stop().unwrap().stop_name(), "Köln Hbf");
        assert_eq!(state.clear_selection(), FragmentEffect::Clear);
        assert!(matches!(state.current(), Selection::Empty));
    }

    #[test]
    fn duplicate_selection_is_ignored() {
        let mut state = SelectionState::new();
        let ticket = state.select_stop("Köln Hbf").unwrap();
        assert!(state.select_stop("Köln Hbf").is_none());
        state.resolve(ticket, Ok(payload("Köln Hbf")));
        assert!(state.select_stop("Köln Hbf").is_none());
        assert!(state.select_stop("Essen Hbf").is_some());
    }

    #[test]
    fn newer_request_wins_regardless_of_order() {
        let mut state = SelectionState::new();
        let a = state.select_stop("Köln Hbf").unwrap();
        let b = state.select_stop("Essen Hbf").unwrap();
        assert!(matches!(
            state.resolve(b, Ok(payload("Essen Hbf"))),
            Resolution::Available(_)
        ));
        assert_eq!(state.resolve(a, Ok(payload("Köln Hbf"))), Resolution::Stale);
        assert_eq!(state.stop_name(), Some("Essen Hbf"));
        assert_eq!(state.stop().unwrap().stop_name(), "Essen Hbf");
    }

    #[test]
    fn failure_clears_payload_and_allows_retry() {
        let mut state = SelectionState::new();
        let ticket = state.select_stop("Köln Hbf").unwrap();
        state.resolve(ticket, Ok(payload("Köln Hbf")));

        let ticket = state.select_stop("Essen Hbf").unwrap();
        assert!(state.stop().is_none());
        assert_eq!(
            state.resolve(ticket, Err(anyhow!("404"))),
            Resolution::Failed
        );
        assert!(matches!(state.current(), Selection::Error { .. }));
        assert!(state.stop().is_none());
        assert!(state.fragment().is_none());

        assert!(state.select_stop("Essen Hbf").is_some());
    }

    #[test]
    fn clearing_discards_in_flight_results() {
        let mut state = SelectionState::new();
        let ticket = state.select_stop("Köln Hbf").unwrap();
        state.clear_selection();
        assert_eq!(state.resolve(ticket, Ok(payload("Köln Hbf"))), Resolution::Stale);
        assert!(matches!(state.current(), Selection::Empty));
    }
}
