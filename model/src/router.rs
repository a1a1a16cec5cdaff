use dataset::encoding::decode_fragment;
use dataset::StopDirectory;

use crate::FragmentEffect;

/// Auxiliary dialogs that have their own fragment token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialog {
    Faq,
    Contact,
}

impl Dialog {
    pub fn token(self) -> &'static str {
        match self {
            Dialog::Faq => "faq",
            Dialog::Contact => "contact",
        }
    }
}

/// The meaning of a URL fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Nothing,
    Open(Dialog),
    Close,
    Stop(String),
}

impl Route {
    pub fn parse(fragment: &str) -> Route {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        match fragment {
            "" => Route::Nothing,
            "faq" => Route::Open(Dialog::Faq),
            "contact" => Route::Open(Dialog::Contact),
            "close" => Route::Close,
            _ => match decode_fragment(fragment) {
                Ok(name) if !name.is_empty() => Route::Stop(name),
                Ok(_) => Route::Nothing,
                Err(err) => {
                    warn!("Ignoring undecodable fragment {fragment}: {err}");
                    Route::Nothing
                }
            },
        }
    }
}

/// What the viewer should do about a fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteAction {
    Select(String),
    Open(Dialog),
    CloseDialogs,
}

/// Where the shareable fragment lives. In the browser, that's `window.location.hash`.
pub trait LocationFragment {
    /// Without the leading `#`
    fn read(&self) -> String;
    fn write(&mut self, fragment: &str);
}

/// A fragment that exists only in memory, for native builds and tests.
#[derive(Default)]
pub struct MemoryLocation {
    fragment: String,
}

impl MemoryLocation {
    pub fn new(fragment: &str) -> Self {
        Self {
            fragment: fragment.to_string(),
        }
    }
}

impl LocationFragment for MemoryLocation {
    fn read(&self) -> String {
        self.fragment.clone()
    }

    fn write(&mut self, fragment: &str) {
        self.fragment = fragment.to_string();
    }
}

/// Turns fragment changes into actions. Polled; a fragment only produces an action when it
/// differs from the last one seen or written.
pub struct FragmentRouter {
    last_seen: Option<String>,
    /// A stop named before the directory finished loading
    deferred: Option<String>,
}

impl FragmentRouter {
    pub fn new() -> Self {
        Self {
            last_seen: None,
            deferred: None,
        }
    }

    /// Checks the fragment for changes. Stops can only be selected once the directory is
    /// available; until then, the request is remembered.
    pub fn poll(
        &mut self,
        location: &dyn LocationFragment,
        directory: Option<&StopDirectory>,
    ) -> Option<RouteAction> {
        let fragment = location.read();
        if self.last_seen.as_ref() == Some(&fragment) {
            return None;
        }
        self.last_seen = Some(fragment.clone());

        let route = Route::parse(&fragment);
        // A newer stop or an emptied fragment replaces whatever was waiting for the directory.
        // Dialogs don't.
        if matches!(route, Route::Nothing | Route::Stop(_)) {
            self.deferred = None;
        }
        match route {
            Route::Nothing => None,
            Route::Open(dialog) => Some(RouteAction::Open(dialog)),
            Route::Close => Some(RouteAction::CloseDialogs),
            Route::Stop(name) => match directory {
                Some(directory) => resolve(directory, name),
                None => {
                    debug!("Deferring selection of {name} until the stop directory loads");
                    self.deferred = Some(name);
                    None
                }
            },
        }
    }

    /// Releases a selection requested before the directory was available.
    pub fn directory_loaded(&mut self, directory: &StopDirectory) -> Option<RouteAction> {
        let name = self.deferred.take()?;
        resolve(directory, name)
    }

    /// Performs a fragment change, remembering it so it isn't mistaken for navigation.
    pub fn apply(&mut self, location: &mut dyn LocationFragment, effect: FragmentEffect) {
        let fragment = match effect {
            FragmentEffect::Set(x) => x,
            FragmentEffect::Clear => String::new(),
        };
        self.write(location, &fragment);
    }

    pub fn write(&mut self, location: &mut dyn LocationFragment, fragment: &str) {
        location.write(fragment);
        self.last_seen = Some(fragment.to_string());
    }
}

impl Default for FragmentRouter {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve(directory: &StopDirectory, name: String) -> Option<RouteAction> {
    if directory.contains(&name) {
        Some(RouteAction::Select(name))
    } else {
        warn!("The fragment names {name}, but there's no such stop");
        None
    }
}

#[cfg(test)]
mod tests {
    use dataset::encoding::encode_fragment;

    use super::*;

    fn directory() -> StopDirectory {
        StopDirectory::from_records(vec![
            ("Köln Hbf".to_string(), "Köln".to_string()),
            ("Bonn (Rhein) Beuel".to_string(), "Bonn".to_string()),
        ])
    }

    #[test]
    fn parse_reserved_tokens() {
        assert_eq!(Route::parse(""), Route::Nothing);
        assert_eq!(Route::parse("#"), Route::Nothing);
        assert_eq!(Route::parse("#faq"), Route::Open(Dialog::Faq));
        assert_eq!(Route::parse("contact"), Route::Open(Dialog::Contact));
        assert_eq!(Route::parse("close"), Route::Close);
        assert_eq!(
            Route::parse(&encode_fragment("Bonn (Rhein) Beuel")),
            Route::Stop("Bonn (Rhein) Beuel".to_string())
        );
    }

    #[test]
    fn initial_stop_waits_for_directory() {
        let location = MemoryLocation::new(&encode_fragment("Köln Hbf"));
        let mut router = FragmentRouter::new();
        assert_eq!(router.poll(&location, None), None);
        // Polling again without a change doesn't lose the deferred request
        assert_eq!(router.poll(&location, None), None);
        assert_eq!(
            router.directory_loaded(&directory()),
            Some(RouteAction::Select("Köln Hbf".to_string()))
        );
        assert_eq!(router.directory_loaded(&directory()), None);
    }

    #[test]
    fn newer_fragment_replaces_deferred_stop() {
        let mut location = MemoryLocation::new(&encode_fragment("Köln Hbf"));
        let mut router = FragmentRouter::new();
        assert_eq!(router.poll(&location, None), None);

        // Opening a dialog keeps the request
        location.write("faq");
        assert_eq!(
            router.poll(&location, None),
            Some(RouteAction::Open(Dialog::Faq))
        );

        // Another stop arrives along with the directory
        let dir = directory();
        location.write(&encode_fragment("Bonn (Rhein) Beuel"));
        assert_eq!(
            router.poll(&location, Some(&dir)),
            Some(RouteAction::Select("Bonn (Rhein) Beuel".to_string()))
        );
        assert_eq!(router.directory_loaded(&dir), None);
    }

    #[test]
    fn cleared_fragment_drops_deferred_stop() {
        let mut location = MemoryLocation::new(&encode_fragment("Köln Hbf"));
        let mut router = FragmentRouter::new();
        assert_eq!(router.poll(&location, None), None);
        location.write("");
        assert_eq!(router.poll(&location, None), None);
        assert_eq!(router.directory_loaded(&directory()), None);
    }

    #[test]
    fn unknown_stop_is_ignored() {
        let location = MemoryLocation::new(&encode_fragment("Atlantis"));
        let mut router = FragmentRouter::new();
        assert_eq!(router.poll(&location, Some(&directory())), None);
    }

    #[test]
    fn own_writes_are_not_navigation() {
        let mut location = MemoryLocation::default();
        let dir = directory();
        let mut router = FragmentRouter::new();
        assert_eq!(router.poll(&location, Some(&dir)), None);

        router.apply(&mut location, FragmentEffect::Set(encode_fragment("Köln Hbf")));
        assert_eq!(router.poll(&location, Some(&dir)), None);

        // The user edits the fragment directly
        location.write("faq");
        assert_eq!(
            router.poll(&location, Some(&dir)),
            Some(RouteAction::Open(Dialog::Faq))
        );
        location.write(&encode_fragment("Bonn (Rhein) Beuel"));
        assert_eq!(
            router.poll(&location, Some(&dir)),
            Some(RouteAction::Select("Bonn (Rhein) Beuel".to_string()))
        );
    }
}
