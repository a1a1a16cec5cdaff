use model::{LocationFragment, MemoryLocation};

/// Where the shareable fragment lives for this build. Natively there's no URL bar, so `--stop`
/// seeds an in-memory one.
#[cfg(not(target_arch = "wasm32"))]
pub fn location(initial_stop: Option<&str>) -> Box<dyn LocationFragment> {
    let fragment = initial_stop
        .map(dataset::encoding::encode_fragment)
        .unwrap_or_default();
    Box::new(MemoryLocation::new(&fragment))
}

#[cfg(target_arch = "wasm32")]
pub fn location(initial_stop: Option<&str>) -> Box<dyn LocationFragment> {
    match web_sys::window() {
        Some(window) => {
            let mut location = BrowserLocation { window };
            // A shared link takes priority over the query string
            if let Some(name) = initial_stop {
                if location.read().is_empty() {
                    location.write(&dataset::encoding::encode_fragment(name));
                }
            }
            Box::new(location)
        }
        None => {
            warn!("No window; the URL fragment won't be kept in sync");
            Box::new(MemoryLocation::default())
        }
    }
}

/// `window.location.hash`
#[cfg(target_arch = "wasm32")]
struct BrowserLocation {
    window: web_sys::Window,
}

#[cfg(target_arch = "wasm32")]
impl LocationFragment for BrowserLocation {
    fn read(&self) -> String {
        match self.window.location().hash() {
            Ok(hash) => hash.strip_prefix('#').unwrap_or(&hash).to_string(),
            Err(err) => {
                warn!("Couldn't read the URL fragment: {err:?}");
                String::new()
            }
        }
    }

    fn write(&mut self, fragment: &str) {
        if let Err(err) = self.window.location().set_hash(fragment) {
            warn!("Couldn't set the URL fragment: {err:?}");
        }
    }
}
