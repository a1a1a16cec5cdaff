#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod analytics;
mod fetch;
mod format;
mod router;
mod selection;
mod session;
pub mod view;

pub use self::analytics::AnalyticsEvent;
pub use self::fetch::{load_directory, load_stop, DataSource, Fetcher, HttpFetcher};
#[cfg(not(target_arch = "wasm32"))]
pub use self::fetch::DirFetcher;
pub use self::format::{format_decimal, format_minutes};
pub use self::router::{Dialog, FragmentRouter, LocationFragment, MemoryLocation, Route, RouteAction};
pub use self::selection::{FragmentEffect, Resolution, Selection, SelectionState, Ticket};
pub use self::session::{Command, Session};
