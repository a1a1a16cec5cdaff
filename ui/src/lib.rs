#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod args;
mod components;
mod location;
mod tasks;
mod viewer;

use abstutil::Timer;
use geom::{Bounds, GPSBounds};
use serde::{Deserialize, Serialize};
use structopt::StructOpt;
use widgetry::tools::PopupMsg;
use widgetry::{Canvas, Color, EventCtx, GfxCtx, Settings, SharedAppState, UpdateType};

use dataset::{DataLayout, DayCategory};
use model::view::Viewport;
use model::{AnalyticsEvent, Command, DataSource, Resolution, Session, Ticket};

use self::args::Args;
use self::tasks::{TaskResult, Tasks};

fn run(settings: Settings) {
    abstutil::logger::setup();

    let args = Args::from_iter(abstutil::cli_args());

    widgetry::run(settings, move |ctx| {
        let (source, startup_error) = match args.data_source() {
            Ok(source) => (Some(source), None),
            Err(err) => {
                error!("No dataset: {err:#}");
                (None, Some(err.to_string()))
            }
        };
        let mut app = App::new(ctx, &args, source);
        viewer::fit_camera(ctx, &app.gps_bounds, Viewport::initial());

        // This only makes sense on native; before_quit is never called on web.
        if let Ok(savestate) = abstio::maybe_read_json::<Savestate>(
            "data/save.json".to_string(),
            &mut Timer::throwaway(),
        ) {
            ctx.canvas.cam_x = savestate.cam_x;
            ctx.canvas.cam_y = savestate.cam_y;
            ctx.canvas.cam_zoom = savestate.cam_zoom;
            app.day = savestate.day;
            app.show_transfers = savestate.show_transfers;
        }

        let mut states = vec![viewer::Viewer::new_state(ctx, &mut app)];
        if let Some(err) = startup_error {
            states.push(PopupMsg::new_state(ctx, "Fehler", vec![err]));
        }
        (app, states)
    });
}

pub fn main() {
    let settings = Settings::new("Reichweiten-Checker");
    run(settings);
}

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_wasm() {
    run(Settings::new("Reichweiten-Checker").root_dom_element_id("map-widget".to_string()));
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    // The host page may draw a basemap underneath the canvas
    #[wasm_bindgen(js_namespace = window, catch)]
    fn sync_basemap(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> Result<(), JsValue>;
}

pub struct App {
    session: Session,
    // None if the dataset couldn't be configured; every load then fails
    source: Option<DataSource>,
    layout: DataLayout,
    analytics_url: Option<String>,
    tasks: Tasks,

    /// Fixed for the whole session. Every coordinate is projected relative to it.
    gps_bounds: GPSBounds,

    // Sticky controls
    day: DayCategory,
    show_transfers: bool,

    // Avoid syncing when bounds match
    #[allow(unused)]
    basemap_bounds: Bounds,
}

impl SharedAppState for App {
    fn draw_default(&self, g: &mut GfxCtx) {
        if cfg!(not(target_arch = "wasm32")) {
            g.clear(Color::hex("#f2efe9"));
        }
    }

    fn before_quit(&self, canvas: &Canvas) {
        let ss = Savestate {
            cam_x: canvas.cam_x,
            cam_y: canvas.cam_y,
            cam_zoom: canvas.cam_zoom,
            day: self.day,
            show_transfers: self.show_transfers,
        };
        abstio::write_json("data/save.json".to_string(), &ss);
    }
}

pub type Transition = widgetry::Transition<App>;

impl App {
    fn new(ctx: &mut EventCtx, args: &Args, source: Option<DataSource>) -> Self {
        let gps_bounds = model::view::region();
        let bounds = gps_bounds.to_bounds();
        ctx.canvas.map_dims = (bounds.max_x, bounds.max_y);

        let mut app = Self {
            session: Session::new(location::location(args.stop.as_deref())),
            source,
            layout: args.layout(),
            analytics_url: args.analytics_url.clone(),
            tasks: Tasks::new(),

            gps_bounds,

            day: DayCategory::Werktag,
            show_transfers: true,

            basemap_bounds: Bounds::new(),
        };

        if let Some(ref source) = app.source {
            app.tasks.load_directory(source);
        }
        app.track(AnalyticsEvent::page_view());
        // A shared link is only acted on once the directory is here
        let commands = app.session.poll_fragment();
        app.handle(commands);
        app
    }

    pub fn select_stop(&mut self, stop_name: &str) {
        if let Some(command) = self.session.select_stop(stop_name) {
            self.handle(vec![command]);
        }
    }

    /// Takes care of finished loads and navigation. Dialog changes are returned for the active
    /// state to carry out.
    pub fn update(&mut self, ctx: &mut EventCtx) -> Vec<Command> {
        let mut commands = Vec::new();
        for result in self.tasks.poll() {
            match result {
                TaskResult::Directory(result) => {
                    commands.extend(self.session.directory_loaded(result));
                }
                TaskResult::Stop(ticket, result) => {
                    let stop_name = ticket.stop_name().to_string();
                    match self.session.resolve(ticket, result) {
                        Resolution::Available(_) => {
                            info!("Showing {stop_name}");
                            self.track(AnalyticsEvent::stop_selected(&stop_name));
                        }
                        Resolution::Failed => {}
                        Resolution::Stale => {
                            debug!("Dropping stale result for {stop_name}");
                        }
                    }
                }
                TaskResult::Analytics(result) => {
                    if let Err(err) = result {
                        warn!("Analytics event lost: {err:#}");
                    }
                }
            }
        }
        commands.extend(self.session.poll_fragment());
        let dialog_commands = self.handle(commands);

        if self.tasks.is_busy() {
            ctx.request_update(UpdateType::Game);
        }
        dialog_commands
    }

    fn handle(&mut self, commands: Vec<Command>) -> Vec<Command> {
        let mut remaining = Vec::new();
        for command in commands {
            match command {
                Command::Fetch(ticket) => self.fetch(ticket),
                x => remaining.push(x),
            }
        }
        remaining
    }

    fn fetch(&mut self, ticket: Ticket) {
        match self.source {
            Some(ref source) => self.tasks.load_stop(source, self.layout, ticket),
            None => {
                self.session
                    .resolve(ticket, Err(anyhow!("no dataset is configured")));
            }
        }
    }

    fn track(&mut self, event: AnalyticsEvent) {
        if let Some(ref url) = self.analytics_url {
            self.tasks.send_analytics(url, event);
        }
    }

    #[allow(unused)]
    pub fn sync_basemap(&mut self, ctx: &mut EventCtx) {
        #[cfg(target_arch = "wasm32")]
        {
            // This method is usually called for every single event, but the camera hasn't always
            // moved
            let bounds = ctx.canvas.get_screen_bounds();
            if self.basemap_bounds == bounds {
                return;
            }
            self.basemap_bounds = bounds;

            let pt1 = geom::Pt2D::new(bounds.min_x, bounds.min_y).to_gps(&self.gps_bounds);
            let pt2 = geom::Pt2D::new(bounds.max_x, bounds.max_y).to_gps(&self.gps_bounds);
            if let Err(err) = sync_basemap(pt1.x(), pt1.y(), pt2.x(), pt2.y()) {
                debug!("Host page has no basemap: {err:?}");
            }
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct Savestate {
    cam_x: f64,
    cam_y: f64,
    cam_zoom: f64,
    day: DayCategory,
    show_transfers: bool,
}
