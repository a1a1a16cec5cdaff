use geom::{Bounds, Circle, Distance, GPSBounds};
use widgetry::mapspace::{ObjectID, World};
use widgetry::{Color, EventCtx, GeomBatch, GfxCtx, Line, Text, UpdateType};

use dataset::{DayCategory, StopPayload};
use model::view::{markers, Viewport};

use crate::components::to_color;
use crate::App;

/// In pixels, independent of zoom
const MARKER_RADIUS: f64 = 7.0;
const ORIGIN_RADIUS: f64 = 10.0;
const OUTLINE_THICKNESS: f64 = 1.0;
/// Space between fitted destinations and the edge of the screen, in pixels
const FIT_PADDING: f64 = 50.0;
const MAX_ZOOM: f64 = 25.0;

/// The only thing drawing destinations. Callers say what should be shown; the world is only
/// rebuilt when that differs from what's already there.
pub struct MapView {
    world: World<Obj>,
    built: Option<MapKey>,
    // The camera moves once per selected stop, on the event after it arrives, so the panel's new
    // layout is in place first
    fitted_stop: Option<String>,
    pending_fit: Option<Viewport>,
}

#[derive(Clone, PartialEq)]
struct MapKey {
    stop: String,
    day: DayCategory,
    show_transfers: bool,
    // Markers have a fixed size on screen, so they're rebuilt when zoom changes enough
    zoom_level: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Obj {
    Origin,
    Destination(usize),
}
impl ObjectID for Obj {}

impl MapView {
    pub fn new() -> Self {
        Self {
            world: World::unbounded(),
            built: None,
            fitted_stop: None,
            pending_fit: None,
        }
    }

    /// Show a stop on the current day, with or without destinations requiring transfers.
    pub fn show(&mut self, ctx: &mut EventCtx, app: &App, stop: Option<&StopPayload>) {
        let stop = match stop {
            Some(stop) => stop,
            None => {
                if self.built.is_some() {
                    self.world = World::unbounded();
                    self.built = None;
                }
                self.fitted_stop = None;
                self.pending_fit = None;
                return;
            }
        };

        if self.fitted_stop.as_deref() != Some(stop.stop_name()) {
            self.fitted_stop = Some(stop.stop_name().to_string());
            self.pending_fit = Some(Viewport::for_stop(stop.travel_times(app.day)));
            ctx.request_update(UpdateType::Game);
        }

        let key = MapKey {
            stop: stop.stop_name().to_string(),
            day: app.day,
            show_transfers: app.show_transfers,
            zoom_level: (ctx.canvas.cam_zoom.log2() * 2.0).round() as i64,
        };
        if self.built.as_ref() == Some(&key) {
            return;
        }
        self.world = make_world(ctx, app, stop, &key);
        self.built = Some(key);
    }

    pub fn event(&mut self, ctx: &mut EventCtx, app: &App) {
        if let Some(viewport) = self.pending_fit.take() {
            fit_camera(ctx, &app.gps_bounds, viewport);
        }
        self.world.event(ctx);
    }

    pub fn draw(&self, g: &mut GfxCtx) {
        self.world.draw(g);
    }
}

pub fn fit_camera(ctx: &mut EventCtx, gps_bounds: &GPSBounds, viewport: Viewport) {
    let (min, max) = viewport.corners();
    let bounds = Bounds::from(&[min.to_pt(gps_bounds), max.to_pt(gps_bounds)]);
    let width = (ctx.canvas.window_width - 2.0 * FIT_PADDING).max(1.0);
    let height = (ctx.canvas.window_height - 2.0 * FIT_PADDING).max(1.0);
    // A single destination has no extent
    let zoom = (width / bounds.width().max(1.0)).min(height / bounds.height().max(1.0));
    ctx.canvas.cam_zoom = zoom.min(MAX_ZOOM);
    ctx.canvas.center_on_map_pt(bounds.center());
}

fn make_world(ctx: &mut EventCtx, app: &App, stop: &StopPayload, key: &MapKey) -> World<Obj> {
    let mut world = World::bounded(&app.gps_bounds.to_bounds());
    let travel_times = stop.travel_times(key.day);
    let pixel = Distance::meters(1.0 / ctx.canvas.cam_zoom);

    // Later markers cover earlier ones, and the nearest destinations come last. World doesn't
    // promise any order, so everything is drawn in one batch, and objects are only for hovering.
    let mut batch = GeomBatch::new();
    for (idx, marker) in markers(travel_times, key.show_transfers)
        .into_iter()
        .enumerate()
    {
        let pt = marker.pos.to_pt(&app.gps_bounds);
        let circle = Circle::new(pt, pixel * MARKER_RADIUS);
        let hitbox = circle.to_polygon();
        batch.push(to_color(marker.color), hitbox.clone());
        if let Ok(outline) = circle.to_outline(pixel * OUTLINE_THICKNESS) {
            batch.push(Color::BLACK, outline);
        }

        world
            .add(Obj::Destination(idx))
            .hitbox(hitbox)
            .draw(GeomBatch::new())
            .invisibly_hoverable()
            .tooltip(Text::from_multiline(
                marker.popup_lines().into_iter().map(Line).collect(),
            ))
            .build(ctx);
    }

    let origin = travel_times.origin().to_pt(&app.gps_bounds);
    let circle = Circle::new(origin, pixel * ORIGIN_RADIUS);
    batch.push(Color::hex("#00345f"), circle.to_polygon());
    if let Ok(outline) = circle.to_outline(pixel * 2.0 * OUTLINE_THICKNESS) {
        batch.push(Color::WHITE, outline);
    }
    world
        .add(Obj::Origin)
        .hitbox(circle.to_polygon())
        .draw(GeomBatch::new())
        .invisibly_hoverable()
        .tooltip(Text::from(Line(stop.stop_name()).small_heading()))
        .build(ctx);

    world.draw_master_batch(ctx, batch);
    world.initialize_hover(ctx);
    world
}
