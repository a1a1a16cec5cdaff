mod map;
mod search;

use widgetry::tools::{ColorLegend, ColorScale};
use widgetry::{
    Choice, EventCtx, GfxCtx, HorizontalAlignment, Line, Outcome, Panel, State, Toggle,
    VerticalAlignment, Widget,
};

use dataset::DayCategory;
use model::view::{travel_time_color, MAX_TRAVEL_TIME_SECONDS};
use model::{Command, Dialog, Selection};

pub use self::map::fit_camera;
use self::map::MapView;
use self::search::SearchForStop;
use crate::components::{describe, to_color, InfoDialog};
use crate::{App, Transition};

pub struct Viewer {
    panel: Panel,
    map: MapView,
    // What the panel currently describes
    showing: Option<Showing>,
}

impl Viewer {
    pub fn new_state(ctx: &mut EventCtx, app: &mut App) -> Box<dyn State<App>> {
        let mut state = Self {
            panel: make_panel(ctx, app),
            map: MapView::new(),
            showing: None,
        };
        state.refresh(ctx, app);
        Box::new(state)
    }

    /// Brings the panel and map up to date with the selection and controls. Cheap when nothing
    /// changed.
    fn refresh(&mut self, ctx: &mut EventCtx, app: &App) {
        let showing = Showing {
            selection: SelectionKey::new(app.session.selection()),
            day: app.day,
            searchable: app.session.directory().is_some(),
        };
        if self.showing.as_ref() != Some(&showing) {
            let details = describe::selection(ctx, app);
            self.panel.replace(ctx, "details", details);
            self.panel.replace(ctx, "search", search_button(ctx, app));
            self.showing = Some(showing);
        }

        let stop = app.session.stop().map(|stop| stop.as_ref());
        self.map.show(ctx, app, stop);
    }
}

impl State<App> for Viewer {
    fn event(&mut self, ctx: &mut EventCtx, app: &mut App) -> Transition {
        ctx.canvas_movement();
        app.sync_basemap(ctx);
        self.map.event(ctx, app);

        for command in app.update(ctx) {
            if let Command::Open(dialog) = command {
                self.refresh(ctx, app);
                return Transition::Push(InfoDialog::new_state(ctx, dialog));
            }
        }

        match self.panel.event(ctx) {
            Outcome::Clicked(x) => match x.as_ref() {
                "Haltestelle suchen" => {
                    return Transition::Push(SearchForStop::new_state(ctx, app));
                }
                "Auswahl aufheben" => {
                    app.session.clear_selection();
                }
                "FAQ" => {
                    return open_dialog(ctx, app, Dialog::Faq);
                }
                "Kontakt" => {
                    return open_dialog(ctx, app, Dialog::Contact);
                }
                _ => unreachable!(),
            },
            Outcome::Changed(_) => {
                app.day = self.panel.dropdown_value("day");
                app.show_transfers = self.panel.is_checked("Mit Umsteigen");
            }
            _ => {}
        }

        self.refresh(ctx, app);
        Transition::Keep
    }

    fn draw(&self, g: &mut GfxCtx, _: &App) {
        self.map.draw(g);
        self.panel.draw(g);
    }

    fn recreate(&mut self, ctx: &mut EventCtx, app: &mut App) -> Box<dyn State<App>> {
        Self::new_state(ctx, app)
    }
}

fn open_dialog(ctx: &mut EventCtx, app: &mut App, dialog: Dialog) -> Transition {
    app.session.open_dialog(dialog);
    Transition::Push(InfoDialog::new_state(ctx, dialog))
}

fn make_panel(ctx: &mut EventCtx, app: &App) -> Panel {
    let scale = ColorScale(
        (0..=4)
            .map(|i| to_color(travel_time_color(i as f64 / 4.0)))
            .collect(),
    );
    let max_minutes = (MAX_TRAVEL_TIME_SECONDS / 60.0).round();

    Panel::new_builder(Widget::col(vec![
        Widget::row(vec![
            Line("Reichweiten-Checker").small_heading().into_widget(ctx),
            ctx.style().btn_plain.text("FAQ").build_def(ctx),
            ctx.style().btn_plain.text("Kontakt").build_def(ctx),
        ]),
        Widget::placeholder(ctx, "search"),
        Widget::row(vec![
            Widget::dropdown(
                ctx,
                "day",
                app.day,
                DayCategory::all()
                    .into_iter()
                    .map(|day| Choice::new(day.label(), day))
                    .collect(),
            ),
            Toggle::checkbox(ctx, "Mit Umsteigen", None, app.show_transfers),
        ]),
        Line("Fahrzeit").small().into_widget(ctx),
        ColorLegend::gradient(
            ctx,
            &scale,
            vec!["0 min".to_string(), format!("{max_minutes} min")],
        ),
        Widget::placeholder(ctx, "details"),
    ]))
    .aligned(HorizontalAlignment::Left, VerticalAlignment::Top)
    .build(ctx)
}

fn search_button(ctx: &mut EventCtx, app: &App) -> Widget {
    let mut row = vec![ctx
        .style()
        .btn_solid_primary
        .text("Haltestelle suchen")
        .disabled(app.session.directory().is_none())
        .build_def(ctx)];
    if app.session.selection().stop_name().is_some() {
        row.push(
            ctx.style()
                .btn_outline
                .text("Auswahl aufheben")
                .build_def(ctx),
        );
    }
    Widget::row(row)
}

#[derive(Clone, PartialEq)]
struct Showing {
    selection: SelectionKey,
    day: DayCategory,
    searchable: bool,
}

#[derive(Clone, PartialEq)]
enum SelectionKey {
    Empty,
    Loading(String),
    Available(String),
    Error(String),
}

impl SelectionKey {
    fn new(selection: &Selection) -> Self {
        match selection {
            Selection::Empty => Self::Empty,
            Selection::Loading { stop_name } => Self::Loading(stop_name.clone()),
            Selection::Available { stop_name, .. } => Self::Available(stop_name.clone()),
            Selection::Error { stop_name, .. } => Self::Error(stop_name.clone()),
        }
    }
}
