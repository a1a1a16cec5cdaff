use widgetry::{Autocomplete, EventCtx, GfxCtx, Line, Outcome, Panel, State, TextExt, Widget};

use crate::{App, Transition};

/// Find a stop by name or municipality.
pub struct SearchForStop {
    panel: Panel,
}

impl SearchForStop {
    pub fn new_state(ctx: &mut EventCtx, app: &App) -> Box<dyn State<App>> {
        let search = match app.session.directory() {
            Some(directory) => {
                let entries = directory
                    .stops()
                    .iter()
                    .map(|stop| (stop.search_value.clone(), stop.label.clone()))
                    .collect();
                Autocomplete::new_widget(ctx, entries, 10).named("search")
            }
            // The button is disabled until the directory loads, but it might have failed since
            None => "Die Haltestellen konnten nicht geladen werden.".text_widget(ctx),
        };

        Box::new(Self {
            panel: Panel::new_builder(Widget::col(vec![
                Widget::row(vec![
                    Line("Haltestelle suchen").small_heading().into_widget(ctx),
                    ctx.style().btn_close_widget(ctx),
                ]),
                search,
            ]))
            .build(ctx),
        })
    }
}

impl State<App> for SearchForStop {
    fn event(&mut self, ctx: &mut EventCtx, app: &mut App) -> Transition {
        if let Outcome::Clicked(x) = self.panel.event(ctx) {
            match x.as_ref() {
                "close" => {
                    return Transition::Pop;
                }
                _ => unreachable!(),
            }
        }

        if let Some(mut stops) = self.panel.autocomplete_done::<String>("search") {
            if !stops.is_empty() {
                app.select_stop(&stops.remove(0));
            }
            return Transition::Pop;
        }

        Transition::Keep
    }

    fn draw(&self, g: &mut GfxCtx, _: &App) {
        self.panel.draw(g);
    }
}
