use widgetry::{Color, EventCtx, Line, Text, TextExt, Widget};

use model::view::{route_type_shares, Heatmap, Ranking};
use model::Selection;

use super::charts;
use crate::App;

/// Everything the side panel says about the current selection.
pub fn selection(ctx: &mut EventCtx, app: &App) -> Widget {
    match app.session.selection() {
        Selection::Empty => Text::from(Line(
            "Wählen Sie eine Haltestelle, um zu sehen, wohin man von dort in einer Stunde kommt.",
        ))
        .wrap_to_pct(ctx, 20)
        .into_widget(ctx),
        Selection::Loading { stop_name } => {
            format!("{stop_name} wird geladen...").text_widget(ctx)
        }
        Selection::Error { stop_name, message } => Widget::col(vec![
            Line(format!("Die Daten für {stop_name} konnten nicht geladen werden."))
                .fg(Color::RED)
                .into_widget(ctx),
            Line(message).small().into_widget(ctx),
        ]),
        Selection::Available { stop, .. } => {
            let stats = &stop.stats;
            let mut col = vec![
                Line(&stats.stop_name).small_heading().into_widget(ctx),
                Line(&stats.municipality).secondary().into_widget(ctx),
            ];
            let num_destinations = stop.travel_times(app.day).destinations.len();
            col.push(
                format!("{num_destinations} Haltestellen in einer Stunde erreichbar")
                    .text_widget(ctx),
            );
            match Ranking::for_day(stats, app.day) {
                Some(ranking) => col.push(charts::ranking(ctx, &ranking, app.day)),
                None => col.push(format!("Keine Vergleichsdaten für {}", app.day).text_widget(ctx)),
            }
            col.push(charts::route_types(
                ctx,
                &route_type_shares(stats.route_types_for(app.day)),
            ));
            col.push(charts::heatmap(ctx, &Heatmap::new(&stats.heatmap)));
            Widget::col(col).section(ctx)
        }
    }
}
