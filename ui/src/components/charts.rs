use geom::Polygon;
use widgetry::{Color, EventCtx, GeomBatch, Line, Text, TextExt, Widget};

use dataset::DayCategory;
use model::format_decimal;
use model::view::{Heatmap, Ranking, RouteTypeShare};

use super::to_color;

/// All columns together, whether they're 24 hours or a few coarser bins
const HEATMAP_WIDTH: f64 = 312.0;
const CELL_HEIGHT: f64 = 16.0;
const CELL_GAP: f64 = 1.0;
const LABEL_WIDTH: f64 = 30.0;
const BAR_WIDTH: f64 = 300.0;
const BAR_HEIGHT: f64 = 20.0;

/// Departures per weekday and hour. Darker cells have more departures.
pub fn heatmap(ctx: &mut EventCtx, heatmap: &Heatmap) -> Widget {
    if heatmap.rows.is_empty() {
        return "Keine Abfahrten".text_widget(ctx);
    }

    let mut batch = GeomBatch::new();
    let column_width = HEATMAP_WIDTH / heatmap.columns.max(1) as f64;
    let cell = Polygon::rectangle(column_width - CELL_GAP, CELL_HEIGHT);
    let row_height = CELL_HEIGHT + CELL_GAP;
    for (idx, row) in heatmap.rows.iter().enumerate() {
        let y = idx as f64 * row_height;
        batch.append(
            Text::from(Line(row.short_label()).small())
                .render_autocropped(ctx)
                .translate(0.0, y),
        );
        for (column, count) in row.counts.iter().enumerate() {
            let x = LABEL_WIDTH + column as f64 * column_width;
            batch.push(
                to_color(heatmap.color(*count)),
                cell.clone().translate(x, y),
            );
        }
        let x = LABEL_WIDTH + HEATMAP_WIDTH + 5.0;
        batch.append(
            Text::from(Line(row.total().to_string()).small())
                .render_autocropped(ctx)
                .translate(x, y),
        );
    }

    let y = heatmap.rows.len() as f64 * row_height;
    for (column, hour) in heatmap.ticks() {
        let x = LABEL_WIDTH + column as f64 * column_width;
        batch.append(
            Text::from(Line(format!("{hour} Uhr")).small())
                .render_autocropped(ctx)
                .translate(x, y),
        );
    }

    Widget::col(vec![
        Line("Abfahrten pro Stunde").small_heading().into_widget(ctx),
        batch.into_widget(ctx),
    ])
}

/// One bar split by vehicle type, with a legend underneath.
pub fn route_types(ctx: &mut EventCtx, shares: &[RouteTypeShare]) -> Widget {
    let mut col = vec![Line("Verkehrsmittel").small_heading().into_widget(ctx)];
    if shares.is_empty() {
        col.push("Keine Abfahrten".text_widget(ctx));
        return Widget::col(col);
    }

    let mut batch = GeomBatch::new();
    let mut x = 0.0;
    for share in shares {
        let width = BAR_WIDTH * share.percentage / 100.0;
        if width > 0.0 {
            batch.push(
                to_color(share.color),
                Polygon::rectangle(width, BAR_HEIGHT).translate(x, 0.0),
            );
        }
        x += width;
    }
    col.push(batch.into_widget(ctx));

    for share in shares {
        col.push(Widget::row(vec![
            GeomBatch::from(vec![(
                to_color(share.color),
                Polygon::rectangle(BAR_HEIGHT / 2.0, BAR_HEIGHT / 2.0),
            )])
            .into_widget(ctx)
            .centered_vert(),
            format!(
                "{}: {}%",
                share.route_type,
                format_decimal(share.percentage, 1)
            )
            .text_widget(ctx),
        ]));
    }
    Widget::col(col)
}

/// How this stop compares to the rest of the region.
pub fn ranking(ctx: &mut EventCtx, ranking: &Ranking, day: DayCategory) -> Widget {
    let mut batch = GeomBatch::new();
    let mut x = 0.0;
    for (fraction, color) in [
        (ranking.worse, Color::hex("#00345f")),
        (ranking.equal, Color::grey(0.6)),
        (ranking.better, Color::hex("#d9e1e8")),
    ] {
        let width = BAR_WIDTH * fraction;
        if width > 0.0 {
            batch.push(color, Polygon::rectangle(width, BAR_HEIGHT).translate(x, 0.0));
        }
        x += width;
    }

    Widget::col(vec![
        Line("Im Vergleich").small_heading().into_widget(ctx),
        batch.into_widget(ctx),
        Text::from(Line(ranking.sentence(day)))
            .wrap_to_pixels(ctx, BAR_WIDTH)
            .into_widget(ctx),
    ])
}
