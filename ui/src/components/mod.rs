mod charts;
pub mod describe;
mod dialog;

pub use dialog::InfoDialog;

use widgetry::Color;

pub fn to_color(color: colorous::Color) -> Color {
    Color::rgb(color.r as usize, color.g as usize, color.b as usize)
}
