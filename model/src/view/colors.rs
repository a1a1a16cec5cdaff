use colorous::Color;

/// Empty heatmap cells use this, never a color from the scale.
pub const NEUTRAL: Color = Color {
    r: 0xf8,
    g: 0xf8,
    b: 0xf8,
};

pub const DEFAULT_ROUTE_TYPE_COLOR: Color = Color {
    r: 0x99,
    g: 0x99,
    b: 0x99,
};

/// The shared scale for travel times and heatmap intensity. The darkest end of inferno is
/// skipped, since it's hard to tell apart from black outlines.
pub fn scale(fraction: f64) -> Color {
    colorous::INFERNO.eval_continuous(fraction.clamp(0.0, 1.0) * 0.9 + 0.1)
}

/// `fraction` is the travel time relative to the maximum shown.
pub fn travel_time_color(fraction: f64) -> Color {
    scale(fraction)
}

pub fn route_type_color(route_type: &str) -> Color {
    let hex = match route_type {
        "Kabel-Straßenbahn" => 0xfb9a99,
        "Straßenbahn" => 0xe31a1c,
        "S-Bahn" => 0x33a02c,
        "U-Bahn" => 0x1f78b4,
        "Bahn" => 0xa6cee3,
        "Regionalbahn" => 0xb2df8a,
        "Fernzug" => 0xfdbf6f,
        "Hochgeschwindigkeitszug" => 0xff7f00,
        "Fähre" => 0xcab2d6,
        "Bus" => 0x6a3d9a,
        _ => return DEFAULT_ROUTE_TYPE_COLOR,
    };
    rgb(hex)
}

fn rgb(hex: u32) -> Color {
    Color {
        r: ((hex >> 16) & 0xff) as u8,
        g: ((hex >> 8) & 0xff) as u8,
        b: (hex & 0xff) as u8,
    }
}
