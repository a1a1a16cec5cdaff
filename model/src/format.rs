/// Formats a number the German way: `,` separates decimals and `.` groups thousands.
pub fn format_decimal(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::new();
    for (idx, c) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if let Some(frac) = frac_part {
        grouped.push(',');
        grouped.push_str(frac);
    }

    // Don't print -0,0
    if value < 0.0 && grouped.chars().any(|c| c.is_ascii_digit() && c != '0') {
        grouped.insert(0, '-');
    }
    grouped
}

/// A travel time in seconds, as minutes with one decimal.
pub fn format_minutes(seconds: f64) -> String {
    format_decimal(seconds / 60.0, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn german_formatting() {
        assert_eq!(format_decimal(0.0, 1), "0,0");
        assert_eq!(format_decimal(7.26, 1), "7,3");
        assert_eq!(format_decimal(1234.5, 1), "1.234,5");
        assert_eq!(format_decimal(1234567.0, 0), "1.234.567");
        assert_eq!(format_decimal(-12.0, 0), "-12");
        assert_eq!(format_decimal(-0.01, 1), "0,0");
        assert_eq!(format_minutes(750.0), "12,5");
    }
}
