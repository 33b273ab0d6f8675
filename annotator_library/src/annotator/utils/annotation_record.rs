use std::fmt::{Display, Formatter};

/// One line of a YOLO label file: `class x_center y_center width height`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnnotationRecord {
    pub class_id: u32,
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
}

impl Display for AnnotationRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.class_id,
            format_float(self.x_center),
            format_float(self.y_center),
            format_float(self.width),
            format_float(self.height)
        )
    }
}

/// Shortest round-trip rendering that keeps a trailing `.0` on integral values
/// and switches to `1e-05` style notation below 1e-4 and from 1e16 upward.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let scientific = format!("{value:e}");
    let exponent = scientific
        .split_once('e')
        .and_then(|(_, exponent)| exponent.parse::<i32>().ok())
        .unwrap_or(0);
    if value != 0.0 && !(-4..16).contains(&exponent) {
        let mantissa = scientific.split('e').next().unwrap_or_default();
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exponent.abs());
    }
    let plain = value.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{plain}.0")
    }
}
