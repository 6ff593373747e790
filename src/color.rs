use crate::node::{Color, Paint};

/// Scales a `[0, 1]` channel to a byte, rounding half away from zero.
pub fn channel_byte(channel: f64) -> u8 {
    if channel.is_nan() {
        return 0;
    }
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

/// `#rrggbb`, alpha ignored.
pub fn hex_rgb(color: &Color) -> String {
    let bytes = [
        channel_byte(color.r),
        channel_byte(color.g),
        channel_byte(color.b),
    ];
    format!("#{}", hex::encode(bytes))
}

/// `#rrggbbaa`.
pub fn hex_rgba(color: &Color) -> String {
    let bytes = [
        channel_byte(color.r),
        channel_byte(color.g),
        channel_byte(color.b),
        channel_byte(color.a),
    ];
    format!("#{}", hex::encode(bytes))
}

/// Display form of a colour: six digits when opaque, eight when alpha < 1.
pub fn hex_color(color: &Color) -> String {
    if color.a < 1.0 {
        hex_rgba(color)
    } else {
        hex_rgb(color)
    }
}

/// Display colour of a paint. Only SOLID paints resolve.
pub fn paint_hex(paint: &Paint) -> Option<String> {
    paint.solid_color().map(|color| hex_color(&color))
}

/// Inverse of [`hex_rgb`] / [`hex_rgba`]; missing alpha decodes as opaque.
pub fn parse_hex(raw: &str) -> Option<Color> {
    let digits = raw.strip_prefix('#').unwrap_or(raw);
    if digits.len() != 6 && digits.len() != 8 {
        return None;
    }
    let bytes = hex::decode(digits).ok()?;
    let unit = |byte: u8| f64::from(byte) / 255.0;
    Some(Color {
        r: unit(bytes[0]),
        g: unit(bytes[1]),
        b: unit(bytes[2]),
        a: bytes.get(3).copied().map(unit).unwrap_or(1.0),
    })
}
