use egui::Color32;

use crate::error::EditorError;

/// Parse a CSS-style hex color literal (`#rgb` or `#rrggbb`, leading `#`
/// optional) into an opaque [`Color32`].
pub fn parse_hex(literal: &str) -> Result<Color32, EditorError> {
    let hex = literal.strip_prefix('#').unwrap_or(literal);
    if !hex.is_ascii() {
        return Err(EditorError::InvalidColor(literal.to_owned()));
    }

    let expanded;
    let hex = match hex.len() {
        // Shorthand: each digit doubles ("abc" -> "aabbcc").
        3 => {
            expanded = hex
                .chars()
                .flat_map(|c| [c, c])
                .collect::<String>();
            expanded.as_str()
        }
        6 => hex,
        _ => return Err(EditorError::InvalidColor(literal.to_owned())),
    };

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|_| EditorError::InvalidColor(literal.to_owned()))
    };

    Ok(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Format a color as a `#rrggbb` literal, dropping alpha.
pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_and_shorthand_literals() {
        assert_eq!(parse_hex("#ff0000").unwrap(), Color32::from_rgb(255, 0, 0));
        assert_eq!(parse_hex("#abc").unwrap(), Color32::from_rgb(0xaa, 0xbb, 0xcc));
        assert_eq!(parse_hex("111722").unwrap(), Color32::from_rgb(0x11, 0x17, 0x22));
    }

    #[test]
    fn rejects_malformed_literals() {
        assert!(parse_hex("#12345").is_err());
        assert!(parse_hex("#gggggg").is_err());
        assert!(parse_hex("").is_err());
    }

    #[test]
    fn formats_round_trip() {
        let c = Color32::from_rgb(0x7b, 0xdc, 0xff);
        assert_eq!(parse_hex(&to_hex(c)).unwrap(), c);
    }
}
