use palette::Srgba;
use palette::rgb::channels::Argb;
use strum::{EnumIter, EnumString};
use thiserror::Error;

pub type Color = Srgba<f64>;

pub const ARGB_BLACK: u32 = 0xFF00_0000;
pub const ARGB_GRAY: u32 = 0xFF88_8888;
pub const ARGB_WHITE: u32 = 0xFFFF_FFFF;
pub const ARGB_GREEN: u32 = 0xFF00_FF00;

/// Builds a color from a packed `0xAARRGGBB` value.
pub fn from_argb(value: u32) -> Color {
    Srgba::<u8>::from_u32::<Argb>(value).into_format()
}

pub fn black() -> Color {
    from_argb(ARGB_BLACK)
}

pub fn gray() -> Color {
    from_argb(ARGB_GRAY)
}

pub fn white() -> Color {
    from_argb(ARGB_WHITE)
}

pub fn green() -> Color {
    from_argb(ARGB_GREEN)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum NamedColor {
    #[strum(serialize = "black")]
    Black,
    #[strum(serialize = "darkgray", serialize = "darkgrey")]
    DarkGray,
    #[strum(serialize = "gray", serialize = "grey")]
    Gray,
    #[strum(serialize = "lightgray", serialize = "lightgrey")]
    LightGray,
    #[strum(serialize = "white")]
    White,
    #[strum(serialize = "red")]
    Red,
    #[strum(serialize = "green")]
    Green,
    #[strum(serialize = "blue")]
    Blue,
    #[strum(serialize = "yellow")]
    Yellow,
    #[strum(serialize = "cyan", serialize = "aqua")]
    Cyan,
    #[strum(serialize = "magenta", serialize = "fuchsia")]
    Magenta,
    #[strum(serialize = "lime")]
    Lime,
    #[strum(serialize = "maroon")]
    Maroon,
    #[strum(serialize = "navy")]
    Navy,
    #[strum(serialize = "olive")]
    Olive,
    #[strum(serialize = "purple")]
    Purple,
    #[strum(serialize = "silver")]
    Silver,
    #[strum(serialize = "teal")]
    Teal,
}

impl NamedColor {
    pub fn argb(&self) -> u32 {
        match self {
            Self::Black => ARGB_BLACK,
            Self::DarkGray => 0xFF44_4444,
            Self::Gray => ARGB_GRAY,
            Self::LightGray => 0xFFCC_CCCC,
            Self::White => ARGB_WHITE,
            Self::Red => 0xFFFF_0000,
            Self::Green | Self::Lime => ARGB_GREEN,
            Self::Blue => 0xFF00_00FF,
            Self::Yellow => 0xFFFF_FF00,
            Self::Cyan => 0xFF00_FFFF,
            Self::Magenta => 0xFFFF_00FF,
            Self::Maroon => 0xFF80_0000,
            Self::Navy => 0xFF00_0080,
            Self::Olive => 0xFF80_8000,
            Self::Purple => 0xFF80_0080,
            Self::Silver => 0xFFC0_C0C0,
            Self::Teal => 0xFF00_8080,
        }
    }

    pub fn color(&self) -> Color {
        from_argb(self.argb())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("empty color string")]
    Empty,
    #[error("invalid hex color '{0}'")]
    InvalidHex(String),
    #[error("unknown color name '{0}'")]
    UnknownName(String),
}

/// Parses `#RRGGBB`, `#AARRGGBB` or a color name.
pub fn parse_color(s: &str) -> Result<Color, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    match s.strip_prefix('#') {
        Some(hex) => parse_hex(hex)
            .map(from_argb)
            .ok_or_else(|| ColorError::InvalidHex(s.to_string())),
        None => s
            .parse::<NamedColor>()
            .map(|named| named.color())
            .map_err(|_| ColorError::UnknownName(s.to_string())),
    }
}

pub fn parse_color_or(s: &str, fallback: Color) -> Color {
    parse_color(s).unwrap_or_else(|e| {
        log::warn!("{}, using fallback color", e);
        fallback
    })
}

fn parse_hex(hex: &str) -> Option<u32> {
    // from_str_radix would accept a leading '+'
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    match hex.len() {
        6 => Some(value | 0xFF00_0000),
        8 => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(parse_color("#FF0000").unwrap(), NamedColor::Red.color());
        assert_eq!(parse_color("#ff00ff00").unwrap(), green());
        let translucent = parse_color("#80000000").unwrap();
        assert_eq!(translucent, from_argb(0x8000_0000));
        assert!((translucent.alpha - 128.0 / 255.0).abs() < 1e-9);
        assert_eq!(translucent.red, 0.0);
    }

    #[test]
    fn test_parse_hex_rejects_bad_lengths_and_digits() {
        for input in ["#", "#FFF", "#12345", "#1234567", "#GG0000", "#+FFFFF"] {
            assert_eq!(
                parse_color(input),
                Err(ColorError::InvalidHex(input.to_string())),
                "{input}"
            );
        }
    }

    #[test]
    fn test_parse_named_colors() {
        let cases = vec![
            ("black", NamedColor::Black),
            ("BLACK", NamedColor::Black),
            ("Grey", NamedColor::Gray),
            ("lightgrey", NamedColor::LightGray),
            ("aqua", NamedColor::Cyan),
            ("fuchsia", NamedColor::Magenta),
            ("teal", NamedColor::Teal),
        ];

        for (input, expected) in cases {
            assert_eq!(parse_color(input).unwrap(), expected.color(), "{input}");
        }
    }

    #[test]
    fn test_every_named_color_is_opaque() {
        for named in NamedColor::iter() {
            assert_eq!(named.argb() >> 24, 0xFF, "{named:?}");
        }
    }

    #[test]
    fn test_parse_unknown_and_empty() {
        assert_eq!(
            parse_color("not-a-color"),
            Err(ColorError::UnknownName("not-a-color".to_string()))
        );
        assert_eq!(parse_color(""), Err(ColorError::Empty));
    }

    #[test]
    fn test_parse_color_or_falls_back() {
        assert_eq!(parse_color_or("not-a-color", black()), black());
        assert_eq!(parse_color_or("not-a-color", gray()), gray());
        assert_eq!(parse_color_or("white", gray()), white());
    }
}
