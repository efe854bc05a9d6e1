//! ANSI style codes
//!
//! A [`StyleCode`] is one SGR attribute: a plain parameter such as bold or a
//! named color, a 256-color palette entry, or a 24-bit RGB color. Codes are
//! only ever turned into escape sequences by [`make_color_prefix`] and
//! [`make_colors_prefix`]; nothing else in the crate emits ANSI bytes.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Escape sequence that resets every attribute
pub const RESET_CODE: &str = "\x1b[0m";

/// One ANSI style attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "StyleRepr", into = "StyleRepr")]
pub enum StyleCode {
    /// A single SGR parameter (`1` bold, `31` red, ...)
    Sgr(u8),
    /// 256-color palette entry (`38;5;id` or `48;5;id`)
    Palette { id: u8, background: bool },
    /// True color (`38;2;r;g;b` or `48;2;r;g;b`)
    Rgb {
        r: u8,
        g: u8,
        b: u8,
        background: bool,
    },
}

impl StyleCode {
    pub const CLEAR: StyleCode = StyleCode::Sgr(0);
    pub const BOLD: StyleCode = StyleCode::Sgr(1);
    pub const BOLD_RESET: StyleCode = StyleCode::Sgr(22);
    pub const FAINT: StyleCode = StyleCode::Sgr(2);
    pub const FAINT_RESET: StyleCode = StyleCode::Sgr(22);
    pub const ITALIC: StyleCode = StyleCode::Sgr(3);
    pub const ITALIC_RESET: StyleCode = StyleCode::Sgr(23);
    pub const UNDERLINE: StyleCode = StyleCode::Sgr(4);
    pub const UNDERLINE_RESET: StyleCode = StyleCode::Sgr(24);
    pub const BLINK: StyleCode = StyleCode::Sgr(5);
    pub const BLINK_RESET: StyleCode = StyleCode::Sgr(25);
    pub const REVERSE: StyleCode = StyleCode::Sgr(7);
    pub const REVERSE_RESET: StyleCode = StyleCode::Sgr(27);
    pub const INVISIBLE: StyleCode = StyleCode::Sgr(8);
    pub const INVISIBLE_RESET: StyleCode = StyleCode::Sgr(28);
    pub const STRIKE: StyleCode = StyleCode::Sgr(9);
    pub const STRIKE_RESET: StyleCode = StyleCode::Sgr(29);
    pub const DEFAULT: StyleCode = StyleCode::Sgr(39);
    pub const DEFAULT_BG: StyleCode = StyleCode::Sgr(49);

    pub const BLACK: StyleCode = StyleCode::Sgr(30);
    pub const BLACK_BG: StyleCode = StyleCode::Sgr(40);
    pub const RED: StyleCode = StyleCode::Sgr(31);
    pub const RED_BG: StyleCode = StyleCode::Sgr(41);
    pub const GREEN: StyleCode = StyleCode::Sgr(32);
    pub const GREEN_BG: StyleCode = StyleCode::Sgr(42);
    pub const YELLOW: StyleCode = StyleCode::Sgr(33);
    pub const YELLOW_BG: StyleCode = StyleCode::Sgr(43);
    pub const BLUE: StyleCode = StyleCode::Sgr(34);
    pub const BLUE_BG: StyleCode = StyleCode::Sgr(44);
    pub const MAGENTA: StyleCode = StyleCode::Sgr(35);
    pub const MAGENTA_BG: StyleCode = StyleCode::Sgr(45);
    pub const CYAN: StyleCode = StyleCode::Sgr(36);
    pub const CYAN_BG: StyleCode = StyleCode::Sgr(46);
    pub const WHITE: StyleCode = StyleCode::Sgr(37);
    pub const WHITE_BG: StyleCode = StyleCode::Sgr(47);

    pub const BRIGHT_BLACK: StyleCode = StyleCode::Sgr(90);
    pub const BRIGHT_BLACK_BG: StyleCode = StyleCode::Sgr(100);
    pub const BRIGHT_RED: StyleCode = StyleCode::Sgr(91);
    pub const BRIGHT_RED_BG: StyleCode = StyleCode::Sgr(101);
    pub const BRIGHT_GREEN: StyleCode = StyleCode::Sgr(92);
    pub const BRIGHT_GREEN_BG: StyleCode = StyleCode::Sgr(102);
    pub const BRIGHT_YELLOW: StyleCode = StyleCode::Sgr(93);
    pub const BRIGHT_YELLOW_BG: StyleCode = StyleCode::Sgr(103);
    pub const BRIGHT_BLUE: StyleCode = StyleCode::Sgr(94);
    pub const BRIGHT_BLUE_BG: StyleCode = StyleCode::Sgr(104);
    pub const BRIGHT_MAGENTA: StyleCode = StyleCode::Sgr(95);
    pub const BRIGHT_MAGENTA_BG: StyleCode = StyleCode::Sgr(105);
    pub const BRIGHT_CYAN: StyleCode = StyleCode::Sgr(96);
    pub const BRIGHT_CYAN_BG: StyleCode = StyleCode::Sgr(106);
    pub const BRIGHT_WHITE: StyleCode = StyleCode::Sgr(97);
    pub const BRIGHT_WHITE_BG: StyleCode = StyleCode::Sgr(107);

    /// The numeric ANSI parameter(s) of this code, without the escape wrapper
    pub fn parameter(&self) -> String {
        match *self {
            StyleCode::Sgr(code) => code.to_string(),
            StyleCode::Palette { id, background } => {
                format!("{};5;{}", if background { 48 } else { 38 }, id)
            }
            StyleCode::Rgb { r, g, b, background } => {
                format!("{};2;{};{};{}", if background { 48 } else { 38 }, r, g, b)
            }
        }
    }

    /// Look up a named style (`"bold"`, `"bright_red_bg"`, ...)
    pub fn named(name: &str) -> Option<StyleCode> {
        let key = name.trim().to_lowercase().replace(['-', ' '], "_");
        NAMED_STYLES
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(_, code)| *code)
    }
}

impl fmt::Display for StyleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parameter())
    }
}

const NAMED_STYLES: &[(&str, StyleCode)] = &[
    ("clear", StyleCode::CLEAR),
    ("reset", StyleCode::CLEAR),
    ("bold", StyleCode::BOLD),
    ("bold_reset", StyleCode::BOLD_RESET),
    ("faint", StyleCode::FAINT),
    ("faint_reset", StyleCode::FAINT_RESET),
    ("italic", StyleCode::ITALIC),
    ("italic_reset", StyleCode::ITALIC_RESET),
    ("underline", StyleCode::UNDERLINE),
    ("underline_reset", StyleCode::UNDERLINE_RESET),
    ("blink", StyleCode::BLINK),
    ("blink_reset", StyleCode::BLINK_RESET),
    ("reverse", StyleCode::REVERSE),
    ("reverse_reset", StyleCode::REVERSE_RESET),
    ("invisible", StyleCode::INVISIBLE),
    ("invisible_reset", StyleCode::INVISIBLE_RESET),
    ("strike", StyleCode::STRIKE),
    ("strike_reset", StyleCode::STRIKE_RESET),
    ("default", StyleCode::DEFAULT),
    ("default_bg", StyleCode::DEFAULT_BG),
    ("black", StyleCode::BLACK),
    ("black_bg", StyleCode::BLACK_BG),
    ("red", StyleCode::RED),
    ("red_bg", StyleCode::RED_BG),
    ("green", StyleCode::GREEN),
    ("green_bg", StyleCode::GREEN_BG),
    ("yellow", StyleCode::YELLOW),
    ("yellow_bg", StyleCode::YELLOW_BG),
    ("blue", StyleCode::BLUE),
    ("blue_bg", StyleCode::BLUE_BG),
    ("magenta", StyleCode::MAGENTA),
    ("magenta_bg", StyleCode::MAGENTA_BG),
    ("cyan", StyleCode::CYAN),
    ("cyan_bg", StyleCode::CYAN_BG),
    ("white", StyleCode::WHITE),
    ("white_bg", StyleCode::WHITE_BG),
    ("bright_black", StyleCode::BRIGHT_BLACK),
    ("bright_black_bg", StyleCode::BRIGHT_BLACK_BG),
    ("bright_red", StyleCode::BRIGHT_RED),
    ("bright_red_bg", StyleCode::BRIGHT_RED_BG),
    ("bright_green", StyleCode::BRIGHT_GREEN),
    ("bright_green_bg", StyleCode::BRIGHT_GREEN_BG),
    ("bright_yellow", StyleCode::BRIGHT_YELLOW),
    ("bright_yellow_bg", StyleCode::BRIGHT_YELLOW_BG),
    ("bright_blue", StyleCode::BRIGHT_BLUE),
    ("bright_blue_bg", StyleCode::BRIGHT_BLUE_BG),
    ("bright_magenta", StyleCode::BRIGHT_MAGENTA),
    ("bright_magenta_bg", StyleCode::BRIGHT_MAGENTA_BG),
    ("bright_cyan", StyleCode::BRIGHT_CYAN),
    ("bright_cyan_bg", StyleCode::BRIGHT_CYAN_BG),
    ("bright_white", StyleCode::BRIGHT_WHITE),
    ("bright_white_bg", StyleCode::BRIGHT_WHITE_BG),
];

fn channel(component: &str, value: i64) -> Result<u8> {
    u8::try_from(value).map_err(|_| {
        LoggerError::config(
            "style",
            format!("{} {} out of range [0, 255]", component, value),
        )
    })
}

/// 256-color foreground for `id` in `[0, 255]`
pub fn id_color(id: i64) -> Result<StyleCode> {
    Ok(StyleCode::Palette {
        id: channel("color id", id)?,
        background: false,
    })
}

/// 256-color background for `id` in `[0, 255]`
pub fn id_color_bg(id: i64) -> Result<StyleCode> {
    Ok(StyleCode::Palette {
        id: channel("color id", id)?,
        background: true,
    })
}

/// True-color foreground; every channel must be in `[0, 255]`
pub fn rgb_color(r: i64, g: i64, b: i64) -> Result<StyleCode> {
    Ok(StyleCode::Rgb {
        r: channel("red channel", r)?,
        g: channel("green channel", g)?,
        b: channel("blue channel", b)?,
        background: false,
    })
}

/// True-color background; every channel must be in `[0, 255]`
pub fn rgb_color_bg(r: i64, g: i64, b: i64) -> Result<StyleCode> {
    Ok(StyleCode::Rgb {
        r: channel("red channel", r)?,
        g: channel("green channel", g)?,
        b: channel("blue channel", b)?,
        background: true,
    })
}

/// Wrap a single code into a complete escape sequence: `ESC[<code>m`
pub fn make_color_prefix(code: &StyleCode) -> String {
    format!("\x1b[{}m", code.parameter())
}

/// Combine several codes into one escape sequence: `ESC[<c1>;<c2>;...m`.
///
/// Codes are emitted in the given order without deduplication, so when two
/// codes conflict the terminal applies the last one. An empty slice yields
/// an empty prefix.
pub fn make_colors_prefix(codes: &[StyleCode]) -> String {
    if codes.is_empty() {
        return String::new();
    }
    let params: Vec<String> = codes.iter().map(StyleCode::parameter).collect();
    format!("\x1b[{}m", params.join(";"))
}

/// Wire form used in configuration documents
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum StyleRepr {
    Code(i64),
    Text(String),
}

impl From<StyleCode> for StyleRepr {
    fn from(code: StyleCode) -> Self {
        match code {
            StyleCode::Sgr(n) => StyleRepr::Code(i64::from(n)),
            other => StyleRepr::Text(other.parameter()),
        }
    }
}

impl TryFrom<StyleRepr> for StyleCode {
    type Error = LoggerError;

    fn try_from(repr: StyleRepr) -> Result<Self> {
        match repr {
            StyleRepr::Code(n) => Ok(StyleCode::Sgr(channel("style code", n)?)),
            StyleRepr::Text(text) => text.parse(),
        }
    }
}

impl std::str::FromStr for StyleCode {
    type Err = LoggerError;

    /// Accepts a style name or an ANSI parameter string such as `"1"`,
    /// `"38;5;208"` or `"48;2;10;20;30"`.
    fn from_str(s: &str) -> Result<Self> {
        if let Some(code) = StyleCode::named(s) {
            return Ok(code);
        }

        let invalid = || LoggerError::config("style", format!("unrecognized style '{}'", s));
        let parts = s
            .split(';')
            .map(|p| p.trim().parse::<i64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;

        match parts.as_slice() {
            [n] => Ok(StyleCode::Sgr(channel("style code", *n)?)),
            [38, 5, id] => id_color(*id),
            [48, 5, id] => id_color_bg(*id),
            [38, 2, r, g, b] => rgb_color(*r, *g, *b),
            [48, 2, r, g, b] => rgb_color_bg(*r, *g, *b),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_prefix() {
        assert_eq!(make_color_prefix(&StyleCode::RED), "\x1b[31m");
        assert_eq!(make_color_prefix(&id_color(208).unwrap()), "\x1b[38;5;208m");
    }

    #[test]
    fn test_combined_prefix_keeps_order() {
        let prefix = make_colors_prefix(&[StyleCode::BOLD, StyleCode::RED]);
        assert_eq!(prefix, "\x1b[1;31m");

        let conflicting = make_colors_prefix(&[StyleCode::RED, StyleCode::GREEN]);
        assert_eq!(conflicting, "\x1b[31;32m");
    }

    #[test]
    fn test_empty_prefix() {
        assert_eq!(make_colors_prefix(&[]), "");
    }

    #[test]
    fn test_palette_bounds() {
        assert!(id_color(0).is_ok());
        assert!(id_color(255).is_ok());
        assert!(id_color(256).unwrap_err().is_configuration());
        assert!(id_color(-1).unwrap_err().is_configuration());
        assert!(id_color_bg(300).is_err());
        assert_eq!(id_color_bg(17).unwrap().parameter(), "48;5;17");
    }

    #[test]
    fn test_rgb_bounds() {
        assert_eq!(rgb_color(1, 2, 3).unwrap().parameter(), "38;2;1;2;3");
        assert_eq!(rgb_color_bg(255, 0, 255).unwrap().parameter(), "48;2;255;0;255");
        assert!(rgb_color(0, 256, 0).is_err());
        assert!(rgb_color_bg(-5, 0, 0).is_err());
    }

    #[test]
    fn test_parse_names_and_parameters() {
        assert_eq!("bold".parse::<StyleCode>().unwrap(), StyleCode::BOLD);
        assert_eq!("Bright-Black".parse::<StyleCode>().unwrap(), StyleCode::BRIGHT_BLACK);
        assert_eq!("33".parse::<StyleCode>().unwrap(), StyleCode::YELLOW);
        assert_eq!("38;5;42".parse::<StyleCode>().unwrap(), id_color(42).unwrap());
        assert_eq!(
            "48;2;10;20;30".parse::<StyleCode>().unwrap(),
            rgb_color_bg(10, 20, 30).unwrap()
        );
        assert!("38;5;999".parse::<StyleCode>().is_err());
        assert!("sparkly".parse::<StyleCode>().is_err());
    }

    #[test]
    fn test_serde_forms() {
        let codes: Vec<StyleCode> =
            serde_json::from_str(r#"[1, "red", "38;5;200", "48;2;1;2;3"]"#).unwrap();
        assert_eq!(
            codes,
            vec![
                StyleCode::BOLD,
                StyleCode::RED,
                id_color(200).unwrap(),
                rgb_color_bg(1, 2, 3).unwrap(),
            ]
        );

        let json = serde_json::to_string(&codes).unwrap();
        assert_eq!(json, r#"[1,31,"38;5;200","48;2;1;2;3"]"#);
        assert!(serde_json::from_str::<StyleCode>("256").is_err());
    }
}
