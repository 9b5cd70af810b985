//! ARGB colors and drawables.
//!
//! Themes write colors in two families of notation: strict `#RRGGBB` /
//! `#AARRGGBB` (also spelled `0x...`), and loose integer numerals that the
//! Android front-end historically accepted through `Long.decode`. Both must
//! keep working, so parsing is two-stage: the strict parser first, then the
//! loose numeral decoder.

use std::fmt;
use std::path::PathBuf;

use serde::{Serialize, Serializer};

use crate::error::{ConfigError, ConfigResult};

const OPAQUE: u32 = 0xFF00_0000;

/// Color names understood by the strict parser.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("black", 0xFF00_0000),
    ("darkgray", 0xFF44_4444),
    ("darkgrey", 0xFF44_4444),
    ("gray", 0xFF88_8888),
    ("grey", 0xFF88_8888),
    ("lightgray", 0xFFCC_CCCC),
    ("lightgrey", 0xFFCC_CCCC),
    ("white", 0xFFFF_FFFF),
    ("red", 0xFFFF_0000),
    ("green", 0xFF00_FF00),
    ("blue", 0xFF00_00FF),
    ("yellow", 0xFFFF_FF00),
    ("cyan", 0xFF00_FFFF),
    ("magenta", 0xFFFF_00FF),
    ("aqua", 0xFF00_FFFF),
    ("fuchsia", 0xFFFF_00FF),
    ("lime", 0xFF00_FF00),
    ("maroon", 0xFF80_0000),
    ("navy", 0xFF00_0080),
    ("olive", 0xFF80_8000),
    ("purple", 0xFF80_0080),
    ("silver", 0xFFC0_C0C0),
    ("teal", 0xFF00_8080),
];

/// A 32-bit ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    /// Creates a color from a packed `0xAARRGGBB` value.
    #[must_use]
    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    /// Packed `0xAARRGGBB` value.
    #[must_use]
    pub const fn argb(self) -> u32 {
        self.0
    }

    /// Alpha channel.
    #[must_use]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red channel.
    #[must_use]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel.
    #[must_use]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel.
    #[must_use]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Returns whether the alpha channel is fully opaque.
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.alpha() == 0xFF
    }

    /// Formats the color as `#AARRGGBB`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:08X}", self.0)
    }

    /// Parses a color literal.
    ///
    /// `0x` is first rewritten to `#` and the strict parser is tried. If that
    /// fails, the original text is decoded as an integer numeral (`0x`/`#` hex,
    /// leading-zero octal, or decimal) and truncated to 32 bits; an
    /// 8-character numeral starting with `0` is then forced opaque.
    ///
    /// # Examples
    ///
    /// ```
    /// use trime_config::models::Color;
    ///
    /// assert_eq!(Color::parse("0xFF00FF00").unwrap(), Color::parse("#FF00FF00").unwrap());
    /// assert_eq!(Color::parse("0xffffff").unwrap().argb(), 0xFFFF_FFFF);
    /// assert!(Color::parse("00000000").unwrap().is_opaque());
    /// ```
    pub fn parse(text: &str) -> ConfigResult<Self> {
        if let Some(color) = Self::parse_strict(&text.replace("0x", "#")) {
            return Ok(color);
        }
        tracing::debug!("unknown color {}, decoding as numeral", text);
        let value = decode_long(text).ok_or_else(|| ConfigError::parse(text, "color"))?;
        let mut argb = value as u32;
        if text.len() == 8 && text.starts_with('0') {
            argb |= OPAQUE;
        }
        Ok(Self(argb))
    }

    /// Strict parser: `#RRGGBB` (opaque), `#AARRGGBB`, or a color name.
    #[must_use]
    pub fn parse_strict(text: &str) -> Option<Self> {
        if let Some(hex) = text.strip_prefix('#') {
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            let value = u32::from_str_radix(hex, 16).ok()?;
            return match hex.len() {
                6 => Some(Self(value | OPAQUE)),
                8 => Some(Self(value)),
                _ => None,
            };
        }
        let name = text.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, argb)| Self(argb))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Parses a color literal; see [`Color::parse`].
pub fn parse_color(text: &str) -> ConfigResult<Color> {
    Color::parse(text)
}

/// Decodes an integer numeral the way `java.lang.Long.decode` does.
///
/// Accepts an optional sign followed by `0x`/`0X`/`#` (hex), a leading `0`
/// (octal) or plain decimal digits.
pub(crate) fn decode_long(text: &str) -> Option<i64> {
    let (negative, rest) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let (radix, digits) = if let Some(hex) = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
        .or_else(|| rest.strip_prefix('#'))
    {
        (16, hex)
    } else if rest.len() > 1 && rest.starts_with('0') {
        (8, &rest[1..])
    } else {
        (10, rest)
    };
    if digits.is_empty() || digits.starts_with(|c| c == '+' || c == '-') {
        return None;
    }
    let magnitude = i128::from(u64::from_str_radix(digits, radix).ok()?);
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

/// Something a UI component can paint as a background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Drawable {
    /// Flat fill
    Solid(Color),
    /// Image file under the `backgrounds` resource directory
    Bitmap(PathBuf),
}
