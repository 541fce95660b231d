//! Canvas background color and color parsing: hex (#RGB, #RRGGBB, #RRGGBBAA)
//! and a handful of CSS named colors.

use core::str::FromStr;

use crate::error::LayoutError;

/// Fill for canvas areas not covered by the destination rectangle.
///
/// In Fit mode this is the letterbox/pillarbox bar. Defaults to opaque white.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CanvasColor {
    /// Transparent black `[0, 0, 0, 0]`.
    Transparent,
    /// sRGB color with alpha (8-bit per channel).
    Srgb { r: u8, g: u8, b: u8, a: u8 },
}

impl Default for CanvasColor {
    fn default() -> Self {
        Self::white()
    }
}

impl CanvasColor {
    /// White, fully opaque.
    pub const fn white() -> Self {
        Self::Srgb {
            r: 255,
            g: 255,
            b: 255,
            a: 255,
        }
    }

    /// Black, fully opaque.
    pub const fn black() -> Self {
        Self::Srgb {
            r: 0,
            g: 0,
            b: 0,
            a: 255,
        }
    }

    /// Channels as `[r, g, b, a]`.
    pub const fn to_rgba(self) -> [u8; 4] {
        match self {
            Self::Transparent => [0, 0, 0, 0],
            Self::Srgb { r, g, b, a } => [r, g, b, a],
        }
    }

    /// Whether the color has any transparency.
    pub const fn has_alpha(self) -> bool {
        self.to_rgba()[3] != 255
    }
}

impl FromStr for CanvasColor {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s).ok_or(LayoutError::Unparseable { field: "color" })
    }
}

/// Parse a hex or named color.
///
/// Accepts `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` (the `#` is optional) and
/// the names in [`NAMED`], case-insensitively. `transparent` maps to
/// [`CanvasColor::Transparent`].
pub fn parse_color(s: &str) -> Option<CanvasColor> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if s.eq_ignore_ascii_case("transparent") {
        return Some(CanvasColor::Transparent);
    }
    let hex = s.strip_prefix('#').unwrap_or(s);
    parse_hex(hex).or_else(|| lookup_named(s))
}

fn parse_hex(hex: &str) -> Option<CanvasColor> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let d = hex.as_bytes();
    let [r, g, b, a] = match d.len() {
        3 => [nibble(d[0])?, nibble(d[1])?, nibble(d[2])?, 255],
        4 => [nibble(d[0])?, nibble(d[1])?, nibble(d[2])?, nibble(d[3])?],
        6 => [byte(&d[0..2])?, byte(&d[2..4])?, byte(&d[4..6])?, 255],
        8 => [
            byte(&d[0..2])?,
            byte(&d[2..4])?,
            byte(&d[4..6])?,
            byte(&d[6..8])?,
        ],
        _ => return None,
    };
    Some(CanvasColor::Srgb { r, g, b, a })
}

/// `f` → `0xFF`.
fn nibble(ch: u8) -> Option<u8> {
    let n = (ch as char).to_digit(16)? as u8;
    Some(n << 4 | n)
}

fn byte(pair: &[u8]) -> Option<u8> {
    let hi = (pair[0] as char).to_digit(16)? as u8;
    let lo = (pair[1] as char).to_digit(16)? as u8;
    Some(hi << 4 | lo)
}

fn lookup_named(name: &str) -> Option<CanvasColor> {
    NAMED
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, [r, g, b])| CanvasColor::Srgb { r, g, b, a: 255 })
}

/// Named colors offered for the background fill.
pub const NAMED: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("blue", [0, 0, 255]),
    ("darkgray", [169, 169, 169]),
    ("darkgrey", [169, 169, 169]),
    ("gray", [128, 128, 128]),
    ("green", [0, 128, 0]),
    ("grey", [128, 128, 128]),
    ("lightgray", [211, 211, 211]),
    ("lightgrey", [211, 211, 211]),
    ("navy", [0, 0, 128]),
    ("red", [255, 0, 0]),
    ("silver", [192, 192, 192]),
    ("white", [255, 255, 255]),
    ("whitesmoke", [245, 245, 245]),
    ("yellow", [255, 255, 0]),
];
