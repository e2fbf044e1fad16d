use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) RGBA8 colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Compares colour channels only; alpha is ignored.
    pub fn same_rgb(self, r: u8, g: u8, b: u8) -> bool {
        self.r == r && self.g == g && self.b == b
    }

    /// Parses `#RGB`, `#RRGGBB`, `#RRGGBBAA` or a named colour (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let lower = s.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, c)| *c)
    }
}

/// A colour exactly as written in the description (`"#RRGGBB"` or a name).
///
/// Both forms are carried the same way; back ends resolve them with
/// [`ColorValue::to_rgba8`] or their own colour table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorValue(String);

impl ColorValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_rgba8(&self) -> Option<Rgba8> {
        Rgba8::parse(&self.0)
    }
}

impl From<&str> for ColorValue {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl std::fmt::Display for ColorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn parse_hex(s: &str) -> Option<Rgba8> {
    fn byte(pair: &str) -> Option<u8> {
        u8::from_str_radix(pair, 16).ok()
    }

    if !s.is_ascii() {
        return None;
    }
    match s.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, ch) in s.chars().enumerate() {
                let v = ch.to_digit(16)? as u8;
                out[i] = v * 17;
            }
            Some(Rgba8::rgb(out[0], out[1], out[2]))
        }
        6 => Some(Rgba8::rgb(byte(&s[0..2])?, byte(&s[2..4])?, byte(&s[4..6])?)),
        8 => Some(Rgba8::rgba(
            byte(&s[0..2])?,
            byte(&s[2..4])?,
            byte(&s[4..6])?,
            byte(&s[6..8])?,
        )),
        _ => None,
    }
}

const NAMED_COLORS: &[(&str, Rgba8)] = &[
    ("black", Rgba8::rgb(0, 0, 0)),
    ("white", Rgba8::rgb(255, 255, 255)),
    ("red", Rgba8::rgb(255, 0, 0)),
    ("green", Rgba8::rgb(0, 255, 0)),
    ("blue", Rgba8::rgb(0, 0, 255)),
    ("yellow", Rgba8::rgb(255, 255, 0)),
    ("cyan", Rgba8::rgb(0, 255, 255)),
    ("magenta", Rgba8::rgb(255, 0, 255)),
    ("gray", Rgba8::rgb(190, 190, 190)),
    ("grey", Rgba8::rgb(190, 190, 190)),
    ("darkgray", Rgba8::rgb(169, 169, 169)),
    ("lightgray", Rgba8::rgb(211, 211, 211)),
    ("orange", Rgba8::rgb(255, 165, 0)),
    ("purple", Rgba8::rgb(160, 32, 240)),
    ("pink", Rgba8::rgb(255, 192, 203)),
    ("brown", Rgba8::rgb(165, 42, 42)),
    ("navy", Rgba8::rgb(0, 0, 128)),
    ("transparent", Rgba8::rgba(0, 0, 0, 0)),
];

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
