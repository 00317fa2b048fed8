// File: crates/fnplot-core/src/theme.rs
// Summary: Colors and Light/Dark theming for frame composition.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// 8-bit ARGB color token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(255, r, g, b)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            3 => {
                let nib = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok().map(|v| v * 17);
                Some(Self::from_rgb(nib(0)?, nib(1)?, nib(2)?))
            }
            6 => Some(Self::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::from_argb(byte(6)?, byte(0)?, byte(2)?, byte(4)?)),
            _ => None,
        }
    }

    /// `#rrggbb`, or `#rrggbbaa` when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("not a hex color: {0:?}")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| ParseColorError(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub grid_minor: Color,
    pub grid_major: Color,
    pub axis_line: Color,
    pub axis_label: Color,
    pub placeholder: Color,
    /// Cycled through when a curve is added without an explicit color.
    pub palette: [Color; 6],
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::from_rgb(0x1e, 0x1e, 0x1e),
            grid_minor: Color::from_rgb(0x33, 0x33, 0x33),
            grid_major: Color::from_rgb(0x44, 0x44, 0x44),
            axis_line: Color::from_rgb(0x8a, 0x8a, 0x8a),
            axis_label: Color::from_rgb(0xaa, 0xaa, 0xaa),
            placeholder: Color::from_rgb(0xcc, 0xcc, 0xcc),
            palette: [
                Color::from_rgb(0x61, 0xda, 0xfb),
                Color::from_rgb(0xff, 0x6b, 0x6b),
                Color::from_rgb(0x9b, 0xe5, 0x64),
                Color::from_rgb(0xff, 0xc8, 0x57),
                Color::from_rgb(0xc7, 0x92, 0xea),
                Color::from_rgb(0xf7, 0x8c, 0x6c),
            ],
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::from_rgb(250, 250, 252),
            grid_minor: Color::from_rgb(236, 236, 240),
            grid_major: Color::from_rgb(214, 214, 222),
            axis_line: Color::from_rgb(60, 60, 70),
            axis_label: Color::from_rgb(20, 20, 30),
            placeholder: Color::from_rgb(120, 120, 130),
            palette: [
                Color::from_rgb(32, 120, 200),
                Color::from_rgb(200, 60, 60),
                Color::from_rgb(20, 160, 90),
                Color::from_rgb(210, 140, 0),
                Color::from_rgb(130, 70, 190),
                Color::from_rgb(0, 150, 160),
            ],
        }
    }

    pub fn solarized_dark() -> Self {
        // Base colors from Solarized dark palette
        Self {
            name: "solarized-dark",
            background: Color::from_rgb(0x00, 0x2b, 0x36),  // base03
            grid_minor: Color::from_rgb(0x07, 0x36, 0x42),  // base02
            grid_major: Color::from_rgb(0x58, 0x6e, 0x75),  // base01
            axis_line: Color::from_rgb(0x93, 0xa1, 0xa1),   // base1
            axis_label: Color::from_rgb(0xee, 0xe8, 0xd5),  // base2
            placeholder: Color::from_rgb(0x83, 0x94, 0x96), // base0
            palette: [
                Color::from_rgb(0x26, 0x8b, 0xd2), // blue
                Color::from_rgb(0xdc, 0x32, 0x2f), // red
                Color::from_rgb(0x85, 0x99, 0x00), // green
                Color::from_rgb(0xb5, 0x89, 0x00), // yellow
                Color::from_rgb(0x6c, 0x71, 0xc4), // violet
                Color::from_rgb(0x2a, 0xa1, 0x98), // cyan
            ],
        }
    }

    pub fn solarized_light() -> Self {
        Self {
            name: "solarized-light",
            background: Color::from_rgb(0xfd, 0xf6, 0xe3),  // base3
            grid_minor: Color::from_rgb(0xee, 0xe8, 0xd5),  // base2
            grid_major: Color::from_rgb(0x93, 0xa1, 0xa1),  // base1
            axis_line: Color::from_rgb(0x65, 0x7b, 0x83),   // base00
            axis_label: Color::from_rgb(0x00, 0x2b, 0x36),  // base03
            placeholder: Color::from_rgb(0x58, 0x6e, 0x75), // base01
            palette: [
                Color::from_rgb(0x26, 0x8b, 0xd2),
                Color::from_rgb(0xdc, 0x32, 0x2f),
                Color::from_rgb(0x85, 0x99, 0x00),
                Color::from_rgb(0xcb, 0x4b, 0x16),
                Color::from_rgb(0xd3, 0x36, 0x82),
                Color::from_rgb(0x2a, 0xa1, 0x98),
            ],
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: Color::from_rgb(0x00, 0x00, 0x00),
            grid_minor: Color::from_rgb(0x22, 0x22, 0x22),
            grid_major: Color::from_rgb(0x55, 0x55, 0x55),
            axis_line: Color::from_rgb(0xff, 0xff, 0xff),
            axis_label: Color::from_rgb(0xff, 0xff, 0xff),
            placeholder: Color::from_rgb(0xcc, 0xcc, 0xcc),
            palette: [
                Color::from_rgb(0x00, 0xff, 0xff),
                Color::from_rgb(0xff, 0xff, 0x00),
                Color::from_rgb(0x00, 0xff, 0x00),
                Color::from_rgb(0xff, 0x00, 0xff),
                Color::from_rgb(0xff, 0x80, 0x00),
                Color::from_rgb(0xff, 0xff, 0xff),
            ],
        }
    }

    /// Palette entry for the `index`-th curve, wrapping around.
    pub fn curve_color(&self, index: usize) -> Color {
        self.palette[index % self.palette.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![
        Theme::dark(),
        Theme::light(),
        Theme::solarized_dark(),
        Theme::solarized_light(),
        Theme::high_contrast_dark(),
    ]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::dark()
}
