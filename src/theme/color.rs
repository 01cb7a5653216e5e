//! Hex => OKLCH conversion and the derived primary/foreground palette.
//!
//! Pipeline: sRGB => linear RGB => XYZ (D65) => Lab => approximate OKLab
//! => OKLCH.

use crate::error::GenerateError;
use std::fmt;

/// D65 reference white.
const WHITE: [f64; 3] = [0.95047, 1.0, 1.08883];

/// Linear sRGB => XYZ under D65.
const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

/// Lab a/b scale onto the OKLab chromatic axes.
const LAB_TO_OKLAB_CHROMA: f64 = 0.0025;

const LIGHT_FOREGROUND: f64 = 0.985;
const DARK_FOREGROUND: f64 = 0.145;
const DARK_MODE_BOOST: f64 = 0.3;
const DARK_MODE_MAX_LIGHTNESS: f64 = 0.923;

/// A color in OKLCH: lightness in [0,1], chroma >= 0, hue in [0,360).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Oklch {
    /// Fully desaturated text color with maximum contrast against `self`.
    pub fn foreground(&self) -> Oklch {
        let l = if self.l < 0.5 {
            LIGHT_FOREGROUND
        } else {
            DARK_FOREGROUND
        };
        Oklch { l, c: 0.0, h: 0.0 }
    }

    /// Same hue and chroma, lightened for dark backgrounds.
    pub fn dark_variant(&self) -> Oklch {
        Oklch {
            l: (self.l + DARK_MODE_BOOST).min(DARK_MODE_MAX_LIGHTNESS),
            ..*self
        }
    }
}

impl fmt::Display for Oklch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "oklch({} {} {})",
            trim3(self.l),
            trim3(self.c),
            trim3(self.h)
        )
    }
}

/// Three decimals, without trailing zeros ("0.985", "0", "259.8").
fn trim3(x: f64) -> String {
    let s = format!("{:.3}", x);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Parse `#rgb` / `#rrggbb` (leading `#` optional) into RGB in [0,1].
pub fn parse_hex(hex: &str) -> Result<[f64; 3], GenerateError> {
    let digits = hex.trim().trim_start_matches('#');
    let invalid = || GenerateError::InvalidColor(hex.to_string());

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(invalid()),
    };

    let mut rgb = [0.0; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&expanded[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        *channel = f64::from(byte) / 255.0;
    }
    Ok(rgb)
}

pub fn hex_to_oklch(hex: &str) -> Result<Oklch, GenerateError> {
    let rgb = parse_hex(hex)?.map(srgb_to_linear);

    let mut xyz = [0.0; 3];
    for (row, out) in RGB_TO_XYZ.iter().zip(xyz.iter_mut()) {
        *out = row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2];
    }
    let [fx, fy, fz] = [0, 1, 2].map(|i| lab_f(xyz[i] / WHITE[i]));

    let lab_l = 116.0 * fy - 16.0;
    let lab_a = 500.0 * (fx - fy);
    let lab_b = 200.0 * (fy - fz);

    let l = (lab_l / 100.0).clamp(0.0, 1.0);
    let a = lab_a * LAB_TO_OKLAB_CHROMA;
    let b = lab_b * LAB_TO_OKLAB_CHROMA;

    let c = (a * a + b * b).sqrt();
    // Rounding noise on greys would otherwise produce an arbitrary hue.
    if c < 1e-4 {
        return Ok(Oklch { l, c: 0.0, h: 0.0 });
    }
    let h = b.atan2(a).to_degrees().rem_euclid(360.0);
    // Keep the formatted hue inside [0,360).
    let h = if (h * 1000.0).round() >= 360_000.0 { 0.0 } else { h };

    Ok(Oklch { l, c, h })
}

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn lab_f(t: f64) -> f64 {
    const DELTA: f64 = 6.0 / 29.0;
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

/// Light and dark declarations derived from one primary color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub light: Oklch,
    pub light_foreground: Oklch,
    pub dark: Oklch,
    pub dark_foreground: Oklch,
}

impl Palette {
    pub fn from_hex(hex: &str) -> Result<Self, GenerateError> {
        let light = hex_to_oklch(hex)?;
        let dark = light.dark_variant();
        Ok(Self {
            light,
            light_foreground: light.foreground(),
            dark,
            dark_foreground: dark.foreground(),
        })
    }
}
