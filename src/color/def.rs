use serde::{Deserialize, Serialize};

use crate::{
    color::vector::{ColorSource, Components},
    foundation::core::clamp01,
    foundation::error::{SpeckleError, SpeckleResult},
};

/// Straight (non-premultiplied) RGBA color as written in scene files.
///
/// Accepts `"#RRGGBB"`, `"#RRGGBBAA"`, `{r,g,b[,a]}`, `{h,s,l[,a]}` and `[r,g,b[,a]]`,
/// with channel values in `[0, 1]` and hue in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorDef {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha channel.
    pub a: f64,
}

impl ColorDef {
    /// Build a color from straight channel values.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

impl ColorSource for ColorDef {
    fn components(&self) -> Option<Components> {
        Some(Components::from_slice(&[self.r, self.g, self.b, self.a]))
    }

    fn alpha(&self) -> f64 {
        self.a
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            HslaObj {
                h: f64,
                s: f64,
                l: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
            Repr::HslaObj { h, s, l, a } => Ok(hsla_to_rgba(h, s, l, a)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgba(*r, *g, *b, 1.0)),
                [r, g, b, a] => Ok(Self::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

/// `#RRGGBB` or `#RRGGBBAA` (the `#` is optional) into straight RGBA.
fn parse_hex(s: &str) -> SpeckleResult<ColorDef> {
    let digits = s.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    let has_alpha = match digits.len() {
        6 => false,
        8 => true,
        _ => {
            return Err(SpeckleError::config(format!(
                "hex color must be #RRGGBB or #RRGGBBAA, got \"{s}\""
            )));
        }
    };
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(SpeckleError::config(format!("invalid hex color \"{s}\"")));
    }
    let packed = u32::from_str_radix(digits, 16)
        .map_err(|e| SpeckleError::config(format!("invalid hex color \"{s}\": {e}")))?;
    let packed = if has_alpha { packed } else { (packed << 8) | 0xff };

    let channel = |shift: u32| f64::from((packed >> shift) & 0xff) / 255.0;
    Ok(ColorDef::rgba(channel(24), channel(16), channel(8), channel(0)))
}

/// Hue in degrees (any range), saturation and lightness in `[0, 1]`.
fn hsla_to_rgba(h: f64, s: f64, l: f64, a: f64) -> ColorDef {
    let s = clamp01(s);
    let l = clamp01(l);
    let sector = h.rem_euclid(360.0) / 60.0;
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());

    let (r, g, b) = match sector as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;
    ColorDef::rgba(r + m, g + m, b + m, a)
}
