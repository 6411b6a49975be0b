use smallvec::SmallVec;

use crate::foundation::core::clamp01;
use crate::foundation::error::{SpeckleError, SpeckleResult};

/// Raw channel values as reported by a platform color.
pub type Components = SmallVec<[f64; 4]>;

/// Color space tag carried by a [`ColorVector`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpace {
    /// Flat RGB: channels in `[0, 255]`, alpha in `[0, 1]`.
    #[default]
    Rgb,
    /// CIE L*a*b*.
    Lab,
    /// Cylindrical L*C*h.
    Lch,
    /// CIE XYZ.
    Xyz,
}

/// RGB-like spaces a platform color may be re-expressed in during extraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RgbSpace {
    /// Extended-range sRGB.
    ExtendedSrgb,
    /// Standard sRGB.
    Srgb,
    /// Device-dependent RGB.
    DeviceRgb,
    /// Generic (calibrated) RGB.
    GenericRgb,
}

impl RgbSpace {
    /// Conversion attempts in priority order.
    pub const CANDIDATES: [RgbSpace; 4] = [
        RgbSpace::ExtendedSrgb,
        RgbSpace::Srgb,
        RgbSpace::DeviceRgb,
        RgbSpace::GenericRgb,
    ];
}

/// A platform color that can report its channel values.
///
/// Extraction tries [`ColorSource::components`] first, then
/// [`ColorSource::components_in`] for each of [`RgbSpace::CANDIDATES`], and finally
/// [`ColorSource::fallback_rgba`]. Component slices are interpreted by count:
/// four or more are `r, g, b, a`; three are `r, g, b` plus [`ColorSource::alpha`];
/// two are `white, alpha`; one is `white` plus [`ColorSource::alpha`].
pub trait ColorSource: std::fmt::Debug {
    /// Components in the color's own representation, normalized toward sRGB when possible.
    fn components(&self) -> Option<Components>;

    /// The color's own alpha value.
    fn alpha(&self) -> f64;

    /// Components after converting the color into `space`, if the platform supports it.
    fn components_in(&self, _space: RgbSpace) -> Option<Components> {
        None
    }

    /// Last-resort straight RGBA reading (for example derived from luminance).
    fn fallback_rgba(&self) -> Option<[f64; 4]> {
        None
    }
}

/// External color-space conversion applied to assembled flat-RGB vectors.
pub trait SpaceConverter {
    /// Convert a flat-RGB vector into `space`.
    fn convert(&self, rgb: ColorVector, space: ColorSpace) -> ColorVector;
}

impl<F> SpaceConverter for F
where
    F: Fn(ColorVector, ColorSpace) -> ColorVector,
{
    fn convert(&self, rgb: ColorVector, space: ColorSpace) -> ColorVector {
        self(rgb, space)
    }
}

/// Four-component color tagged with the space its components live in.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorVector {
    /// Raw components; meaning depends on `space`.
    pub v: [f64; 4],
    /// Space the components are expressed in.
    pub space: ColorSpace,
}

impl Default for ColorVector {
    fn default() -> Self {
        Self::zeroed(ColorSpace::Rgb)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Rgba {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

impl ColorVector {
    /// Build a vector from raw components.
    pub fn new(v: [f64; 4], space: ColorSpace) -> Self {
        Self { v, space }
    }

    /// The documented default: all components zero in `space`.
    pub fn zeroed(space: ColorSpace) -> Self {
        Self { v: [0.0; 4], space }
    }

    /// Normalize a platform color into flat RGB.
    pub fn from_color(color: &dyn ColorSource) -> SpeckleResult<Self> {
        let c = extract_rgba(color).ok_or_else(|| {
            SpeckleError::color(format!("failed to normalize color components: {color:?}"))
        })?;

        Ok(Self::new(
            [
                clamp01(c.r) * 255.0,
                clamp01(c.g) * 255.0,
                clamp01(c.b) * 255.0,
                clamp01(c.a),
            ],
            ColorSpace::Rgb,
        ))
    }

    /// Normalize a platform color into `space`, delegating non-RGB spaces to `converter`.
    pub fn from_color_in(
        color: &dyn ColorSource,
        space: ColorSpace,
        converter: &dyn SpaceConverter,
    ) -> SpeckleResult<Self> {
        let rgb = Self::from_color(color)?;
        if space == ColorSpace::Rgb {
            Ok(rgb)
        } else {
            Ok(converter.convert(rgb, space))
        }
    }

    /// Like [`ColorVector::from_color_in`], substituting [`ColorVector::zeroed`] on failure.
    pub fn from_color_or_zeroed(
        color: &dyn ColorSource,
        space: ColorSpace,
        converter: &dyn SpaceConverter,
    ) -> Self {
        match Self::from_color_in(color, space, converter) {
            Ok(v) => v,
            Err(err) => {
                tracing::warn!(%err, ?space, "substituting zeroed color vector");
                Self::zeroed(space)
            }
        }
    }
}

fn extract_rgba(color: &dyn ColorSource) -> Option<Rgba> {
    if let Some(c) = color
        .components()
        .and_then(|raw| rgba_from_components(&raw, color.alpha()))
    {
        return Some(c);
    }

    for space in RgbSpace::CANDIDATES {
        if let Some(c) = color
            .components_in(space)
            .and_then(|raw| rgba_from_components(&raw, color.alpha()))
        {
            return Some(c);
        }
    }

    color
        .fallback_rgba()
        .map(|[r, g, b, a]| Rgba { r, g, b, a })
}

fn rgba_from_components(raw: &[f64], own_alpha: f64) -> Option<Rgba> {
    match *raw {
        [r, g, b, a, ..] => Some(Rgba { r, g, b, a }),
        [r, g, b] => Some(Rgba { r, g, b, a: own_alpha }),
        [w, a] => Some(Rgba {
            r: w,
            g: w,
            b: w,
            a,
        }),
        [w] => Some(Rgba {
            r: w,
            g: w,
            b: w,
            a: own_alpha,
        }),
        [] => None,
    }
}

/// Plain component list implementing [`ColorSource`].
#[derive(Clone, Debug, PartialEq)]
pub struct RawColor {
    /// Components as reported by the platform.
    pub components: Components,
    /// The color's own alpha.
    pub alpha: f64,
}

impl RawColor {
    /// Wrap a component slice with an explicit alpha.
    pub fn new(components: &[f64], alpha: f64) -> Self {
        Self {
            components: Components::from_slice(components),
            alpha,
        }
    }
}

impl ColorSource for RawColor {
    fn components(&self) -> Option<Components> {
        if self.components.is_empty() {
            None
        } else {
            Some(self.components.clone())
        }
    }

    fn alpha(&self) -> f64 {
        self.alpha
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/vector.rs"]
mod tests;
