//! Color model: 8-bit output colors and the live HSV animation state.
//!
//! Effects only ever touch [`HsvColor`] values. A [`Color`] is produced from
//! an `HsvColor` right before it is written to a device, using the standard
//! six-sector HSV decomposition with round-down quantization.

use palette::Srgba;
use thiserror::Error;

/// An output color, one byte per channel. Alpha is always opaque.
pub type Color = Srgba<u8>;

/// Slack allowed on saturation and value before they count as out of range.
///
/// Bounded sinusoids can overshoot `1.0` by a few ulps.
const DOMAIN_TOLERANCE: f64 = 1e-9;

/// Returned when an [`HsvColor`] is outside the HSV domain and cannot be converted.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid color parameters: H={h}, S={s}, V={v}")]
pub struct InvalidColorParameters {
    /// Hue at the time of conversion.
    pub h: f64,
    /// Saturation at the time of conversion.
    pub s: f64,
    /// Value at the time of conversion.
    pub v: f64,
}

/// A color in hue/saturation/value space.
///
/// `h` is a fraction of a full turn in `[0, 1)`, `s` and `v` are in `[0, 1]`.
/// This is the mutable per-device state that effects animate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvColor {
    /// Hue, fraction of the color wheel.
    pub h: f64,
    /// Saturation.
    pub s: f64,
    /// Value (brightness).
    pub v: f64,
}

impl HsvColor {
    /// Creates a new HSV color. The hue is wrapped into `[0, 1)`.
    #[inline]
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h: wrap_hue(h), s, v }
    }

    /// Overwrites all three components, wrapping the hue.
    #[inline]
    pub fn set_hsv(&mut self, h: f64, s: f64, v: f64) {
        self.h = wrap_hue(h);
        self.s = s;
        self.v = v;
    }

    /// Converts to an 8-bit RGBA color.
    ///
    /// # Errors
    /// Returns [`InvalidColorParameters`] if any component is not finite, the
    /// hue is outside `[0, 1)`, or saturation/value is outside `[0, 1]`.
    pub fn to_color(&self) -> Result<Color, InvalidColorParameters> {
        let Self { h, s, v } = *self;
        if !self.in_domain() {
            return Err(InvalidColorParameters { h, s, v });
        }

        let s = s.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        let chroma = v * s;
        let sector = h * 6.0;
        let x = chroma * (1.0 - ((sector % 2.0) - 1.0).abs());

        let (r, g, b) = match sector {
            p if p < 1.0 => (chroma, x, 0.0),
            p if p < 2.0 => (x, chroma, 0.0),
            p if p < 3.0 => (0.0, chroma, x),
            p if p < 4.0 => (0.0, x, chroma),
            p if p < 5.0 => (x, 0.0, chroma),
            p if p < 6.0 => (chroma, 0.0, x),
            _ => return Err(InvalidColorParameters { h, s, v }),
        };

        let m = v - chroma;
        Ok(Srgba::new(quantize(r + m), quantize(g + m), quantize(b + m), u8::MAX))
    }

    fn in_domain(&self) -> bool {
        let unit = -DOMAIN_TOLERANCE..=1.0 + DOMAIN_TOLERANCE;
        self.h.is_finite()
            && (0.0..1.0).contains(&self.h)
            && self.s.is_finite()
            && unit.contains(&self.s)
            && self.v.is_finite()
            && unit.contains(&self.v)
    }
}

/// Wraps a hue into `[0, 1)`.
///
/// `rem_euclid` can round tiny negative inputs up to exactly `1.0`; those fold to `0.0`.
#[inline]
pub fn wrap_hue(h: f64) -> f64 {
    let wrapped = h.rem_euclid(1.0);
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

#[inline]
fn quantize(component: f64) -> u8 {
    (255.0 * component).floor().clamp(0.0, 255.0) as u8
}
