// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Display colors, and the mapping from an escape result to one.
//!
//! Points inside the set are painted white.  Points outside get a
//! fully saturated hue derived from how long they took to escape and
//! how far out they were when they did.  That hue is deliberately not
//! normalized: it wraps around the color wheel as often as it likes,
//! which is what gives the bands their look.

use crate::escape::EscapeResult;

/// A gamma-encoded, display-ready color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Opacity.  Everything the renderer writes is fully opaque.
    pub a: u8,
}

impl Color {
    /// Opaque white, the color of the set itself.
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 255 }
    }

    /// True once the color has been written by the renderer.  The
    /// `Default` color is fully transparent and is used as the
    /// "never written" sentinel.
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// The channels in RGBA order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Escape counts are divided by this before being scaled by the
/// squared magnitude to form a hue.
const HUE_DIVISOR: f64 = 800.0;

/// Converts a hue, saturation, lightness triple into an opaque RGB
/// color.  Saturation and lightness are expected in [0, 1].  The hue
/// has period 1 and any finite value is accepted: it is reduced with
/// a Euclidean remainder, so 1.25 and -0.75 both mean 0.25.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Color {
    let mut h = h.rem_euclid(1.0);
    if h >= 1.0 {
        // rem_euclid rounds tiny negatives up to exactly 1.0
        h = 0.0;
    }

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h6 = h * 6.0;
    let x = c * (1.0 - ((h6 % 2.0) - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h6 as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Color::rgb(to_channel(r + m), to_channel(g + m), to_channel(b + m))
}

#[inline]
fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().max(0.0).min(255.0) as u8
}

/// Paints a single escape result.  White if and only if the point
/// used up all `max_iterations`.
pub fn map_color(result: EscapeResult, max_iterations: u32) -> Color {
    if result.is_inside(max_iterations) {
        return Color::WHITE;
    }
    let hue = f64::from(result.iterations) / HUE_DIVISOR * result.squared_magnitude;
    hsl_to_rgb(hue, 1.0, 0.5)
}
