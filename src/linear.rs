// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Gamma-correct averaging.
//!
//! Display colors are gamma encoded, so the plain average of two
//! encoded values is darker than the average of the light they stand
//! for.  Samples are therefore decoded with the sRGB transfer function
//! into 16-bit linear light, summed, divided, and encoded again.

use crate::color::Color;
use once_cell::sync::Lazy;

const LINEAR_MAX: f64 = 65535.0;

/// A linear-light color, 16 bits per channel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LinearColor {
    /// Red
    pub r: u16,
    /// Green
    pub g: u16,
    /// Blue
    pub b: u16,
}

impl LinearColor {
    /// Decodes every channel of a display color.
    pub fn from_color(c: Color) -> LinearColor {
        LinearColor {
            r: rgb_to_linear(c.r),
            g: rgb_to_linear(c.g),
            b: rgb_to_linear(c.b),
        }
    }

    /// Encodes every channel back into an opaque display color.
    pub fn to_color(self) -> Color {
        Color::rgb(
            linear_to_rgb(self.r),
            linear_to_rgb(self.g),
            linear_to_rgb(self.b),
        )
    }
}

// Every 8-bit input is decoded at most once per process.
static DECODE: Lazy<[u16; 256]> = Lazy::new(|| {
    let mut table = [0u16; 256];
    for (v, slot) in table.iter_mut().enumerate() {
        let c = v as f64 / 255.0;
        let linear = if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        };
        *slot = (linear * LINEAR_MAX).round() as u16;
    }
    table
});

/// sRGB decode of one 8-bit channel into the 16-bit linear range.
#[inline]
pub fn rgb_to_linear(v: u8) -> u16 {
    DECODE[v as usize]
}

/// sRGB encode of one 16-bit linear channel, rounded to the nearest
/// 8-bit value.
pub fn linear_to_rgb(v: u16) -> u8 {
    let linear = f64::from(v) / LINEAR_MAX;
    let c = if linear <= 0.003_130_8 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    };
    (c * 255.0).round().max(0.0).min(255.0) as u8
}

/// How the samples of one pixel are blended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mixing {
    /// Average in linear light.
    Linear,
    /// Average the gamma-encoded channels directly.
    Gamma,
}

impl Default for Mixing {
    fn default() -> Self {
        Mixing::Linear
    }
}

/// Running per-channel sums for a single pixel.
#[derive(Clone, Debug)]
pub struct Accumulator {
    mixing: Mixing,
    sums: [u64; 3],
    count: u32,
}

impl Accumulator {
    /// An empty accumulator.
    pub fn new(mixing: Mixing) -> Self {
        Accumulator {
            mixing,
            sums: [0; 3],
            count: 0,
        }
    }

    /// Adds one sample.
    #[inline]
    pub fn add(&mut self, c: Color) {
        let channels = match self.mixing {
            Mixing::Linear => {
                let l = LinearColor::from_color(c);
                [l.r, l.g, l.b]
            }
            Mixing::Gamma => [u16::from(c.r), u16::from(c.g), u16::from(c.b)],
        };
        for (sum, v) in self.sums.iter_mut().zip(channels.iter()) {
            *sum += u64::from(*v);
        }
        self.count += 1;
    }

    /// Number of samples added so far.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// The rounded average of everything added, as an opaque color.
    /// An empty accumulator yields opaque black.
    pub fn average(&self) -> Color {
        if self.count == 0 {
            return Color::rgb(0, 0, 0);
        }
        let n = f64::from(self.count);
        let mean = |sum: u64| (sum as f64 / n).round();
        match self.mixing {
            Mixing::Linear => LinearColor {
                r: mean(self.sums[0]) as u16,
                g: mean(self.sums[1]) as u16,
                b: mean(self.sums[2]) as u16,
            }
            .to_color(),
            Mixing::Gamma => Color::rgb(
                mean(self.sums[0]) as u8,
                mean(self.sums[1]) as u8,
                mean(self.sums[2]) as u8,
            ),
        }
    }
}
