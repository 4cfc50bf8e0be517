// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Describes the relationship between the integral plane of the image
//! (pixels, with an origin at 0,0) and the window of the complex plane
//! being rendered, plus the per-pixel sampling budget.

use num::Complex;

/// The window onto the complex plane.
///
/// Despite the names, the window spans `half_height` on the imaginary
/// axis and `half_height * aspect_ratio` on the real axis, and
/// `center_x, center_y` is where pixel (0, 0) lands.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Real offset of the window.
    pub center_x: f64,
    /// Imaginary offset of the window.
    pub center_y: f64,
    /// Height of the window on the imaginary axis.  Always positive.
    pub half_height: f64,
    /// Image width over image height.
    pub aspect_ratio: f64,
    width: f64,
    height: f64,
}

impl Viewport {
    /// Builds the viewport for a `width` x `height` image.  Callers
    /// must pass positive dimensions and a positive `half_height`.
    pub fn new(width: u32, height: u32, center_x: f64, center_y: f64, half_height: f64) -> Self {
        debug_assert!(width > 0 && height > 0, "empty image");
        debug_assert!(half_height > 0.0, "half_height must be positive");
        Viewport {
            center_x,
            center_y,
            half_height,
            aspect_ratio: f64::from(width) / f64::from(height),
            width: f64::from(width),
            height: f64::from(height),
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width as u32
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height as u32
    }

    /// Maps a position inside pixel (x, y), offset by the jitter
    /// `(jx, jy)` in [0, 1), onto the complex plane.
    #[inline]
    pub fn sample_point(&self, x: u32, y: u32, jx: f64, jy: f64) -> Complex<f64> {
        Complex::new(
            self.half_height * self.aspect_ratio * ((f64::from(x) + jx) / self.width)
                + self.center_x,
            self.half_height * ((f64::from(y) + jy) / self.height) + self.center_y,
        )
    }

    /// The corner of pixel (x, y) nearest the origin of the image.
    pub fn pixel_to_point(&self, x: u32, y: u32) -> Complex<f64> {
        self.sample_point(x, y, 0.0, 0.0)
    }
}

/// How hard to work on each pixel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SampleSpec {
    /// Iteration bound for the escape-time iterator.
    pub max_iterations: u32,
    /// Jittered samples averaged into every pixel.
    pub samples: u32,
}

impl SampleSpec {
    /// Both values must be positive; the boundary layer clamps them.
    pub fn new(max_iterations: u32, samples: u32) -> Self {
        debug_assert!(max_iterations > 0 && samples > 0);
        SampleSpec {
            max_iterations,
            samples,
        }
    }
}
