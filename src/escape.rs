// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time iterator.  A point `c` is iterated through
//! `z' = z² + c` from `z = 0`; the number of steps it takes for `|z|`
//! to pass 2 is its "velocity," and points that never get there are
//! treated as members of the Mandelbrot set.

/// The outcome of iterating a single point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EscapeResult {
    /// `|z|²` at the moment iteration stopped.
    pub squared_magnitude: f64,
    /// The step index at which the point escaped, or the iteration
    /// limit if it never did.
    pub iterations: u32,
}

impl EscapeResult {
    /// True when the point used up every iteration without escaping.
    pub fn is_inside(&self, max_iterations: u32) -> bool {
        self.iterations == max_iterations
    }
}

/// Iterates the point `(cx, cy)` at most `max_iterations` times.
///
/// The squares and the cross product are carried between steps so
/// each step costs three multiplications.  The escape test runs after
/// each step, so a point that leaves the radius-2 disc on the very
/// first step reports `iterations == 0`.
#[inline]
pub fn iterate(cx: f64, cy: f64, max_iterations: u32) -> EscapeResult {
    let (mut xx, mut yy, mut xy) = (0.0_f64, 0.0_f64, 0.0_f64);

    for i in 0..max_iterations {
        let x = xx - yy + cx;
        let y = 2.0 * xy + cy;
        xx = x * x;
        yy = y * y;
        xy = x * y;
        if xx + yy > 4.0 {
            return EscapeResult {
                squared_magnitude: xx + yy,
                iterations: i,
            };
        }
    }

    EscapeResult {
        squared_magnitude: xx + yy,
        iterations: max_iterations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use crate::xorshift::XorShift64;

    #[test]
    fn escapes_on_first_step() {
        for n in &[1, 2, 10, 1000] {
            let r = iterate(3.0, 0.0, *n);
            assert_eq!(r.iterations, 0);
            assert_eq!(r.squared_magnitude, 9.0);
        }
    }

    #[test]
    fn origin_never_escapes() {
        for n in &[1, 7, 1000, 5000] {
            let r = iterate(0.0, 0.0, *n);
            assert_eq!(r.iterations, *n);
            assert_eq!(r.squared_magnitude, 0.0);
            assert!(r.is_inside(*n));
        }
    }

    #[test]
    fn minus_two_sits_on_the_boundary() {
        // z runs 0, -2, 2, 2, ... and |z|² stays exactly 4.
        let r = iterate(-2.0, 0.0, 50);
        assert_eq!(r.iterations, 50);
        assert_eq!(r.squared_magnitude, 4.0);
    }

    #[test]
    fn slow_escape_is_counted() {
        // z: 0, 0.5, 0.75, 1.0625, 1.6289.., 3.1533.. (|z|² > 4 on step 4)
        let r = iterate(0.5, 0.0, 100);
        assert_eq!(r.iterations, 4);
        assert!(r.squared_magnitude > 4.0);
    }

    #[test]
    fn iterations_never_exceed_the_limit() {
        let mut rng = XorShift64::seed_from_u64(11);
        for _ in 0..5_000 {
            let cx = rng.gen_range(-2.5..1.5);
            let cy = rng.gen_range(-1.5..1.5);
            let limit = rng.gen_range(1..300);
            let r = iterate(cx, cy, limit);
            assert!(r.iterations <= limit);
            if r.iterations < limit {
                assert!(r.squared_magnitude > 4.0);
            }
        }
    }
}
