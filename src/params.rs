// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The boundary between the outside world and the renderer.
//!
//! Callers hand in whatever they were given: a query string, command
//! line flags, a preset.  Nothing here fails.  Missing values take
//! their defaults, values that don't parse take their defaults, and
//! once everything is collected, `sanitized` swaps any value the
//! renderer cannot work with for its default.  The renderer itself
//! never checks.

use log::warn;
use std::str::FromStr;

use crate::viewport::{SampleSpec, Viewport};

/// Default image width.
pub const DEFAULT_WIDTH: i64 = 512;
/// Default image height.
pub const DEFAULT_HEIGHT: i64 = 512;
/// Default real offset.
pub const DEFAULT_CENTER_X: f64 = -0.745;
/// Default imaginary offset.
pub const DEFAULT_CENTER_Y: f64 = 0.113;
/// Default window height.
pub const DEFAULT_HALF_HEIGHT: f64 = 0.005;
/// Default iteration bound.
pub const DEFAULT_MAX_ITERATIONS: i64 = 1000;
/// Default samples per pixel.
pub const DEFAULT_SAMPLES: i64 = 10;

/// The seven numbers that describe a render, exactly as supplied.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderParams {
    /// Image width, `w` in a query.
    pub width: i64,
    /// Image height, `h`.
    pub height: i64,
    /// Real offset, `px`.
    pub center_x: f64,
    /// Imaginary offset, `py`.
    pub center_y: f64,
    /// Window height, `ph`.
    pub half_height: f64,
    /// Iteration bound, `iter`.
    pub max_iterations: i64,
    /// Samples per pixel, `samples`.
    pub samples: i64,
}

impl Default for RenderParams {
    fn default() -> Self {
        RenderParams {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            center_x: DEFAULT_CENTER_X,
            center_y: DEFAULT_CENTER_Y,
            half_height: DEFAULT_HALF_HEIGHT,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            samples: DEFAULT_SAMPLES,
        }
    }
}

/// Given a string and a separator, returns the two values
/// separated by the separator.
pub fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// Parses `raw` for the parameter `name`, logging and falling back to
/// `default` if it can't be read.  An absent or empty value is not
/// worth a warning.
pub fn parse_or<T>(name: &str, raw: Option<&str>, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match raw.map(str::trim) {
        None | Some("") => default,
        Some(s) => match T::from_str(s) {
            Ok(v) => v,
            Err(_) => {
                warn!("invalid value for {}: {:?}, using default {}", name, s, default);
                default
            }
        },
    }
}

fn positive_int(name: &str, value: i64, default: i64) -> i64 {
    if value > 0 && value <= i64::from(u32::MAX) {
        value
    } else {
        warn!("{} must be a positive integer, got {}, using {}", name, value, default);
        default
    }
}

impl RenderParams {
    /// Reads `w`, `h`, `px`, `py`, `ph`, `iter` and `samples` out of a
    /// URL query string, with or without its leading `?`.  Unknown keys
    /// are ignored; if a key repeats, the first occurrence wins.
    pub fn from_query(query: &str) -> RenderParams {
        let query = query.trim_start_matches('?');
        let pairs: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        let d = RenderParams::default();
        RenderParams {
            width: parse_or("w", get("w"), d.width),
            height: parse_or("h", get("h"), d.height),
            center_x: parse_or("px", get("px"), d.center_x),
            center_y: parse_or("py", get("py"), d.center_y),
            half_height: parse_or("ph", get("ph"), d.half_height),
            max_iterations: parse_or("iter", get("iter"), d.max_iterations),
            samples: parse_or("samples", get("samples"), d.samples),
        }
    }

    /// Replaces every value the renderer can't accept with its
    /// default: non-positive (or oversized) counts and dimensions, a
    /// non-positive or non-finite window height, and non-finite
    /// offsets.
    pub fn sanitized(&self) -> RenderParams {
        let d = RenderParams::default();
        let finite = |name: &str, v: f64, default: f64| {
            if v.is_finite() {
                v
            } else {
                warn!("{} must be finite, got {}, using {}", name, v, default);
                default
            }
        };
        let half_height = if self.half_height.is_finite() && self.half_height > 0.0 {
            self.half_height
        } else {
            warn!(
                "ph must be positive, got {}, using {}",
                self.half_height, d.half_height
            );
            d.half_height
        };

        RenderParams {
            width: positive_int("w", self.width, d.width),
            height: positive_int("h", self.height, d.height),
            center_x: finite("px", self.center_x, d.center_x),
            center_y: finite("py", self.center_y, d.center_y),
            half_height,
            max_iterations: positive_int("iter", self.max_iterations, d.max_iterations),
            samples: positive_int("samples", self.samples, d.samples),
        }
    }

    /// The viewport described by the sanitized parameters.
    pub fn viewport(&self) -> Viewport {
        let p = self.sanitized();
        Viewport::new(
            p.width as u32,
            p.height as u32,
            p.center_x,
            p.center_y,
            p.half_height,
        )
    }

    /// The sampling budget described by the sanitized parameters.
    pub fn sample_spec(&self) -> SampleSpec {
        let p = self.sanitized();
        SampleSpec::new(p.max_iterations as u32, p.samples as u32)
    }

    /// Renders the parameters as a query string that `from_query` reads
    /// back.
    pub fn to_query(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("w", &self.width.to_string())
            .append_pair("h", &self.height.to_string())
            .append_pair("px", &self.center_x.to_string())
            .append_pair("py", &self.center_y.to_string())
            .append_pair("ph", &self.half_height.to_string())
            .append_pair("iter", &self.max_iterations.to_string())
            .append_pair("samples", &self.samples.to_string())
            .finish()
    }
}
