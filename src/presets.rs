// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A handful of known-good places to look.

use itertools::Itertools;

use crate::params::RenderParams;

/// A named set of render parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Preset {
    /// Short, command-line friendly name.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// The parameters themselves.
    pub params: RenderParams,
}

/// Every preset, in display order.  The first one matches the
/// defaults.
pub static PRESETS: [Preset; 5] = [
    Preset {
        key: "default",
        name: "Default View",
        params: RenderParams {
            width: 512,
            height: 512,
            center_x: -0.745,
            center_y: 0.113,
            half_height: 0.005,
            max_iterations: 1000,
            samples: 10,
        },
    },
    Preset {
        key: "classic",
        name: "Classic Full Set",
        params: RenderParams {
            width: 512,
            height: 512,
            center_x: -0.5,
            center_y: 0.0,
            half_height: 2.5,
            max_iterations: 500,
            samples: 10,
        },
    },
    Preset {
        key: "seahorse",
        name: "Seahorse Valley",
        params: RenderParams {
            width: 1024,
            height: 1024,
            center_x: -0.75,
            center_y: 0.11,
            half_height: 0.016,
            max_iterations: 1500,
            samples: 50,
        },
    },
    Preset {
        key: "elephant",
        name: "Elephant Valley",
        params: RenderParams {
            width: 1024,
            height: 1024,
            center_x: 0.275,
            center_y: 0.005,
            half_height: 0.005,
            max_iterations: 1500,
            samples: 50,
        },
    },
    Preset {
        key: "deep-zoom",
        name: "Deep Zoom Point",
        params: RenderParams {
            width: 1024,
            height: 1024,
            center_x: -0.555_750_6,
            center_y: -0.555_60,
            half_height: 0.000_000_001,
            max_iterations: 2500,
            samples: 50,
        },
    },
];

/// Looks a preset up by key or display name, ignoring case.
pub fn find(name: &str) -> Option<&'static Preset> {
    let name = name.trim();
    PRESETS
        .iter()
        .find(|p| p.key.eq_ignore_ascii_case(name) || p.name.eq_ignore_ascii_case(name))
}

/// The preset keys, comma separated.
pub fn keys() -> String {
    PRESETS.iter().map(|p| p.key).join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preset_matches_defaults() {
        assert_eq!(PRESETS[0].params, RenderParams::default());
    }

    #[test]
    fn find_by_key_or_name() {
        assert_eq!(find("seahorse").map(|p| p.name), Some("Seahorse Valley"));
        assert_eq!(find("Elephant Valley").map(|p| p.key), Some("elephant"));
        assert_eq!(find("DEEP-ZOOM").map(|p| p.params.max_iterations), Some(2500));
        assert!(find("nowhere").is_none());
    }

    #[test]
    fn presets_are_already_sane() {
        for p in PRESETS.iter() {
            assert_eq!(p.params.sanitized(), p.params, "{}", p.name);
        }
    }

    #[test]
    fn keys_are_listed() {
        assert_eq!(keys(), "default, classic, seahorse, elephant, deep-zoom");
    }
}
