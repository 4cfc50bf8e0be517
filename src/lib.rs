#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! Takes a rectangle of the complex plane and paints it as an image of
//! the Mandelbrot set.  Every pixel is sampled several times at
//! random positions inside its footprint and the samples are averaged
//! together, which smooths out the jagged, noisy edges a single
//! sample per pixel produces.  The averaging happens in linear light
//! rather than on the gamma-encoded values, because averaging encoded
//! values darkens everything that has detail in it, and the Mandelbrot
//! set is nothing but detail.
//!
//! The rendering is spread over a pool of threads, one per logical
//! CPU, which pull rows off a shared channel until the image is done.

pub mod color;
pub mod encode;
pub mod escape;
pub mod framebuffer;
pub mod linear;
pub mod params;
pub mod presets;
pub mod render;
pub mod viewport;
pub mod xorshift;

pub use color::Color;
pub use escape::{iterate, EscapeResult};
pub use framebuffer::Framebuffer;
pub use linear::Mixing;
pub use params::RenderParams;
pub use render::{render, RenderOptions, Renderer};
pub use viewport::{SampleSpec, Viewport};
pub use xorshift::XorShift64;
