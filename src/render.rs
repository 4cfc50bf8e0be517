// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The renderer.
//!
//! Each pixel is sampled `samples` times at random positions inside
//! its footprint; each sample is iterated, painted, and blended into
//! the pixel's accumulator.
//!
//! The image is rendered by a fixed pool of threads.  A single
//! producer pushes every row of the framebuffer into a channel, each
//! row travelling as a `&mut` slice, so whichever worker receives a
//! row owns it outright and no locking is needed on the buffer.
//! Workers keep pulling rows until the channel is drained and closed,
//! and the render returns only when every worker has returned.  Each
//! worker carries its own random number generator.

use crossbeam::channel::{bounded, Receiver};
use log::{debug, info};
use std::panic;
use std::time::Instant;

use crate::color::{map_color, Color};
use crate::escape::iterate;
use crate::framebuffer::Framebuffer;
use crate::linear::{Accumulator, Mixing};
use crate::viewport::{SampleSpec, Viewport};
use crate::xorshift::{clock_seed, XorShift64};

/// Knobs that change how, but not what, is rendered.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderOptions {
    /// Worker threads.  Defaults to the number of logical CPUs.
    pub threads: usize,
    /// Base seed for the per-worker generators.  Defaults to the wall
    /// clock.
    pub seed: u64,
    /// Sample blending policy.
    pub mixing: Mixing,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            threads: num_cpus::get(),
            seed: clock_seed(),
            mixing: Mixing::default(),
        }
    }
}

/// Holds everything needed to render one image.  Once built it is
/// never mutated, and it is shared by reference across the workers.
#[derive(Clone, Debug)]
pub struct Renderer {
    viewport: Viewport,
    spec: SampleSpec,
    options: RenderOptions,
}

type Row<'a> = (u32, &'a mut [Color]);

impl Renderer {
    /// A renderer with the given sampling parameters.
    pub fn new(viewport: Viewport, spec: SampleSpec, options: RenderOptions) -> Self {
        Renderer {
            viewport,
            spec,
            options,
        }
    }

    /// The viewport being rendered.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The per-pixel budget.
    pub fn spec(&self) -> &SampleSpec {
        &self.spec
    }

    /// The options in force.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Samples pixel (x, y) `samples` times and returns the blended,
    /// opaque color.  Every sample is taken; nothing short-circuits.
    pub fn render_pixel(&self, x: u32, y: u32, rng: &mut XorShift64) -> Color {
        let max_iterations = self.spec.max_iterations;
        let mut acc = Accumulator::new(self.options.mixing);
        for _ in 0..self.spec.samples {
            let jx = rng.next_uniform();
            let jy = rng.next_uniform();
            let c = self.viewport.sample_point(x, y, jx, jy);
            acc.add(map_color(iterate(c.re, c.im, max_iterations), max_iterations));
        }
        acc.average()
    }

    /// Renders one complete row into `row`.
    pub fn render_row(&self, y: u32, row: &mut [Color], rng: &mut XorShift64) {
        for (x, cell) in row.iter_mut().enumerate() {
            *cell = self.render_pixel(x as u32, y, rng);
        }
    }

    // Pulls rows until the producer hangs up, returning the number of
    // rows this worker rendered.
    fn work(&self, rows: Receiver<Row<'_>>, mut rng: XorShift64) -> usize {
        let mut rendered = 0;
        for (y, row) in rows.iter() {
            self.render_row(y, row, &mut rng);
            rendered += 1;
        }
        rendered
    }

    /// Renders the whole image into `fb`, blocking until every cell has
    /// been written.  `fb` must match the viewport's dimensions.
    pub fn render(&self, fb: &mut Framebuffer) {
        debug_assert_eq!(fb.width(), self.viewport.width());
        debug_assert_eq!(fb.height(), self.viewport.height());

        let (width, height) = (fb.width(), fb.height());
        let threads = self.options.threads.max(1);
        let seed = self.options.seed;
        let start = Instant::now();
        let rows = fb.rows_mut();

        let result = crossbeam::scope(|spawner| {
            let (sender, receiver) = bounded(threads);
            let handles: Vec<_> = (0..threads)
                .map(|worker| {
                    let rows = receiver.clone();
                    let rng = XorShift64::for_worker(seed, worker);
                    spawner.spawn(move |_| self.work(rows, rng))
                })
                .collect();
            drop(receiver);

            for (y, row) in rows.enumerate() {
                // Only fails once every worker is gone.
                if sender.send((y as u32, row)).is_err() {
                    break;
                }
            }
            drop(sender);

            for (worker, handle) in handles.into_iter().enumerate() {
                match handle.join() {
                    Ok(count) => debug!("worker {} rendered {} rows", worker, count),
                    Err(cause) => panic::resume_unwind(cause),
                }
            }
        });

        if let Err(cause) = result {
            panic::resume_unwind(cause);
        }

        info!(
            "rendered {}x{} ({} samples, {} iterations) on {} threads in {:?}",
            width,
            height,
            self.spec.samples,
            self.spec.max_iterations,
            threads,
            start.elapsed()
        );
    }
}

/// Renders a `width` x `height` image of the window at
/// `(center_x, center_y)` with the given `half_height` into `fb`,
/// using every logical CPU and linear-light blending.  All numeric
/// arguments must be positive.
#[allow(clippy::too_many_arguments)]
pub fn render(
    fb: &mut Framebuffer,
    width: u32,
    height: u32,
    center_x: f64,
    center_y: f64,
    half_height: f64,
    max_iterations: u32,
    samples: u32,
) {
    let viewport = Viewport::new(width, height, center_x, center_y, half_height);
    let spec = SampleSpec::new(max_iterations, samples);
    Renderer::new(viewport, spec, RenderOptions::default()).render(fb);
}
