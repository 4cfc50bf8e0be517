// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The output grid.  Allocated once per render, carved into rows, and
//! handed out a row at a time so no two workers ever hold the same
//! cell.

use crate::color::Color;
use std::slice::ChunksMut;

/// A row-major grid of colors.
#[derive(Clone, Debug, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Framebuffer {
    /// A `width` x `height` buffer with every cell set to the
    /// transparent "unwritten" sentinel.
    pub fn new(width: u32, height: u32) -> Self {
        Framebuffer {
            width,
            height,
            pixels: vec![Color::default(); width as usize * height as usize],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The total number of cells.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// True if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// The color at (x, y), if it is inside the buffer.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.offset(x, y)])
    }

    /// Overwrites the color at (x, y).  Out-of-range writes are
    /// ignored.
    pub fn set(&mut self, x: u32, y: u32, c: Color) {
        if x < self.width && y < self.height {
            let offset = self.offset(x, y);
            self.pixels[offset] = c;
        }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Every cell, row after row.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// One row.
    pub fn row(&self, y: u32) -> &[Color] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.pixels[start..start + w]
    }

    /// Splits the buffer into disjoint, mutable rows, top to bottom.
    pub fn rows_mut(&mut self) -> ChunksMut<'_, Color> {
        // chunks_mut panics on a zero chunk size
        let w = (self.width as usize).max(1);
        self.pixels.chunks_mut(w)
    }

    /// True once every cell has been written.
    pub fn is_complete(&self) -> bool {
        self.pixels.iter().all(Color::is_opaque)
    }

    /// The buffer as packed RGBA bytes.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_array().to_vec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffers_are_unwritten() {
        let fb = Framebuffer::new(3, 2);
        assert_eq!(fb.len(), 6);
        assert!(!fb.is_empty());
        assert!(!fb.is_complete());
        assert!(fb.pixels().iter().all(|c| *c == Color::default()));
    }

    #[test]
    fn get_and_set_are_row_major() {
        let mut fb = Framebuffer::new(3, 2);
        fb.set(2, 1, Color::WHITE);
        assert_eq!(fb.pixels()[5], Color::WHITE);
        assert_eq!(fb.get(2, 1), Some(Color::WHITE));
        assert_eq!(fb.get(3, 0), None);
        assert_eq!(fb.get(0, 2), None);
        fb.set(9, 9, Color::WHITE);
        assert_eq!(fb.row(1)[2], Color::WHITE);
    }

    #[test]
    fn rows_are_disjoint_and_cover_the_buffer() {
        let mut fb = Framebuffer::new(4, 3);
        let mut seen = 0;
        for (y, row) in fb.rows_mut().enumerate() {
            assert_eq!(row.len(), 4);
            for c in row.iter_mut() {
                *c = Color::rgb(y as u8, 0, 0);
                seen += 1;
            }
        }
        assert_eq!(seen, 12);
        assert!(fb.is_complete());
        assert_eq!(fb.get(1, 2), Some(Color::rgb(2, 0, 0)));
    }

    #[test]
    fn empty_buffers_have_no_rows() {
        let mut fb = Framebuffer::new(0, 5);
        assert!(fb.is_empty());
        assert_eq!(fb.rows_mut().count(), 0);
    }

    #[test]
    fn packs_rgba() {
        let mut fb = Framebuffer::new(2, 1);
        fb.set(0, 0, Color::rgb(1, 2, 3));
        fb.set(1, 0, Color::rgb(4, 5, 6));
        assert_eq!(fb.to_rgba_bytes(), vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }
}
