// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turning a finished framebuffer into a PNG.

use image::{
    DynamicImage, ImageBuffer, ImageFormat, ImageOutputFormat, ImageResult, Rgba, RgbaImage,
};
use std::io::Cursor;
use std::path::Path;

use crate::framebuffer::Framebuffer;

/// Copies the framebuffer into an `image` buffer.
pub fn to_image(fb: &Framebuffer) -> RgbaImage {
    ImageBuffer::from_fn(fb.width(), fb.height(), |x, y| {
        Rgba(fb.get(x, y).unwrap_or_default().to_array())
    })
}

/// Writes the framebuffer to `path` as a PNG.
pub fn write_png<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> ImageResult<()> {
    to_image(fb).save_with_format(path, ImageFormat::Png)
}

/// Encodes the framebuffer as an in-memory PNG.
pub fn png_bytes(fb: &Framebuffer) -> ImageResult<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(to_image(fb)).write_to(&mut bytes, ImageOutputFormat::Png)?;
    Ok(bytes.into_inner())
}
