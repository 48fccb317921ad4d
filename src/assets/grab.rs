use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::color::ycbcr::luma;
use crate::foundation::core::Canvas;
use crate::foundation::error::{TurtleError, TurtleResult};
use crate::raster::framebuffer::Framebuffer;

/// Grid of 8-bit gray levels, row-major, row 0 at the top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayGrid {
    canvas: Canvas,
    data: Vec<u8>,
}

impl GrayGrid {
    /// Wrap gray levels, checking the length against the dimensions.
    pub fn new(canvas: Canvas, data: Vec<u8>) -> TurtleResult<Self> {
        canvas.validate()?;
        if data.len() != canvas.pixel_count() {
            return Err(TurtleError::validation(format!(
                "gray buffer has {} bytes, expected {}",
                data.len(),
                canvas.pixel_count()
            )));
        }
        Ok(Self { canvas, data })
    }

    /// Gray level of every pixel: luminance scaled by 256, truncated.
    pub fn from_framebuffer(fb: &Framebuffer) -> Self {
        Self {
            canvas: fb.canvas(),
            data: fb.pixels().map(luma).collect(),
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Gray level at `(col, row)`, `None` when out of bounds.
    pub fn get(&self, col: u32, row: u32) -> Option<u8> {
        if col >= self.canvas.width || row >= self.canvas.height {
            return None;
        }
        Some(self.data[row as usize * self.canvas.width as usize + col as usize])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Snapshot as a grid of rows. Empty for a zero-width grid.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        if self.canvas.width == 0 {
            return Vec::new();
        }
        self.data
            .chunks_exact(self.canvas.width as usize)
            .map(<[u8]>::to_vec)
            .collect()
    }
}

/// Loads images from disk as RGB or gray pixel grids.
pub struct ImageGrabber;

impl ImageGrabber {
    /// Read an image file and return its RGB pixels. Alpha is dropped.
    #[tracing::instrument]
    pub fn grab_rgb(path: &Path) -> TurtleResult<Framebuffer> {
        let bytes = read_image_file(path)?;
        decode_rgb(&bytes)
    }

    /// Read an image file and return the gray level of each pixel.
    #[tracing::instrument]
    pub fn grab_gray_scale(path: &Path) -> TurtleResult<GrayGrid> {
        let fb = Self::grab_rgb(path)?;
        Ok(GrayGrid::from_framebuffer(&fb))
    }
}

/// Decode encoded image bytes (PNG, JPEG, ...) into an RGB framebuffer.
pub fn decode_rgb(bytes: &[u8]) -> TurtleResult<Framebuffer> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgb = dyn_img.to_rgb8();
    let (width, height) = rgb.dimensions();
    Framebuffer::from_rgb8(Canvas::new(width, height)?, rgb.into_raw())
}

fn read_image_file(path: &Path) -> TurtleResult<Vec<u8>> {
    if !path.exists() {
        return Err(TurtleError::not_found(
            absolute_display(path).display().to_string(),
        ));
    }
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    tracing::debug!(bytes = bytes.len(), "image file read");
    Ok(bytes)
}

// Relative paths are reported against the working directory.
fn absolute_display(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/grab.rs"]
mod tests;
