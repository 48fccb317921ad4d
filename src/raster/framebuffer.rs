use crate::foundation::core::{Canvas, Rgb};
use crate::foundation::error::{TurtleError, TurtleResult};

/// Fixed-size grid of RGB pixels, row-major, tightly packed (3 bytes per pixel).
///
/// Two coordinate spaces meet here:
///
/// - **cell space**: `(col, row)` with row 0 at the top, as stored;
/// - **turtle space**: `(x, y)` with y growing upward; see [`Framebuffer::cell_for`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    canvas: Canvas,
    data: Vec<u8>,
}

impl Framebuffer {
    /// Allocate a framebuffer cleared to white.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            data: vec![255; canvas.pixel_count() * 3],
        }
    }

    /// Wrap packed RGB8 bytes, checking the length against the dimensions.
    pub fn from_rgb8(canvas: Canvas, data: Vec<u8>) -> TurtleResult<Self> {
        canvas.validate()?;
        if data.len() != canvas.pixel_count() * 3 {
            return Err(TurtleError::validation(format!(
                "rgb8 buffer has {} bytes, expected {} for {}x{}",
                data.len(),
                canvas.pixel_count() * 3,
                canvas.width,
                canvas.height
            )));
        }
        Ok(Self { canvas, data })
    }

    /// Grid dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Reset every cell to white.
    pub fn clear(&mut self) {
        self.fill(Rgb::WHITE);
    }

    /// Overwrite every cell with `color`.
    pub fn fill(&mut self, color: Rgb) {
        for px in self.data.chunks_exact_mut(3) {
            px.copy_from_slice(&color.to_array());
        }
    }

    /// Read a cell in cell space, `None` when out of bounds.
    pub fn pixel(&self, col: u32, row: u32) -> Option<Rgb> {
        let i = self.index(col, row)?;
        Some(Rgb::new(self.data[i], self.data[i + 1], self.data[i + 2]))
    }

    /// Write a cell in cell space; out-of-bounds writes are dropped.
    pub fn set_pixel(&mut self, col: u32, row: u32, color: Rgb) {
        if let Some(i) = self.index(col, row) {
            self.data[i..i + 3].copy_from_slice(&color.to_array());
        }
    }

    /// Map a turtle-space point to its `(col, row)` cell.
    ///
    /// `row = height - y - 1`, `col = x`. Returns `None` when the point lies outside the grid.
    pub fn cell_for(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        let height = i64::from(self.canvas.height);
        if y < 0 || y >= height || x < 0 || x >= i64::from(self.canvas.width) {
            return None;
        }
        Some((x as u32, (height - y - 1) as u32))
    }

    /// Read a pixel addressed in turtle space.
    pub fn turtle_pixel(&self, x: i64, y: i64) -> Option<Rgb> {
        let (col, row) = self.cell_for(x, y)?;
        self.pixel(col, row)
    }

    /// Packed RGB8 bytes, row-major.
    pub fn as_rgb8(&self) -> &[u8] {
        &self.data
    }

    /// Consume the framebuffer, returning its packed RGB8 bytes.
    pub fn into_rgb8(self) -> Vec<u8> {
        self.data
    }

    /// Snapshot as a grid of rows (row 0 at the top). Empty for a zero-width grid.
    pub fn rows(&self) -> Vec<Vec<Rgb>> {
        if self.canvas.width == 0 {
            return Vec::new();
        }
        self.data
            .chunks_exact(self.canvas.width as usize * 3)
            .map(|row| {
                row.chunks_exact(3)
                    .map(|px| Rgb::new(px[0], px[1], px[2]))
                    .collect()
            })
            .collect()
    }

    /// Iterate over every pixel in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.data
            .chunks_exact(3)
            .map(|px| Rgb::new(px[0], px[1], px[2]))
    }

    fn index(&self, col: u32, row: u32) -> Option<usize> {
        if col >= self.canvas.width || row >= self.canvas.height {
            return None;
        }
        Some((row as usize * self.canvas.width as usize + col as usize) * 3)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/framebuffer.rs"]
mod tests;
