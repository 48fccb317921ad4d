//! turtlekit is a small turtle-graphics teaching toolkit.
//!
//! - [`Turtle`] moves a pen over an unbounded plane and rasterizes its path into a
//!   [`Framebuffer`] with an integer Bresenham walk ([`Line`]).
//! - [`rgb_to_ycbcr`] / [`ycbcr_to_rgb`] convert between RGB and BT.601 YCbCr.
//! - [`ImageGrabber`] decodes image files into RGB or gray grids.
//! - [`Presenter`] writes images and movie frames as PNG files.
//! - [`Program`] is a JSON command language driving a turtle.
//!
//! Drawing never fails: out-of-range coordinates are clipped silently and colorspace results
//! are left unclamped. Only the I/O edges return [`TurtleResult`].
#![forbid(unsafe_code)]

mod assets;
mod color;
mod foundation;
mod present;
mod program;
mod raster;

pub use assets::grab::{GrayGrid, ImageGrabber, decode_rgb};
pub use color::ycbcr::{YCbCr, gray_to_rgb, luma, rgb_to_ycbcr, ycbcr_to_rgb};
pub use foundation::config::TurtleConfig;
pub use foundation::core::{Canvas, FrameIndex, Point, Rgb, Vec2, clamp_channel};
pub use foundation::error::{TurtleError, TurtleResult};
pub use present::presenter::{Movie, Presenter, gray_to_framebuffer};
pub use present::sink::{
    FrameSink, InMemorySink, PngSequenceSink, SinkConfig, ensure_parent_dir, write_png_rgb8,
};
pub use program::script::{Command, MAX_EXPANDED_COMMANDS, Program};
pub use program::tree::{centered_base, pythagoras_tree};
pub use raster::framebuffer::Framebuffer;
pub use raster::line::Line;
pub use raster::turtle::{Pen, Turtle};
