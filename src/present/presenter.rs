use std::path::PathBuf;

use crate::assets::grab::GrayGrid;
use crate::color::ycbcr::gray_to_rgb;
use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::TurtleResult;
use crate::present::sink::{FrameSink, PngSequenceSink, SinkConfig, write_png_rgb8};
use crate::raster::framebuffer::Framebuffer;

/// Shows images and movies by writing them as PNG files under one output directory.
///
/// Titles become file names: `image_<slug>.png` for still images and
/// `movie_<slug>_<nnnnn>.png` for movie frames.
#[derive(Clone, Debug)]
pub struct Presenter {
    out_dir: PathBuf,
}

impl Presenter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &std::path::Path {
        &self.out_dir
    }

    /// Write an RGB image and return the file path.
    #[tracing::instrument(skip(self, image), fields(w = image.width(), h = image.height()))]
    pub fn view_image(&self, title: &str, image: &Framebuffer) -> TurtleResult<PathBuf> {
        let path = self.out_dir.join(format!("image_{}.png", slug(title)));
        write_png_rgb8(&path, image)?;
        tracing::info!(path = %path.display(), "image written");
        Ok(path)
    }

    /// Write a gray image, mapping each level through the inverse YCbCr transform.
    pub fn view_gray(&self, title: &str, gray: &GrayGrid) -> TurtleResult<PathBuf> {
        self.view_image(title, &gray_to_framebuffer(gray))
    }

    /// Start a movie whose frames are written as a numbered PNG sequence.
    pub fn view_movie(&self, title: &str, canvas: Canvas) -> TurtleResult<Movie<PngSequenceSink>> {
        let sink = PngSequenceSink::new(&self.out_dir, format!("movie_{}", slug(title)));
        Movie::start(title, canvas, sink)
    }
}

/// Expand a gray grid into an RGB framebuffer.
pub fn gray_to_framebuffer(gray: &GrayGrid) -> Framebuffer {
    let mut fb = Framebuffer::new(gray.canvas());
    for row in 0..gray.height() {
        for col in 0..gray.width() {
            if let Some(level) = gray.get(col, row) {
                fb.set_pixel(col, row, gray_to_rgb(level));
            }
        }
    }
    fb
}

/// An open movie: every [`Movie::capture`] appends the current framebuffer as the next frame.
pub struct Movie<S: FrameSink> {
    sink: S,
    canvas: Canvas,
    next: FrameIndex,
}

impl<S: FrameSink> Movie<S> {
    /// Begin `sink` for frames of size `canvas`.
    pub fn start(title: &str, canvas: Canvas, mut sink: S) -> TurtleResult<Self> {
        sink.begin(SinkConfig {
            title: title.to_string(),
            canvas,
        })?;
        Ok(Self {
            sink,
            canvas,
            next: FrameIndex(0),
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Number of frames captured so far.
    pub fn frame_count(&self) -> u64 {
        self.next.0
    }

    /// Append a snapshot of `frame`.
    pub fn capture(&mut self, frame: &Framebuffer) -> TurtleResult<()> {
        self.sink.push_frame(self.next, frame)?;
        self.next = FrameIndex(self.next.0 + 1);
        Ok(())
    }

    /// Append a gray frame, expanded to RGB the same way as [`Presenter::view_gray`].
    pub fn capture_gray(&mut self, frame: &GrayGrid) -> TurtleResult<()> {
        self.capture(&gray_to_framebuffer(frame))
    }

    /// End the sink and hand it back.
    pub fn finish(mut self) -> TurtleResult<S> {
        self.sink.end()?;
        Ok(self.sink)
    }
}

fn slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for ch in title.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    let out = out.trim_matches('-');
    if out.is_empty() {
        "untitled".to_string()
    } else {
        out.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/presenter.rs"]
mod tests;
