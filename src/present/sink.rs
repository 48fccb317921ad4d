use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::{TurtleError, TurtleResult};
use crate::raster::framebuffer::Framebuffer;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Movie title, used by sinks that name their output.
    pub title: String,
    /// Frame dimensions; every pushed frame must match.
    pub canvas: Canvas,
}

/// Sink contract for consuming movie frames.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order between
/// one `begin` and one `end`.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> TurtleResult<()>;
    /// Push one frame in strictly increasing order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &Framebuffer) -> TurtleResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> TurtleResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, Framebuffer)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, Framebuffer)] {
        &self.frames
    }

    /// `true` once `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> TurtleResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Framebuffer) -> TurtleResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> TurtleResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes every frame as `<dir>/<stem>_<nnnnn>.png`.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    stem: String,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Create a sink writing into `dir` with file names starting with `stem`.
    pub fn new(dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            stem: stem.into(),
            cfg: None,
            last_idx: None,
            written: Vec::new(),
        }
    }

    /// Paths of the frames written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("{}_{:05}.png", self.stem, idx.0))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> TurtleResult<()> {
        cfg.canvas.validate()?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create movie dir '{}'", self.dir.display()))?;
        tracing::debug!(dir = %self.dir.display(), title = %cfg.title, "movie started");
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Framebuffer) -> TurtleResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| TurtleError::presentation("png sink not started"))?;
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(TurtleError::presentation(
                "png sink received out-of-order frame index",
            ));
        }
        if frame.canvas() != cfg.canvas {
            return Err(TurtleError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                cfg.canvas.width,
                cfg.canvas.height
            )));
        }
        self.last_idx = Some(idx);

        let path = self.frame_path(idx);
        write_png_rgb8(&path, frame)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> TurtleResult<()> {
        let cfg = self
            .cfg
            .take()
            .ok_or_else(|| TurtleError::presentation("png sink not started"))?;
        tracing::debug!(title = %cfg.title, frames = self.written.len(), "movie finished");
        Ok(())
    }
}

/// Encode a framebuffer as an RGB8 PNG file, creating parent directories as needed.
pub fn write_png_rgb8(path: &Path, frame: &Framebuffer) -> TurtleResult<()> {
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        frame.as_rgb8(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> TurtleResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/present/sink.rs"]
mod tests;
