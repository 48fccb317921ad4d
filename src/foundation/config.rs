use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Point, Rgb};
use crate::foundation::error::{TurtleError, TurtleResult};

/// Initial turtle and framebuffer settings.
///
/// Every field is optional in JSON; missing fields take the classic defaults
/// (300x300 white canvas, black pen at the origin facing east, step scale 1).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TurtleConfig {
    /// Framebuffer dimensions.
    pub canvas: Canvas,
    /// Initial pen color.
    pub pen_color: Rgb,
    /// Initial step-scale multiplier applied to every `forward` distance.
    pub step_scale: f64,
    /// Initial pen position in turtle space.
    pub start: Point,
    /// Initial heading in degrees (0 = +x, counter-clockwise).
    pub heading: f64,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            pen_color: Rgb::BLACK,
            step_scale: 1.0,
            start: Point::ORIGIN,
            heading: 0.0,
        }
    }
}

impl TurtleConfig {
    /// Reject empty canvases and non-finite numeric settings.
    pub fn validate(&self) -> TurtleResult<()> {
        self.canvas.validate()?;
        if !self.step_scale.is_finite() {
            return Err(TurtleError::validation("step_scale must be finite"));
        }
        if !self.heading.is_finite() {
            return Err(TurtleError::validation("heading must be finite"));
        }
        if !self.start.is_finite() {
            return Err(TurtleError::validation("start position must be finite"));
        }
        Ok(())
    }

    /// Read and validate a JSON config file.
    #[tracing::instrument]
    pub fn from_json_file(path: &Path) -> TurtleResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
