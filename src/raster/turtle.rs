use crate::foundation::config::TurtleConfig;
use crate::foundation::core::{Canvas, Point, Rgb, Vec2};
use crate::raster::framebuffer::Framebuffer;
use crate::raster::line::Line;

/// Pen attributes carried between motion commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pen {
    /// Current position in turtle space (unbounded, y up).
    pub position: Point,
    /// Heading in degrees, 0 = +x, counter-clockwise. Never normalized.
    pub heading: f64,
    /// Multiplier applied to every `forward` distance.
    pub step_scale: f64,
    /// Color written by subsequent draws.
    pub color: Rgb,
    /// When `false`, motion still moves the pen but writes no pixels.
    pub drawing: bool,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            position: Point::ORIGIN,
            heading: 0.0,
            step_scale: 1.0,
            color: Rgb::BLACK,
            drawing: true,
        }
    }
}

/// A turtle drawing into its own framebuffer.
///
/// All operations are infallible: coordinates outside the framebuffer are clipped silently.
#[derive(Clone, Debug)]
pub struct Turtle {
    pen: Pen,
    fb: Framebuffer,
}

impl Default for Turtle {
    fn default() -> Self {
        Self::new(Canvas::default())
    }
}

impl Turtle {
    /// White canvas, pen down at the origin, heading 0, black.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            pen: Pen::default(),
            fb: Framebuffer::new(canvas),
        }
    }

    /// Build a turtle from a (validated) config.
    pub fn from_config(cfg: &TurtleConfig) -> Self {
        Self {
            pen: Pen {
                position: cfg.start,
                heading: cfg.heading,
                step_scale: cfg.step_scale,
                color: cfg.pen_color,
                drawing: true,
            },
            fb: Framebuffer::new(cfg.canvas),
        }
    }

    /// Current pen state.
    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    /// Current position in turtle space.
    pub fn position(&self) -> Point {
        self.pen.position
    }

    /// Current heading in degrees.
    pub fn heading(&self) -> f64 {
        self.pen.heading
    }

    /// Read-only view of the framebuffer for presentation.
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }

    /// Consume the turtle, keeping only its drawing.
    pub fn into_framebuffer(self) -> Framebuffer {
        self.fb
    }

    /// Teleport without drawing.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.pen.position = Point::new(x, y);
    }

    /// Set the absolute heading in degrees.
    pub fn set_heading(&mut self, degrees: f64) {
        self.pen.heading = degrees;
    }

    /// Turn counter-clockwise.
    pub fn left(&mut self, degrees: f64) {
        self.pen.heading += degrees;
    }

    /// Turn clockwise.
    pub fn right(&mut self, degrees: f64) {
        self.pen.heading -= degrees;
    }

    /// Scale all subsequent `forward` distances.
    pub fn set_step_scale(&mut self, factor: f64) {
        self.pen.step_scale = factor;
    }

    /// Stop drawing; motion still moves the pen.
    pub fn pen_up(&mut self) {
        self.pen.drawing = false;
    }

    /// Resume drawing.
    pub fn pen_down(&mut self) {
        self.pen.drawing = true;
    }

    /// Color used by subsequent draws.
    pub fn set_color(&mut self, r: u8, g: u8, b: u8) {
        self.pen.color = Rgb::new(r, g, b);
    }

    /// Move along the heading by `distance * step_scale`, drawing when the pen is down.
    ///
    /// The line is rasterized between rounded endpoints but the unrounded position is kept, so
    /// many short steps do not accumulate rounding drift.
    pub fn forward(&mut self, distance: f64) {
        let from = self.pen.position;
        let dir = Vec2::from_angle(self.pen.heading.to_radians());
        let to = from + dir * (distance * self.pen.step_scale);

        let (x1, y1) = round_point(from);
        let (x2, y2) = round_point(to);
        self.draw_line(x1, y1, x2, y2);

        self.pen.position = to;
    }

    /// Rasterize a line between two turtle-space points with the current color.
    ///
    /// Only the part of the walk that can land on the grid is visited, so arbitrarily long lines
    /// cost at most one step per column or row of the framebuffer.
    pub fn draw_line(&mut self, x1: i64, y1: i64, x2: i64, y2: i64) {
        if !self.pen.drawing {
            return;
        }
        let xs = 0..=i64::from(self.fb.width()) - 1;
        let ys = 0..=i64::from(self.fb.height()) - 1;
        for (x, y) in Line::clipped(x1, y1, x2, y2, xs, ys) {
            self.put_pixel(x, y);
        }
    }

    /// Write one turtle-space pixel; no-op when off-grid or when the pen is up.
    pub fn put_pixel(&mut self, x: i64, y: i64) {
        if !self.pen.drawing {
            return;
        }
        if let Some((col, row)) = self.fb.cell_for(x, y) {
            self.fb.set_pixel(col, row, self.pen.color);
        }
    }

    /// Reset every framebuffer cell to white. Pen state is untouched.
    pub fn clear(&mut self) {
        self.fb.clear();
    }
}

// Round half up, matching `floor(v + 0.5)`; saturates for non-finite input.
fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

fn round_point(p: Point) -> (i64, i64) {
    (round_half_up(p.x), round_half_up(p.y))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/turtle.rs"]
mod tests;
