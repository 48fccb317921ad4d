use std::f64::consts::SQRT_2;

use crate::foundation::core::{Point, Vec2};
use crate::raster::turtle::Turtle;

/// Draw a Pythagoras tree with the turtle's current pen.
///
/// The square of side `size` sits on the left of the base segment that starts at `base` and
/// points along `heading` (degrees). Each level adds two squares scaled by `1/sqrt(2)` on the
/// legs of a right isosceles triangle standing on the square's top edge. Branches stop at
/// `depth` levels or once a side drops below one pixel.
pub fn pythagoras_tree(turtle: &mut Turtle, base: Point, heading: f64, size: f64, depth: u32) {
    if depth == 0 || size < 1.0 {
        return;
    }

    turtle.set_position(base.x, base.y);
    turtle.set_heading(heading);
    for _ in 0..4 {
        turtle.forward(size);
        turtle.left(90.0);
    }

    let top_left = base + Vec2::from_angle((heading + 90.0).to_radians()) * size;
    let child = size / SQRT_2;
    let apex = top_left + Vec2::from_angle((heading + 45.0).to_radians()) * child;

    pythagoras_tree(turtle, top_left, heading + 45.0, child, depth - 1);
    pythagoras_tree(turtle, apex, heading - 45.0, child, depth - 1);
}

/// Base point that roughly centers a tree with trunk `size` on a `width` x `height` canvas.
pub fn centered_base(width: u32, height: u32, size: f64) -> Point {
    Point::new(
        (f64::from(width) - size) / 2.0,
        f64::from(height) / 20.0,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/program/tree.rs"]
mod tests;
