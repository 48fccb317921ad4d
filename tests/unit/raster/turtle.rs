use super::*;

fn small() -> Turtle {
    Turtle::new(Canvas::new(32, 32).unwrap())
}

fn black_pixels(t: &Turtle) -> Vec<(i64, i64)> {
    let fb = t.framebuffer();
    let mut out = Vec::new();
    for y in 0..i64::from(fb.height()) {
        for x in 0..i64::from(fb.width()) {
            if fb.turtle_pixel(x, y) != Some(Rgb::WHITE) {
                out.push((x, y));
            }
        }
    }
    out
}

#[test]
fn starts_blank_with_default_pen() {
    let t = Turtle::default();
    assert_eq!(t.framebuffer().width(), 300);
    assert_eq!(t.framebuffer().height(), 300);
    assert!(t.framebuffer().pixels().all(|c| c == Rgb::WHITE));
    assert_eq!(*t.pen(), Pen::default());
    assert!(t.pen().drawing);
}

#[test]
fn forward_zero_draws_single_point() {
    let mut t = small();
    t.set_position(4.4, 6.6);
    t.set_heading(30.0);
    t.set_color(10, 20, 30);
    t.forward(0.0);

    assert_eq!(black_pixels(&t), vec![(4, 7)]);
    assert_eq!(t.framebuffer().turtle_pixel(4, 7), Some(Rgb::new(10, 20, 30)));
    assert_eq!(t.heading(), 30.0);
    assert_eq!(t.pen().color, Rgb::new(10, 20, 30));
}

#[test]
fn forward_east_draws_horizontal_run() {
    let mut t = small();
    t.set_position(5.0, 5.0);
    t.forward(10.0);

    let expected: Vec<_> = (5..=15).map(|x| (x, 5)).collect();
    assert_eq!(black_pixels(&t), expected);
    assert_eq!(t.position(), Point::new(15.0, 5.0));
    // y grows upward: turtle y=5 lands on row 32 - 5 - 1.
    assert_eq!(t.framebuffer().pixel(5, 26), Some(Rgb::BLACK));
}

#[test]
fn heading_and_turns_are_not_normalized() {
    let mut t = small();
    t.left(400.0);
    t.right(10.0);
    assert_eq!(t.heading(), 390.0);

    t.set_heading(450.0);
    t.set_position(3.0, 3.0);
    t.forward(4.0);
    let expected: Vec<_> = (3..=7).map(|y| (3, y)).collect();
    assert_eq!(black_pixels(&t), expected);
}

#[test]
fn step_scale_multiplies_distance() {
    let mut t = small();
    t.set_step_scale(3.0);
    t.forward(2.0);
    assert!((t.position().x - 6.0).abs() < 1e-9);
    assert_eq!(black_pixels(&t).len(), 7);
}

#[test]
fn pen_up_moves_without_drawing() {
    let mut t = small();
    t.set_position(2.0, 2.0);
    t.pen_up();
    t.forward(10.0);
    assert_eq!(t.position(), Point::new(12.0, 2.0));
    assert!(black_pixels(&t).is_empty());

    t.put_pixel(1, 1);
    t.draw_line(0, 0, 5, 5);
    assert!(black_pixels(&t).is_empty());

    t.pen_down();
    t.forward(1.0);
    assert_eq!(black_pixels(&t), vec![(12, 2), (13, 2)]);
}

#[test]
fn position_keeps_fractional_part() {
    let mut t = small();
    t.pen_up();
    for _ in 0..10 {
        t.forward(0.4);
    }
    assert!((t.position().x - 4.0).abs() < 1e-9);
}

#[test]
fn out_of_bounds_writes_are_silent() {
    let mut t = small();
    t.put_pixel(-1, 0);
    t.put_pixel(0, 32);
    t.put_pixel(32, 0);
    t.set_position(-100.0, -100.0);
    t.forward(20.0);
    assert!(black_pixels(&t).is_empty());

    // A line crossing the border keeps its visible part.
    t.set_position(-5.0, 0.0);
    t.forward(10.0);
    assert_eq!(black_pixels(&t).len(), 6);
}

#[test]
fn clear_resets_pixels_but_not_pen() {
    let mut t = small();
    t.set_color(1, 1, 1);
    t.forward(5.0);
    t.clear();
    assert!(t.framebuffer().pixels().all(|c| c == Rgb::WHITE));
    assert_eq!(t.position(), Point::new(5.0, 0.0));
    assert_eq!(t.pen().color, Rgb::new(1, 1, 1));
}

#[test]
fn rounding_is_half_up() {
    assert_eq!(round_half_up(2.5), 3);
    assert_eq!(round_half_up(-2.5), -2);
    assert_eq!(round_half_up(-2.6), -3);
    assert_eq!(round_half_up(0.49), 0);
}

#[test]
fn from_config_applies_initial_pen() {
    let cfg = TurtleConfig {
        canvas: Canvas::new(8, 4).unwrap(),
        pen_color: Rgb::new(255, 0, 0),
        step_scale: 2.0,
        start: Point::new(1.0, 1.0),
        heading: 90.0,
    };
    let mut t = Turtle::from_config(&cfg);
    assert_eq!(t.framebuffer().canvas(), cfg.canvas);
    t.forward(1.0);
    assert_eq!(black_pixels(&t), vec![(1, 1), (1, 2), (1, 3)]);
    assert_eq!(t.framebuffer().turtle_pixel(1, 3), Some(Rgb::new(255, 0, 0)));
    assert_eq!(t.into_framebuffer().width(), 8);
}

#[test]
fn huge_forward_clips_and_returns() {
    let mut t = Turtle::new(Canvas::new(10, 10).unwrap());
    t.set_heading(45.0);
    t.forward(1e19);
    assert_eq!(t.framebuffer().turtle_pixel(0, 0), Some(Rgb::BLACK));
    assert!(black_pixels(&t).len() <= 10);

    let mut t = Turtle::new(Canvas::new(10, 10).unwrap());
    t.set_position(2.0, 3.0);
    t.forward(1e19);
    let expected: Vec<_> = (2..10).map(|x| (x, 3)).collect();
    assert_eq!(black_pixels(&t), expected);

    t.clear();
    t.draw_line(i64::MAX, 3, i64::MIN, 3);
    let expected: Vec<_> = (0..10).map(|x| (x, 3)).collect();
    assert_eq!(black_pixels(&t), expected);
}

#[test]
fn put_pixel_with_extreme_coordinates_is_dropped() {
    let mut t = small();
    t.put_pixel(i64::MIN, i64::MIN);
    t.put_pixel(0, i64::MIN);
    t.put_pixel(i64::MAX, i64::MAX);
    t.draw_line(0, i64::MIN, 0, i64::MAX);
    assert_eq!(black_pixels(&t).len(), 32);
}

#[test]
fn zero_sized_canvas_draws_nothing() {
    let mut t = Turtle::new(Canvas {
        width: 0,
        height: 3,
    });
    t.forward(5.0);
    t.set_heading(90.0);
    t.forward(5.0);
    assert!(t.framebuffer().rows().is_empty());
    assert_eq!(t.framebuffer().pixels().count(), 0);
}
