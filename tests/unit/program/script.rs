use super::*;
use crate::foundation::core::{Canvas, Point};
use crate::present::sink::InMemorySink;

const SQUARE: &str = r#"
{
  "config": { "canvas": { "width": 20, "height": 20 }, "start": { "x": 2.0, "y": 2.0 } },
  "commands": [
    { "color": [255, 0, 0] },
    { "repeat": { "times": 4, "body": [ { "forward": 5 }, { "left": 90 } ] } },
    "pen_up",
    { "position": [15, 15] },
    { "forward": 1 }
  ]
}
"#;

#[test]
fn parses_commands_and_config() {
    let p = Program::from_json_str(SQUARE).unwrap();
    let cfg = p.config.clone().unwrap();
    assert_eq!(cfg.canvas, Canvas::new(20, 20).unwrap());
    assert_eq!(cfg.start, Point::new(2.0, 2.0));
    assert_eq!(p.commands[2], Command::PenUp);
    assert_eq!(p.commands[0], Command::Color(Rgb::new(255, 0, 0)));
    assert_eq!(p.expanded_len(), 12);
}

#[test]
fn run_draws_square_outline() {
    let p = Program::from_json_str(SQUARE).unwrap();
    let mut t = Turtle::from_config(p.config.as_ref().unwrap());
    let steps = p.run(&mut t).unwrap();
    assert_eq!(steps, 5);

    let fb = t.framebuffer();
    let red = fb.pixels().filter(|c| *c == Rgb::new(255, 0, 0)).count();
    assert_eq!(red, 20);
    assert_eq!(fb.turtle_pixel(2, 2), Some(Rgb::new(255, 0, 0)));
    assert_eq!(fb.turtle_pixel(7, 7), Some(Rgb::new(255, 0, 0)));
    assert_eq!(fb.turtle_pixel(4, 4), Some(Rgb::WHITE));
    // Pen was up for the last move.
    assert_eq!(fb.turtle_pixel(15, 15), Some(Rgb::WHITE));
    assert_eq!(t.position(), Point::new(16.0, 15.0));
}

#[test]
fn recorded_run_captures_initial_and_each_step() {
    let p = Program::from_json_str(SQUARE).unwrap();
    let cfg = p.config.clone().unwrap();
    let mut t = Turtle::from_config(&cfg);
    let mut movie = Movie::start("square", cfg.canvas, InMemorySink::new()).unwrap();

    let steps = p.run_recorded(&mut t, &mut movie).unwrap();
    assert_eq!(steps, 5);
    assert_eq!(movie.frame_count(), 6);

    let sink = movie.finish().unwrap();
    let frames = sink.frames();
    assert!(frames[0].1.pixels().all(|c| c == Rgb::WHITE));
    assert_eq!(&frames[5].1, t.framebuffer());
}

#[test]
fn unknown_commands_are_rejected() {
    assert!(matches!(
        Program::from_json_str(r#"{ "commands": [ { "jump": 3 } ] }"#),
        Err(TurtleError::Serde(_))
    ));
    assert!(Program::from_json_str(r#"{ "commands": [ { "color": [256, 0, 0] } ] }"#).is_err());
    assert!(Program::from_json_str(r#"{ "commands": [], "extra": 1 }"#).is_err());
}

#[test]
fn validation_catches_bad_values() {
    let p = Program {
        config: None,
        commands: vec![Command::Forward(f64::INFINITY)],
    };
    assert!(matches!(p.validate(), Err(TurtleError::Validation(_))));

    let nested = Program {
        config: None,
        commands: vec![Command::Repeat {
            times: 2,
            body: vec![Command::Position([0.0, f64::NAN])],
        }],
    };
    assert!(nested.validate().is_err());

    let runaway = Program {
        config: None,
        commands: vec![Command::Repeat {
            times: 10_000,
            body: vec![Command::Repeat {
                times: 10_000,
                body: vec![Command::Forward(1.0)],
            }],
        }],
    };
    assert_eq!(runaway.expanded_len(), 100_000_000);
    assert!(runaway.validate().is_err());
}

#[test]
fn clear_and_step_scale_commands_apply() {
    let p = Program::from_json_str(
        r#"{ "commands": [ { "forward": 3 }, "clear", { "step_scale": 2 }, { "heading": 90 }, { "forward": 1 } ] }"#,
    )
    .unwrap();
    let mut t = Turtle::new(Canvas::new(10, 10).unwrap());
    p.run(&mut t).unwrap();
    let drawn = t.framebuffer().pixels().filter(|c| *c != Rgb::WHITE).count();
    assert_eq!(drawn, 3);
    assert_eq!(t.framebuffer().turtle_pixel(3, 2), Some(Rgb::BLACK));
}

#[test]
fn huge_finite_distances_run_to_completion() {
    let p = Program::from_json_str(r#"{ "commands": [ { "heading": 45 }, { "forward": 1e19 } ] }"#)
        .unwrap();
    let mut t = Turtle::new(Canvas::new(10, 10).unwrap());
    assert_eq!(p.run(&mut t).unwrap(), 1);
    assert_eq!(t.framebuffer().turtle_pixel(0, 0), Some(Rgb::BLACK));
}
