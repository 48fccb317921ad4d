use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::foundation::config::TurtleConfig;
use crate::foundation::core::Rgb;
use crate::foundation::error::{TurtleError, TurtleResult};
use crate::present::presenter::Movie;
use crate::present::sink::FrameSink;
use crate::raster::framebuffer::Framebuffer;
use crate::raster::turtle::Turtle;

/// Upper bound on commands executed by one program after `repeat` expansion.
pub const MAX_EXPANDED_COMMANDS: u64 = 1_000_000;

/// One turtle instruction.
///
/// JSON shape (externally tagged, snake_case): `{"forward": 10}`, `"pen_up"`,
/// `{"color": [255, 0, 0]}`, `{"repeat": {"times": 4, "body": [...]}}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Forward(f64),
    Left(f64),
    Right(f64),
    Heading(f64),
    Position([f64; 2]),
    StepScale(f64),
    Color(Rgb),
    PenUp,
    PenDown,
    Clear,
    /// Run `body` `times` times.
    Repeat { times: u32, body: Vec<Command> },
}

/// A turtle program: optional initial config plus a command list.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Program {
    #[serde(default)]
    pub config: Option<TurtleConfig>,
    pub commands: Vec<Command>,
}

impl Program {
    /// Parse and validate a program from JSON text.
    pub fn from_json_str(s: &str) -> TurtleResult<Self> {
        let program: Self = serde_json::from_str(s)?;
        program.validate()?;
        Ok(program)
    }

    /// Read, parse and validate a program file.
    #[tracing::instrument]
    pub fn from_json_file(path: &Path) -> TurtleResult<Self> {
        let f = File::open(path).with_context(|| format!("open program '{}'", path.display()))?;
        let program: Self = serde_json::from_reader(BufReader::new(f))?;
        program.validate()?;
        Ok(program)
    }

    /// Reject non-finite numbers, invalid embedded configs and runaway `repeat` nesting.
    pub fn validate(&self) -> TurtleResult<()> {
        if let Some(cfg) = &self.config {
            cfg.validate()?;
        }
        validate_commands(&self.commands)?;
        let n = expanded_len(&self.commands);
        if n > MAX_EXPANDED_COMMANDS {
            return Err(TurtleError::validation(format!(
                "program expands to {n} commands, limit is {MAX_EXPANDED_COMMANDS}"
            )));
        }
        Ok(())
    }

    /// Number of commands executed once every `repeat` is unrolled.
    pub fn expanded_len(&self) -> u64 {
        expanded_len(&self.commands)
    }

    /// Execute on `turtle`. Returns the number of `forward` steps taken.
    #[tracing::instrument(skip_all, fields(commands = self.commands.len()))]
    pub fn run(&self, turtle: &mut Turtle) -> TurtleResult<u64> {
        let mut steps = 0;
        exec(&self.commands, turtle, &mut |_: &Framebuffer| {
            steps += 1;
            Ok(())
        })?;
        Ok(steps)
    }

    /// Execute on `turtle`, capturing the initial framebuffer and one frame after every
    /// `forward` step into `movie`.
    #[tracing::instrument(skip_all, fields(commands = self.commands.len()))]
    pub fn run_recorded<S: FrameSink>(
        &self,
        turtle: &mut Turtle,
        movie: &mut Movie<S>,
    ) -> TurtleResult<u64> {
        movie.capture(turtle.framebuffer())?;
        let mut steps = 0;
        exec(&self.commands, turtle, &mut |fb: &Framebuffer| {
            steps += 1;
            movie.capture(fb)
        })?;
        tracing::debug!(frames = movie.frame_count(), "recorded");
        Ok(steps)
    }
}

fn exec(
    commands: &[Command],
    turtle: &mut Turtle,
    on_step: &mut dyn FnMut(&Framebuffer) -> TurtleResult<()>,
) -> TurtleResult<()> {
    for cmd in commands {
        match cmd {
            Command::Forward(d) => {
                turtle.forward(*d);
                on_step(turtle.framebuffer())?;
            }
            Command::Left(a) => turtle.left(*a),
            Command::Right(a) => turtle.right(*a),
            Command::Heading(a) => turtle.set_heading(*a),
            Command::Position([x, y]) => turtle.set_position(*x, *y),
            Command::StepScale(s) => turtle.set_step_scale(*s),
            Command::Color(c) => turtle.set_color(c.r, c.g, c.b),
            Command::PenUp => turtle.pen_up(),
            Command::PenDown => turtle.pen_down(),
            Command::Clear => turtle.clear(),
            Command::Repeat { times, body } => {
                for _ in 0..*times {
                    exec(body, turtle, on_step)?;
                }
            }
        }
    }
    Ok(())
}

fn validate_commands(commands: &[Command]) -> TurtleResult<()> {
    for cmd in commands {
        let finite = match cmd {
            Command::Forward(v)
            | Command::Left(v)
            | Command::Right(v)
            | Command::Heading(v)
            | Command::StepScale(v) => v.is_finite(),
            Command::Position([x, y]) => x.is_finite() && y.is_finite(),
            Command::Repeat { body, .. } => {
                validate_commands(body)?;
                true
            }
            Command::Color(_) | Command::PenUp | Command::PenDown | Command::Clear => true,
        };
        if !finite {
            return Err(TurtleError::validation(format!(
                "command {cmd:?} has a non-finite argument"
            )));
        }
    }
    Ok(())
}

fn expanded_len(commands: &[Command]) -> u64 {
    commands.iter().fold(0u64, |acc, cmd| {
        let n = match cmd {
            Command::Repeat { times, body } => u64::from(*times).saturating_mul(expanded_len(body)),
            _ => 1,
        };
        acc.saturating_add(n)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/program/script.rs"]
mod tests;
