use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use turtlekit::{Program, Turtle, TurtleConfig};

#[derive(Parser, Debug)]
#[command(name = "turtle", version)]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a JSON turtle program and write the final drawing as a PNG.
    Run(RunArgs),
    /// Draw a Pythagoras tree as a PNG.
    Tree(TreeArgs),
    /// Load an image and write it back as RGB or gray PNG.
    Grab(GrabArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input program JSON.
    #[arg(long)]
    script: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Also write one PNG per forward step into this directory.
    #[arg(long)]
    movie_dir: Option<PathBuf>,

    /// Config JSON overriding the program's embedded config.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct TreeArgs {
    /// Recursion depth.
    #[arg(long, default_value_t = 8)]
    depth: u32,

    /// Side of the trunk square in pixels.
    #[arg(long, default_value_t = 50.0)]
    size: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Config JSON (canvas size, pen color).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct GrabArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Convert to gray levels first.
    #[arg(long)]
    gray: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Tree(args) => cmd_tree(args),
        Command::Grab(args) => cmd_grab(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Option<TurtleConfig>> {
    path.map(|p| {
        TurtleConfig::from_json_file(p).with_context(|| format!("load config '{}'", p.display()))
    })
    .transpose()
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let program = Program::from_json_file(&args.script)
        .with_context(|| format!("load program '{}'", args.script.display()))?;
    let cfg = load_config(args.config.as_deref())?
        .or_else(|| program.config.clone())
        .unwrap_or_default();

    let mut turtle = Turtle::from_config(&cfg);
    let steps = match &args.movie_dir {
        Some(dir) => {
            let stem = args
                .script
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "movie".to_string());
            let presenter = turtlekit::Presenter::new(dir);
            let mut movie = presenter.view_movie(&stem, cfg.canvas)?;
            let steps = program.run_recorded(&mut turtle, &mut movie)?;
            let sink = movie.finish()?;
            eprintln!("wrote {} frames to {}", sink.written().len(), dir.display());
            steps
        }
        None => program.run(&mut turtle)?,
    };
    tracing::info!(steps, "program finished");

    turtlekit::write_png_rgb8(&args.out, turtle.framebuffer())?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_tree(args: TreeArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?.unwrap_or_default();
    let mut turtle = Turtle::from_config(&cfg);
    let base = turtlekit::centered_base(cfg.canvas.width, cfg.canvas.height, args.size);
    turtlekit::pythagoras_tree(&mut turtle, base, 0.0, args.size, args.depth);

    turtlekit::write_png_rgb8(&args.out, turtle.framebuffer())?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_grab(args: GrabArgs) -> anyhow::Result<()> {
    let frame = if args.gray {
        let gray = turtlekit::ImageGrabber::grab_gray_scale(&args.in_path)?;
        turtlekit::gray_to_framebuffer(&gray)
    } else {
        turtlekit::ImageGrabber::grab_rgb(&args.in_path)?
    };

    turtlekit::write_png_rgb8(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
