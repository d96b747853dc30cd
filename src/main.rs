use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::tty::IsTty;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use maze::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use maze::{generate, generate_observed, parse_seed, AdditiveRng, FrameWriter, GlyphStyle};
use maze::{MazeConfig, Renderer};

/// Prints a random single-corridor maze.
#[derive(Parser, Debug)]
#[command(name = "maze")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Seed for the generator: decimal, 0x-prefixed hex or 0-prefixed octal.
    /// Defaults to the current time.
    #[arg(allow_hyphen_values = true)]
    seed: Option<OsString>,

    /// Cells per row
    #[arg(long, env = "MAZE_WIDTH", default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Cells per column
    #[arg(long, env = "MAZE_HEIGHT", default_value_t = DEFAULT_HEIGHT)]
    height: usize,

    /// Wall glyphs: rounded, square or ascii
    #[arg(long, env = "MAZE_STYLE", default_value_t = GlyphStyle::Rounded)]
    style: GlyphStyle,

    /// Write every carving step to stderr
    #[arg(long)]
    trace: bool,

    /// Pause between trace frames
    #[arg(long, env = "MAZE_TRACE_DELAY_MS", default_value_t = 0)]
    trace_delay_ms: u64,

    /// Log filter
    #[arg(long, env = "MAZE_LOG", default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match init_logging(&cli.log_level).and_then(|()| run(&cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(directives: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directives)
        .with_context(|| format!("invalid log filter {directives:?}"))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let seed = match &cli.seed {
        Some(arg) => parse_seed(arg.as_encoded_bytes())?,
        None => clock_seed(),
    };
    let config = MazeConfig::new(cli.width, cli.height)?.with_style(cli.style);
    info!(seed, width = config.width(), height = config.height(), "generating maze");

    let mut rng = AdditiveRng::new(seed);
    let renderer = Renderer::new(config.style());
    let grid = if cli.trace {
        let stderr = io::stderr();
        let animate = stderr.is_tty();
        let mut frames = FrameWriter::new(stderr.lock(), Renderer::new(config.style()))
            .animate(animate)
            .delay(Duration::from_millis(cli.trace_delay_ms));
        let grid = generate_observed(&config, &mut rng, &mut frames);
        debug!(frames = frames.frames(), "trace written");
        frames.finish().context("failed to write trace")?;
        grid
    } else {
        generate(&config, &mut rng)
    };

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(renderer.render(&grid).as_bytes())
        .and_then(|()| stdout.flush())
        .context("failed to write maze")?;
    Ok(())
}

/// Current Unix time, truncated to 32 bits.
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as u32)
        .unwrap_or(0)
}
