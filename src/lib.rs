//! Single-corridor maze generation.
//!
//! A maze is carved by a randomized depth-first search from the top-left
//! entrance to the bottom-right exit. A reachability cache lets the search
//! skip moves that can no longer lead to the exit, and every cell entered is
//! walled in on the sides it did not come from, so the result is one winding
//! corridor.

pub mod cache;
pub mod carver;
pub mod config;
pub mod direction;
pub mod error;
pub mod grid;
pub mod render;
pub mod rng;
pub mod seed;
pub mod trace;

use rand::RngCore;
use tracing::{debug, error};

pub use cache::{CacheEntry, ReachCache};
pub use carver::{CarveEvent, CarveObserver, CarveOutcome, CarveStats, Carver, NoObserver};
pub use config::MazeConfig;
pub use direction::{Cell, Direction};
pub use error::{ConfigError, SeedError};
pub use grid::{Grid, Wall};
pub use render::{GlyphStyle, Renderer};
pub use rng::AdditiveRng;
pub use seed::{parse_seed, quote};
pub use trace::FrameWriter;

/// Carves a maze of the configured size with draws from `rng`.
pub fn generate<R: RngCore + ?Sized>(config: &MazeConfig, rng: &mut R) -> Grid {
    generate_observed(config, rng, NoObserver)
}

/// Like `generate`, reporting every carver step to `observer`.
pub fn generate_observed<R, O>(config: &MazeConfig, rng: &mut R, observer: O) -> Grid
where
    R: RngCore + ?Sized,
    O: CarveObserver,
{
    let mut grid = Grid::new(config.width(), config.height());
    let entrance = grid.entrance();

    let mut carver = Carver::new(&mut grid, rng).observe(observer);
    let outcome = carver.carve_from(entrance);
    let stats = carver.stats();
    match outcome {
        CarveOutcome::Reached => debug!(
            width = config.width(),
            height = config.height(),
            advances = stats.advances,
            backtracks = stats.backtracks,
            probes = stats.probes,
            "carved maze"
        ),
        CarveOutcome::Exhausted => error!(
            width = config.width(),
            height = config.height(),
            "no corridor from entrance to exit"
        ),
    }

    grid.open_exit();
    grid
}
