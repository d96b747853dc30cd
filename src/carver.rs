//! Randomized depth-first carving of the corridor from entrance to exit.
//!
//! The search keeps an explicit stack of choice points instead of recursing,
//! so the grid size is not bounded by the call stack. Each choice point owns
//! the candidate moves it has not tried yet and the saved state of the walls
//! its pending tentative carve touched.

use rand::RngCore;
use tracing::trace;

use crate::cache::{CacheEntry, ReachCache};
use crate::direction::{Cell, Direction};
use crate::grid::{Grid, Wall};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarveEvent {
    /// The corridor grew into the cell.
    Advance(Cell),
    /// Every move out of the cell failed and it was abandoned.
    Backtrack(Cell),
}

/// Receives carving progress with read access to the current state.
pub trait CarveObserver {
    fn on_event(&mut self, event: CarveEvent, grid: &Grid, cache: &ReachCache);
}

impl<T: CarveObserver + ?Sized> CarveObserver for &mut T {
    fn on_event(&mut self, event: CarveEvent, grid: &Grid, cache: &ReachCache) {
        (**self).on_event(event, grid, cache)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoObserver;

impl CarveObserver for NoObserver {
    fn on_event(&mut self, _event: CarveEvent, _grid: &Grid, _cache: &ReachCache) {}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarveStats {
    pub advances: usize,
    pub backtracks: usize,
    pub probes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarveOutcome {
    Reached,
    /// The start cell ran out of moves. Cannot happen on a fresh grid.
    Exhausted,
}

type Undo = [(Wall, bool); 4];

struct Frame {
    cell: Cell,
    candidates: Vec<(Direction, Cell)>,
    pending: Option<Undo>,
}

enum Entered {
    Reached,
    Blocked,
    Frame(Frame),
}

pub struct Carver<'a, R: RngCore + ?Sized, O: CarveObserver = NoObserver> {
    grid: &'a mut Grid,
    cache: ReachCache,
    rng: &'a mut R,
    observer: O,
    stats: CarveStats,
}

impl<'a, R: RngCore + ?Sized> Carver<'a, R> {
    pub fn new(grid: &'a mut Grid, rng: &'a mut R) -> Self {
        let cache = ReachCache::new(grid.width(), grid.height(), grid.exit());
        Self::with_cache(grid, cache, rng)
    }

    /// Carver starting from existing cache state, which must describe `grid`.
    pub fn with_cache(grid: &'a mut Grid, cache: ReachCache, rng: &'a mut R) -> Self {
        debug_assert_eq!(
            (cache.width(), cache.height()),
            (grid.width(), grid.height())
        );
        Self {
            grid,
            cache,
            rng,
            observer: NoObserver,
            stats: CarveStats::default(),
        }
    }
}

impl<'a, R: RngCore + ?Sized, O: CarveObserver> Carver<'a, R, O> {
    pub fn observe<P: CarveObserver>(self, observer: P) -> Carver<'a, R, P> {
        Carver {
            grid: self.grid,
            cache: self.cache,
            rng: self.rng,
            observer,
            stats: self.stats,
        }
    }

    pub fn cache(&self) -> &ReachCache {
        &self.cache
    }

    pub fn stats(&self) -> CarveStats {
        self.stats
    }

    /// Carves a corridor from `start` to a `Target` cell.
    ///
    /// On success the walls of the corridor stay in place and all of its
    /// cells are marked `Target`.
    pub fn carve_from(&mut self, start: Cell) -> CarveOutcome {
        let mut stack = match self.enter(start) {
            Entered::Reached => return CarveOutcome::Reached,
            Entered::Blocked => return CarveOutcome::Exhausted,
            Entered::Frame(frame) => vec![frame],
        };

        while let Some(frame) = stack.last_mut() {
            let cell = frame.cell;
            let Some((dir, next)) = self.draw(&mut frame.candidates) else {
                stack.pop();
                self.abandon(cell);
                if let Some(undo) = stack.last_mut().and_then(|parent| parent.pending.take()) {
                    self.rollback(undo);
                }
                continue;
            };

            self.stats.probes += 1;
            if self.cache.probe(next) == CacheEntry::NoPath {
                continue;
            }

            let undo = self.carve(cell, dir, next);
            match self.enter(next) {
                Entered::Reached => {
                    for frame in &stack {
                        self.cache.set(frame.cell, CacheEntry::Target);
                    }
                    return CarveOutcome::Reached;
                }
                Entered::Blocked => self.rollback(undo),
                Entered::Frame(child) => {
                    frame.pending = Some(undo);
                    stack.push(child);
                }
            }
        }

        CarveOutcome::Exhausted
    }

    fn enter(&mut self, cell: Cell) -> Entered {
        match self.cache.get(cell) {
            CacheEntry::Target => return Entered::Reached,
            CacheEntry::Visited => return Entered::Blocked,
            _ => {}
        }

        // A route cached through here is about to change direction.
        self.cache.invalidate_path(cell);
        self.cache.set(cell, CacheEntry::Visited);

        let candidates = cell
            .neighbors(self.grid.width(), self.grid.height())
            .filter(|(dir, _)| self.grid.wall(Wall::between(cell, *dir)))
            .collect();

        self.stats.advances += 1;
        trace!(%cell, "advance");
        self.observer
            .on_event(CarveEvent::Advance(cell), self.grid, &self.cache);

        Entered::Frame(Frame {
            cell,
            candidates,
            pending: None,
        })
    }

    /// Removes a uniformly drawn candidate, keeping the others in order.
    fn draw(&mut self, candidates: &mut Vec<(Direction, Cell)>) -> Option<(Direction, Cell)> {
        if candidates.is_empty() {
            return None;
        }
        let idx = self.rng.next_u32() as usize % candidates.len();
        Some(candidates.remove(idx))
    }

    /// Opens the wall into `next` and walls in its other three sides.
    fn carve(&mut self, cell: Cell, dir: Direction, next: Cell) -> Undo {
        let [side_a, side_b] = dir.perpendicular();
        let entry = Wall::between(cell, dir);
        let touched = [
            entry,
            Wall::between(next, dir),
            Wall::between(next, side_a),
            Wall::between(next, side_b),
        ];
        let undo = touched.map(|wall| (wall, self.grid.wall(wall)));

        self.grid.set_wall(entry, false);
        for wall in &touched[1..] {
            self.grid.set_wall(*wall, true);
        }
        undo
    }

    fn rollback(&mut self, undo: Undo) {
        for (wall, present) in undo {
            self.grid.set_wall(wall, present);
        }
    }

    fn abandon(&mut self, cell: Cell) {
        self.cache.set(cell, CacheEntry::Unset);
        // Regions cut off by this cell may reach the target again.
        self.cache.invalidate_nopath(cell);

        self.stats.backtracks += 1;
        trace!(%cell, "backtrack");
        self.observer
            .on_event(CarveEvent::Backtrack(cell), self.grid, &self.cache);
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<CarveEvent>,
    }

    impl CarveObserver for Recorder {
        fn on_event(&mut self, event: CarveEvent, _grid: &Grid, cache: &ReachCache) {
            assert!(cache.cells().all(|(_, e)| e != CacheEntry::BfsVisited));
            self.events.push(event);
        }
    }

    #[test]
    fn single_cell_grid_is_already_reached() {
        let mut grid = Grid::new(1, 1);
        let mut rng = StepRng::new(0, 0);
        let mut carver = Carver::new(&mut grid, &mut rng);
        assert_eq!(carver.carve_from(Cell::new(0, 0)), CarveOutcome::Reached);
        assert_eq!(carver.stats(), CarveStats::default());
    }

    #[test]
    fn corridor_walls_in_each_entered_cell() {
        let mut grid = Grid::new(2, 1);
        let mut rng = StepRng::new(0, 0);
        let mut carver = Carver::new(&mut grid, &mut rng);
        assert_eq!(carver.carve_from(Cell::new(0, 0)), CarveOutcome::Reached);
        assert_eq!(carver.cache().get(Cell::new(0, 0)), CacheEntry::Target);
        assert_eq!(
            carver.stats(),
            CarveStats {
                advances: 1,
                backtracks: 0,
                probes: 1,
            }
        );
        assert!(!grid.vert(0, 1));
        assert!(grid.vert(0, 2));
        assert!(grid.horiz(0, 1) && grid.horiz(1, 1));
    }

    #[test]
    fn stale_route_forces_backtrack_and_rollback() {
        // 3x2 grid, (1,1) pinned as part of the corridor and (0,1) wrongly
        // believed to reach the target through it.
        let mut grid = Grid::new(3, 2);
        let mut cache = ReachCache::new(3, 2, Cell::new(2, 1));
        cache.set(Cell::new(1, 1), CacheEntry::Visited);
        cache.set(Cell::new(0, 1), CacheEntry::Path(Direction::Right));

        // Always draws the first remaining candidate.
        let mut rng = StepRng::new(0, 0);
        let mut recorder = Recorder::default();
        let mut carver = Carver::with_cache(&mut grid, cache, &mut rng).observe(&mut recorder);

        assert_eq!(carver.carve_from(Cell::new(0, 0)), CarveOutcome::Reached);
        assert_eq!(
            carver.stats(),
            CarveStats {
                advances: 4,
                backtracks: 1,
                probes: 6,
            }
        );

        let cache = carver.cache().clone();
        assert_eq!(cache.get(Cell::new(0, 1)), CacheEntry::Unset);
        assert_eq!(cache.get(Cell::new(1, 1)), CacheEntry::Visited);
        for x in 0..3 {
            assert_eq!(cache.get(Cell::new(x, 0)), CacheEntry::Target);
        }

        assert_eq!(
            recorder.events,
            vec![
                CarveEvent::Advance(Cell::new(0, 0)),
                CarveEvent::Advance(Cell::new(0, 1)),
                CarveEvent::Backtrack(Cell::new(0, 1)),
                CarveEvent::Advance(Cell::new(1, 0)),
                CarveEvent::Advance(Cell::new(2, 0)),
            ]
        );

        // The abandoned carve into (0,1) was undone.
        assert!(grid.horiz(1, 0));
        assert!(!grid.vert(1, 1));
        // Corridor (0,0) -> (1,0) -> (2,0) -> (2,1).
        assert!(!grid.vert(0, 1));
        assert!(!grid.vert(0, 2));
        assert!(!grid.horiz(1, 2));
        assert!(grid.horiz(1, 1));
        assert!(grid.vert(1, 2));
    }

    #[test]
    fn events_trace_the_final_corridor() {
        let mut grid = Grid::new(9, 6);
        let mut rng = StdRng::seed_from_u64(7);
        let mut recorder = Recorder::default();
        let mut carver = Carver::new(&mut grid, &mut rng).observe(&mut recorder);
        let start = Cell::new(0, 0);
        assert_eq!(carver.carve_from(start), CarveOutcome::Reached);
        let stats = carver.stats();

        let advances = recorder
            .events
            .iter()
            .filter(|e| matches!(e, CarveEvent::Advance(_)))
            .count();
        assert_eq!(advances, stats.advances);
        assert_eq!(recorder.events[0], CarveEvent::Advance(start));

        // Replaying the events as stack pushes and pops leaves the corridor.
        let mut corridor = Vec::new();
        for event in &recorder.events {
            match event {
                CarveEvent::Advance(cell) => corridor.push(*cell),
                CarveEvent::Backtrack(cell) => assert_eq!(corridor.pop(), Some(*cell)),
            }
        }
        for pair in corridor.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let dir = Direction::ALL
                .into_iter()
                .find(|d| a.step(*d, 9, 6) == Some(b))
                .expect("corridor cells are adjacent");
            assert!(grid.is_open(a, dir));
        }
        let last = *corridor.last().unwrap();
        assert!(last.neighbors(9, 6).any(|(_, c)| c == Cell::new(8, 5)));
    }
}
