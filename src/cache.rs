//! Memoized reachability of the target cell.
//!
//! The carver asks, before stepping into a neighbor, whether that neighbor can
//! still reach the target without crossing the corridor carved so far. Cells
//! outside the corridor are unclaimed space, so the question is answered over
//! plain grid adjacency with `Visited` cells acting as obstacles. Answers are
//! kept between questions and invalidated when the corridor grows or shrinks.

use std::collections::VecDeque;

use crate::direction::{Cell, Direction};

/// What is currently known about a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CacheEntry {
    #[default]
    Unset,
    /// On the carver's active corridor.
    Visited,
    /// Reaches the target; the direction names the next cell toward it.
    Path(Direction),
    /// Cut off from the target by the active corridor.
    NoPath,
    /// The goal, and after success every cell of the carved corridor.
    Target,
    /// Discovered by the probe that is currently running.
    BfsVisited,
}

impl CacheEntry {
    /// `Path`, `Target` and `NoPath` are final until invalidated.
    pub fn is_settled(self) -> bool {
        matches!(
            self,
            CacheEntry::Path(_) | CacheEntry::Target | CacheEntry::NoPath
        )
    }

    pub fn reaches_target(self) -> bool {
        matches!(self, CacheEntry::Path(_) | CacheEntry::Target)
    }

    /// Single character used by the debug rendering.
    pub fn glyph(self) -> char {
        match self {
            CacheEntry::Unset => ' ',
            CacheEntry::Visited => 'V',
            CacheEntry::Path(Direction::Up) => '^',
            CacheEntry::Path(Direction::Left) => '<',
            CacheEntry::Path(Direction::Down) => 'v',
            CacheEntry::Path(Direction::Right) => '>',
            CacheEntry::NoPath => '.',
            CacheEntry::Target => '*',
            CacheEntry::BfsVisited => 'B',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachCache {
    width: usize,
    height: usize,
    entries: Vec<CacheEntry>,
}

impl ReachCache {
    /// Every cell `Unset` except `target`.
    pub fn new(width: usize, height: usize, target: Cell) -> Self {
        let mut cache = Self {
            width,
            height,
            entries: vec![CacheEntry::Unset; width * height],
        };
        cache.set(target, CacheEntry::Target);
        cache
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, cell: Cell) -> CacheEntry {
        self.entries[self.index(cell)]
    }

    pub fn set(&mut self, cell: Cell, entry: CacheEntry) {
        let idx = self.index(cell);
        self.entries[idx] = entry;
    }

    /// All cells with their entries, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, CacheEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (Cell::new(idx % self.width, idx / self.width), *entry))
    }

    fn index(&self, cell: Cell) -> usize {
        debug_assert!(cell.x < self.width && cell.y < self.height);
        cell.y * self.width + cell.x
    }

    /// Settles `start` if it is `Unset` and returns its entry.
    ///
    /// Floods through `Unset` cells until the first settled cell is met. A
    /// route to the target from that cell is a route for the whole flooded
    /// region, which is then pointed back along the flood toward it; a
    /// `NoPath` meeting, or running out of cells, marks the region `NoPath`.
    pub fn probe(&mut self, start: Cell) -> CacheEntry {
        if self.get(start) != CacheEntry::Unset {
            return self.get(start);
        }
        self.set(start, CacheEntry::BfsVisited);

        let mut queue = VecDeque::new();
        queue.push_back(start);
        let mut found = None;

        'search: while let Some(pos) = queue.pop_front() {
            for (_, adj) in pos.neighbors(self.width, self.height) {
                let entry = self.get(adj);
                if entry.is_settled() {
                    found = Some(adj);
                    break 'search;
                }
                if entry != CacheEntry::Unset {
                    continue;
                }
                self.set(adj, CacheEntry::BfsVisited);
                queue.push_back(adj);
            }
        }

        let reaches = found.is_some_and(|cell| self.get(cell).reaches_target());
        if found.is_none() {
            self.set(start, CacheEntry::NoPath);
        }

        queue.clear();
        queue.push_back(found.unwrap_or(start));
        while let Some(pos) = queue.pop_front() {
            for (dir, adj) in pos.neighbors(self.width, self.height) {
                if self.get(adj) != CacheEntry::BfsVisited {
                    continue;
                }
                let entry = if reaches {
                    CacheEntry::Path(dir.opposite())
                } else {
                    CacheEntry::NoPath
                };
                self.set(adj, entry);
                queue.push_back(adj);
            }
        }

        self.get(start)
    }

    /// Forgets the route of `cell` and of every cell routed through it.
    pub fn invalidate_path(&mut self, cell: Cell) {
        let mut pending = vec![cell];
        while let Some(pos) = pending.pop() {
            if !matches!(self.get(pos), CacheEntry::Path(_)) {
                continue;
            }
            self.set(pos, CacheEntry::Unset);
            for (dir, adj) in pos.neighbors(self.width, self.height) {
                if self.get(adj) == CacheEntry::Path(dir.opposite()) {
                    pending.push(adj);
                }
            }
        }
    }

    /// Forgets the dead-end verdict of `cell` and of the `NoPath` region
    /// connected to it.
    pub fn invalidate_nopath(&mut self, cell: Cell) {
        if !matches!(self.get(cell), CacheEntry::NoPath | CacheEntry::Unset) {
            return;
        }
        self.set(cell, CacheEntry::Unset);

        let mut pending = vec![cell];
        while let Some(pos) = pending.pop() {
            for (_, adj) in pos.neighbors(self.width, self.height) {
                if self.get(adj) == CacheEntry::NoPath {
                    self.set(adj, CacheEntry::Unset);
                    pending.push(adj);
                }
            }
        }
    }
}
