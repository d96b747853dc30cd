use crate::direction::{Cell, Direction};

/// Address of a single wall segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wall {
    /// Segment on the left of cell `(col, row)`; `col == width` is the right border.
    Vert { row: usize, col: usize },
    /// Segment above cell `(col, row)`; `row == height` is the bottom border.
    Horiz { row: usize, col: usize },
}

impl Wall {
    /// The segment on the `dir` side of `cell`.
    pub fn between(cell: Cell, dir: Direction) -> Wall {
        let ahead = usize::from(dir.is_positive());
        if dir.is_horizontal() {
            Wall::Vert {
                row: cell.y,
                col: cell.x + ahead,
            }
        } else {
            Wall::Horiz {
                row: cell.y + ahead,
                col: cell.x,
            }
        }
    }
}

/// Wall state of a rectangular maze.
///
/// `vert` is `height` rows of `width + 1` segments, `horiz` is `height + 1`
/// rows of `width` segments. `true` means the segment is present. Interior
/// segments start absent: space the carver has not claimed yet has no walls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    vert: Vec<Vec<bool>>,
    horiz: Vec<Vec<bool>>,
}

impl Grid {
    /// Border walls everywhere, an opening on the left of the entrance cell,
    /// and the entrance cell closed off on its other two sides.
    ///
    /// Both dimensions must be at least 1; `MazeConfig` enforces this.
    pub fn new(width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0, "grid must have at least one cell");

        let vert: Vec<Vec<bool>> = (0..height)
            .map(|_| (0..=width).map(|col| col == 0 || col == width).collect())
            .collect();
        let horiz: Vec<Vec<bool>> = (0..=height)
            .map(|row| vec![row == 0 || row == height; width])
            .collect();

        let mut grid = Self {
            width,
            height,
            vert,
            horiz,
        };

        let entrance = grid.entrance();
        grid.set_wall(Wall::between(entrance, Direction::Left), false);
        grid.set_wall(Wall::between(entrance, Direction::Right), true);
        grid.set_wall(Wall::between(entrance, Direction::Down), true);
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn entrance(&self) -> Cell {
        Cell::new(0, 0)
    }

    pub fn exit(&self) -> Cell {
        Cell::new(self.width - 1, self.height - 1)
    }

    pub fn vert(&self, row: usize, col: usize) -> bool {
        self.vert[row][col]
    }

    pub fn horiz(&self, row: usize, col: usize) -> bool {
        self.horiz[row][col]
    }

    pub fn wall(&self, wall: Wall) -> bool {
        match wall {
            Wall::Vert { row, col } => self.vert[row][col],
            Wall::Horiz { row, col } => self.horiz[row][col],
        }
    }

    pub fn set_wall(&mut self, wall: Wall, present: bool) {
        match wall {
            Wall::Vert { row, col } => self.vert[row][col] = present,
            Wall::Horiz { row, col } => self.horiz[row][col] = present,
        }
    }

    /// Whether `cell` has a passage to an in-bounds neighbor in `dir`.
    pub fn is_open(&self, cell: Cell, dir: Direction) -> bool {
        cell.step(dir, self.width, self.height).is_some() && !self.wall(Wall::between(cell, dir))
    }

    pub fn open_exit(&mut self) {
        let exit = self.exit();
        self.set_wall(Wall::between(exit, Direction::Right), false);
    }

    /// Number of open segments between two cells of the grid.
    pub fn passages(&self) -> usize {
        let inner_vert = self
            .vert
            .iter()
            .map(|row| row[1..self.width].iter().filter(|w| !**w).count())
            .sum::<usize>();
        let inner_horiz = self.horiz[1..self.height]
            .iter()
            .map(|row| row.iter().filter(|w| !**w).count())
            .sum::<usize>();
        inner_vert + inner_horiz
    }

    pub fn reachable_from(&self, start: Cell) -> Vec<Vec<bool>> {
        let mut seen = vec![vec![false; self.width]; self.height];
        let mut stack = vec![start];
        seen[start.y][start.x] = true;
        while let Some(cell) = stack.pop() {
            for (dir, next) in cell.neighbors(self.width, self.height) {
                if seen[next.y][next.x] || !self.is_open(cell, dir) {
                    continue;
                }
                seen[next.y][next.x] = true;
                stack.push(next);
            }
        }
        seen
    }
}
