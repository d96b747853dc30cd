/// One of the four moves between adjacent cells.
///
/// The declaration order is significant: candidate moves are collected and
/// drawn in this order, and `opposite` relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Down => (0, 1),
            Direction::Right => (1, 0),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Direction {
        Direction::ALL[self.index() ^ 2]
    }

    /// Left and right moves cross vertical wall segments.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Down and right moves increase a coordinate.
    pub fn is_positive(self) -> bool {
        matches!(self, Direction::Down | Direction::Right)
    }

    /// The two directions at right angles, negative one first.
    pub fn perpendicular(self) -> [Direction; 2] {
        if self.is_horizontal() {
            [Direction::Up, Direction::Down]
        } else {
            [Direction::Left, Direction::Right]
        }
    }
}

/// A cell coordinate, `x` is the column and `y` the row. (0,0) is top left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The neighbor in `dir`, or `None` when it falls outside a
    /// `width` x `height` grid.
    pub fn step(self, dir: Direction, width: usize, height: usize) -> Option<Cell> {
        let (dx, dy) = dir.delta();
        let nx = self.x as isize + dx;
        let ny = self.y as isize + dy;
        if nx < 0 || ny < 0 {
            return None;
        }
        let nx = nx as usize;
        let ny = ny as usize;
        if nx >= width || ny >= height {
            return None;
        }
        Some(Cell { x: nx, y: ny })
    }

    /// All in-bounds neighbors, in `Direction::ALL` order.
    pub fn neighbors(
        self,
        width: usize,
        height: usize,
    ) -> impl Iterator<Item = (Direction, Cell)> {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.step(dir, width, height).map(|next| (dir, next)))
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_pairs() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dx, dy) = dir.delta();
            assert_eq!(dir.opposite().delta(), (-dx, -dy));
        }
    }

    #[test]
    fn step_stays_in_bounds() {
        let corner = Cell::new(0, 0);
        assert_eq!(corner.step(Direction::Up, 3, 2), None);
        assert_eq!(corner.step(Direction::Left, 3, 2), None);
        assert_eq!(corner.step(Direction::Right, 3, 2), Some(Cell::new(1, 0)));

        let far = Cell::new(2, 1);
        assert_eq!(far.step(Direction::Right, 3, 2), None);
        assert_eq!(far.step(Direction::Down, 3, 2), None);
        assert_eq!(far.step(Direction::Up, 3, 2), Some(Cell::new(2, 0)));
    }

    #[test]
    fn neighbors_follow_direction_order() {
        let dirs: Vec<Direction> = Cell::new(1, 1).neighbors(3, 3).map(|(d, _)| d).collect();
        assert_eq!(dirs, Direction::ALL.to_vec());

        let edge: Vec<Cell> = Cell::new(0, 0).neighbors(1, 2).map(|(_, c)| c).collect();
        assert_eq!(edge, vec![Cell::new(0, 1)]);
    }
}
