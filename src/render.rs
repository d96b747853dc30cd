use std::fmt;
use std::str::FromStr;

use unicode_width::UnicodeWidthChar;

use crate::cache::ReachCache;
use crate::direction::Cell;
use crate::error::ConfigError;
use crate::grid::Grid;

/// Columns of corridor between two wall glyphs.
pub const CELL_WIDTH: usize = 2;
/// Rows of corridor between two wall rows.
pub const CELL_HEIGHT: usize = 1;

// Bits of an intersection mask: which arms of the cross are present.
const RIGHT: usize = 1;
const UP: usize = 2;
const LEFT: usize = 4;
const DOWN: usize = 8;

const ROUNDED: [&str; 16] = [
    " ", "╶", "╵", "╰", "╴", "─", "╯", "┴", "╷", "╭", "│", "├", "╮", "┬", "┤", "┼",
];

const SQUARE: [&str; 16] = [
    " ", "╶", "╵", "└", "╴", "─", "┘", "┴", "╷", "┌", "│", "├", "┐", "┬", "┤", "┼",
];

const ASCII: [&str; 16] = [
    " ", "-", "|", "+", "-", "-", "+", "+", "|", "+", "|", "+", "+", "+", "+", "+",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GlyphStyle {
    #[default]
    Rounded,
    Square,
    Ascii,
}

impl GlyphStyle {
    fn glyphs(self) -> &'static [&'static str; 16] {
        match self {
            GlyphStyle::Rounded => &ROUNDED,
            GlyphStyle::Square => &SQUARE,
            GlyphStyle::Ascii => &ASCII,
        }
    }
}

impl FromStr for GlyphStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rounded" => Ok(GlyphStyle::Rounded),
            "square" => Ok(GlyphStyle::Square),
            "ascii" => Ok(GlyphStyle::Ascii),
            _ => Err(ConfigError::UnknownStyle(s.to_string())),
        }
    }
}

impl fmt::Display for GlyphStyle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GlyphStyle::Rounded => write!(f, "rounded"),
            GlyphStyle::Square => write!(f, "square"),
            GlyphStyle::Ascii => write!(f, "ascii"),
        }
    }
}

/// Draws a grid as box-drawing text, one line per text row.
pub struct Renderer {
    glyphs: &'static [&'static str; 16],
}

impl Renderer {
    pub fn new(style: GlyphStyle) -> Self {
        Self {
            glyphs: style.glyphs(),
        }
    }

    pub fn render(&self, grid: &Grid) -> String {
        self.draw(grid, None)
    }

    /// Like `render`, with each cell showing its cache entry.
    pub fn render_with_cache(&self, grid: &Grid, cache: &ReachCache) -> String {
        self.draw(grid, Some(cache))
    }

    fn draw(&self, grid: &Grid, cache: Option<&ReachCache>) -> String {
        let (width, height) = (grid.width(), grid.height());
        let mut out = String::new();

        self.wall_row(&mut out, grid, 0);
        for row in 0..height {
            for _ in 0..CELL_HEIGHT {
                for col in 0..width {
                    out.push_str(self.upright(grid.vert(row, col)));
                    let filler = cache.map(|c| c.get(Cell::new(col, row)).glyph());
                    self.fill(&mut out, filler);
                }
                out.push_str(self.upright(grid.vert(row, width)));
                out.push('\n');
            }
            self.wall_row(&mut out, grid, row + 1);
        }
        out
    }

    /// The lattice line above cell row `row`.
    fn wall_row(&self, out: &mut String, grid: &Grid, row: usize) {
        for col in 0..grid.width() {
            out.push_str(self.intersection(grid, col, row));
            let run = if grid.horiz(row, col) {
                self.glyphs[LEFT | RIGHT]
            } else {
                self.glyphs[0]
            };
            for _ in 0..CELL_WIDTH {
                out.push_str(run);
            }
        }
        out.push_str(self.intersection(grid, grid.width(), row));
        out.push('\n');
    }

    fn intersection(&self, grid: &Grid, col: usize, row: usize) -> &'static str {
        let mut mask = 0;
        if col > 0 && grid.horiz(row, col - 1) {
            mask |= LEFT;
        }
        if row > 0 && grid.vert(row - 1, col) {
            mask |= UP;
        }
        if col < grid.width() && grid.horiz(row, col) {
            mask |= RIGHT;
        }
        if row < grid.height() && grid.vert(row, col) {
            mask |= DOWN;
        }
        self.glyphs[mask]
    }

    fn upright(&self, present: bool) -> &'static str {
        self.glyphs[if present { UP | DOWN } else { 0 }]
    }

    /// Writes `mark`, if any, padded with blanks to the cell width.
    fn fill(&self, out: &mut String, mark: Option<char>) {
        let mut w = 0;
        if let Some(c) = mark {
            out.push(c);
            w = UnicodeWidthChar::width(c).unwrap_or(0);
        }
        for _ in w..CELL_WIDTH {
            out.push_str(self.glyphs[0]);
        }
    }
}
