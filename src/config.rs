use crate::error::ConfigError;
use crate::render::GlyphStyle;

pub const DEFAULT_WIDTH: usize = 30;
pub const DEFAULT_HEIGHT: usize = 20;
pub const MAX_DIMENSION: usize = 1024;

/// Validated dimensions and look of a maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeConfig {
    width: usize,
    height: usize,
    style: GlyphStyle,
}

impl MazeConfig {
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        check_dimension("width", width)?;
        check_dimension("height", height)?;
        Ok(Self {
            width,
            height,
            style: GlyphStyle::default(),
        })
    }

    pub fn with_style(mut self, style: GlyphStyle) -> Self {
        self.style = style;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn style(&self) -> GlyphStyle {
        self.style
    }
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            style: GlyphStyle::default(),
        }
    }
}

fn check_dimension(name: &'static str, value: usize) -> Result<(), ConfigError> {
    if (1..=MAX_DIMENSION).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Dimension {
            name,
            value,
            min: 1,
            max: MAX_DIMENSION,
        })
    }
}
