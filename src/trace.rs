use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;

use crate::cache::ReachCache;
use crate::carver::{CarveEvent, CarveObserver};
use crate::grid::Grid;
use crate::render::Renderer;

/// Writes a cache-annotated frame of the grid after every carver event.
///
/// Write errors cannot surface through the observer callback, so the first
/// one is kept, later frames are skipped, and `finish` returns it.
pub struct FrameWriter<W: Write> {
    out: W,
    renderer: Renderer,
    animate: bool,
    delay: Duration,
    frames: usize,
    error: Option<io::Error>,
}

impl<W: Write> FrameWriter<W> {
    pub fn new(out: W, renderer: Renderer) -> Self {
        Self {
            out,
            renderer,
            animate: false,
            delay: Duration::ZERO,
            frames: 0,
            error: None,
        }
    }

    /// Redraw each frame in place instead of appending it.
    pub fn animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn finish(mut self) -> io::Result<()> {
        match self.error.take() {
            Some(err) => Err(err),
            None => self.out.flush(),
        }
    }

    fn write_frame(&mut self, event: CarveEvent, grid: &Grid, cache: &ReachCache) -> io::Result<()> {
        let text = self.renderer.render_with_cache(grid, cache);
        if self.animate {
            self.out.queue(MoveTo(0, 0))?;
            self.out.queue(Clear(ClearType::All))?;
        }
        let heading = match event {
            CarveEvent::Advance(cell) => format!("advance {}\n", cell),
            CarveEvent::Backtrack(cell) => format!("backtrack {}\n", cell),
        };
        self.out.queue(Print(heading))?;
        self.out.queue(Print(text))?;
        if !self.animate {
            self.out.queue(Print("\n"))?;
        }
        self.out.flush()?;
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        Ok(())
    }
}

impl<W: Write> CarveObserver for FrameWriter<W> {
    fn on_event(&mut self, event: CarveEvent, grid: &Grid, cache: &ReachCache) {
        if self.error.is_some() {
            return;
        }
        match self.write_frame(event, grid, cache) {
            Ok(()) => self.frames += 1,
            Err(err) => self.error = Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheEntry;
    use crate::direction::Cell;
    use crate::render::GlyphStyle;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn appends_plain_frames() {
        let grid = Grid::new(2, 1);
        let mut cache = ReachCache::new(2, 1, Cell::new(1, 0));
        cache.set(Cell::new(0, 0), CacheEntry::Visited);

        let mut buf = Vec::new();
        let mut writer = FrameWriter::new(&mut buf, Renderer::new(GlyphStyle::Rounded));
        writer.on_event(CarveEvent::Advance(Cell::new(0, 0)), &grid, &cache);
        writer.on_event(CarveEvent::Backtrack(Cell::new(0, 0)), &grid, &cache);
        assert_eq!(writer.frames(), 2);
        writer.finish().unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("advance (0, 0)\n"));
        assert!(text.contains("backtrack (0, 0)\n"));
        assert!(text.contains(" V │* │"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn animated_frames_home_the_cursor() {
        let grid = Grid::new(1, 1);
        let cache = ReachCache::new(1, 1, Cell::new(0, 0));
        let mut buf = Vec::new();
        let mut writer =
            FrameWriter::new(&mut buf, Renderer::new(GlyphStyle::Ascii)).animate(true);
        writer.on_event(CarveEvent::Advance(Cell::new(0, 0)), &grid, &cache);
        writer.finish().unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with('\x1b'));
        assert!(text.contains("advance (0, 0)"));
    }

    #[test]
    fn keeps_first_write_error() {
        let grid = Grid::new(1, 1);
        let cache = ReachCache::new(1, 1, Cell::new(0, 0));
        let mut writer = FrameWriter::new(Broken, Renderer::new(GlyphStyle::Rounded));
        writer.on_event(CarveEvent::Advance(Cell::new(0, 0)), &grid, &cache);
        writer.on_event(CarveEvent::Advance(Cell::new(0, 0)), &grid, &cache);
        assert_eq!(writer.frames(), 0);
        let err = writer.finish().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
