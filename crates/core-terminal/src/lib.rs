//! Terminal boundary: raw mode, alternate screen, size queries and frame output.
//!
//! Restoration is guaranteed twice over: [`TerminalGuard`] leaves on drop, and
//! so does the backend itself, so early returns, errors and unwinding all end
//! with the terminal back in cooked mode.

use std::io::{Stdout, Write, stdout};

use anyhow::Result;
use core_model::Winsize;
use core_render::Writer;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
        enable_raw_mode,
    },
};
use tracing::{debug, warn};

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
    fn size(&self) -> Result<Winsize>;
    fn write_frame(&mut self, frame: &str) -> Result<()>;
}

pub struct CrosstermBackend<W: Write = Stdout> {
    out: W,
    entered: bool,
}

/// RAII guard ensuring terminal state restoration even if caller early-returns or panics.
pub struct TerminalGuard<'a, W: Write = Stdout> {
    backend: &'a mut CrosstermBackend<W>,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self::with_writer(stdout())
    }
}

impl<W: Write> CrosstermBackend<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            entered: false,
        }
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_, W>> {
        self.enter()?;
        Ok(TerminalGuard { backend: self })
    }
}

impl<W: Write> TerminalBackend for CrosstermBackend<W> {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            execute!(self.out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
            self.entered = true;
            debug!(target: "terminal", "entered raw mode");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(self.out, LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.entered = false;
            debug!(target: "terminal", "left raw mode");
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(self.out, SetTitle(title))?;
        Ok(())
    }

    fn size(&self) -> Result<Winsize> {
        let (cols, rows) = crossterm::terminal::size()?;
        Ok(Winsize::new(rows, cols))
    }

    fn write_frame(&mut self, frame: &str) -> Result<()> {
        Writer::frame(frame).flush_to(&mut self.out)
    }
}

impl<W: Write> Drop for CrosstermBackend<W> {
    fn drop(&mut self) {
        if let Err(err) = self.leave() {
            warn!(target: "terminal", error = %err, "terminal restore failed");
        }
    }
}

impl<W: Write> TerminalGuard<'_, W> {
    pub fn backend(&mut self) -> &mut CrosstermBackend<W> {
        self.backend
    }
}

impl<W: Write> Drop for TerminalGuard<'_, W> {
    fn drop(&mut self) {
        if let Err(err) = self.backend.leave() {
            warn!(target: "terminal", error = %err, "terminal restore failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_frame_goes_to_writer() {
        let mut backend = CrosstermBackend::with_writer(Vec::new());
        backend.write_frame("one\ntwo").unwrap();
        let text = String::from_utf8(std::mem::take(&mut backend.out)).unwrap();
        assert!(text.contains("one"));
        assert!(text.contains("two"));
        assert!(!backend.is_entered());
    }

    #[test]
    fn leave_without_enter_is_noop() {
        let mut backend = CrosstermBackend::with_writer(Vec::new());
        backend.leave().unwrap();
        assert!(backend.out.is_empty());
    }
}
