//! Terminal command batching for a full frame.
//!
//! Commands preserve ordering and are flushed once per frame. Every row is
//! addressed absolutely, so a short row never inherits leftovers from the
//! previous frame.

use std::io::Write;

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    ClearLine,
    Print(String),
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    /// One `MoveTo` + `ClearLine` + `Print` per row of `frame`.
    pub fn frame(frame: &str) -> Self {
        let mut w = Self::new();
        for (y, row) in frame.split('\n').enumerate() {
            let y = u16::try_from(y).unwrap_or(u16::MAX);
            w.move_to(0, y);
            w.clear_line();
            w.print(row);
        }
        w
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }

    pub fn clear_line(&mut self) {
        self.cmds.push(Command::ClearLine);
    }

    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::ClearLine => queue!(out, Clear(ClearType::CurrentLine))?,
                Command::Print(s) => queue!(out, Print(s))?,
            }
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_addresses_every_row() {
        let w = Writer::frame("ab\n\ncd");
        assert_eq!(
            w.commands(),
            &[
                Command::MoveTo(0, 0),
                Command::ClearLine,
                Command::Print("ab".into()),
                Command::MoveTo(0, 1),
                Command::ClearLine,
                Command::MoveTo(0, 2),
                Command::ClearLine,
                Command::Print("cd".into()),
            ]
        );
    }

    #[test]
    fn flush_emits_escape_sequences() {
        let mut out = Vec::new();
        Writer::frame("hi").flush_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("hi"));
        assert!(text.starts_with("\x1b[1;1H"));
    }
}
