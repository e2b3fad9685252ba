//! Drawables: sources of wrapped lines for one terminal size.
//!
//! Lifecycle: `init(size)` once per size epoch, then `draw()` until it
//! reports no more output. Drawing before `init` is an error, not a panic.

use core_text::{IndexMeta, Line, wrap};

use crate::{RenderError, Winsize};

/// Lines produced by one `draw` call plus whether more calls will produce more.
pub type Drawn = (Vec<Line>, bool);

pub trait Drawable {
    /// Short label used in diagnostics.
    fn name(&self) -> &'static str;
    fn init(&mut self, size: Winsize);
    fn draw(&mut self) -> Result<Drawn, RenderError>;
}

#[derive(Debug, Clone, Copy)]
struct Epoch {
    cols: usize,
    meta: Option<IndexMeta>,
}

impl Epoch {
    fn new(size: Winsize, lines: &[Line]) -> Self {
        Self {
            cols: usize::from(size.cols),
            meta: IndexMeta::for_lines(lines),
        }
    }
}

/// Produces all of its lines in the first `draw` after `init`.
#[derive(Debug, Clone, Default)]
pub struct EagerDrawable {
    lines: Vec<Line>,
    epoch: Option<Epoch>,
    drawn: bool,
}

impl EagerDrawable {
    pub fn new(lines: Vec<Line>) -> Self {
        Self {
            lines,
            epoch: None,
            drawn: false,
        }
    }
}

impl Drawable for EagerDrawable {
    fn name(&self) -> &'static str {
        "eager"
    }

    fn init(&mut self, size: Winsize) {
        self.epoch = Some(Epoch::new(size, &self.lines));
        self.drawn = false;
    }

    fn draw(&mut self) -> Result<Drawn, RenderError> {
        let epoch = self.epoch.ok_or(RenderError::NotInitialized {
            drawable: self.name(),
        })?;
        if self.drawn {
            return Ok((Vec::new(), false));
        }
        self.drawn = true;
        let out = self
            .lines
            .iter()
            .flat_map(|line| wrap(epoch.cols, line, epoch.meta.as_ref()))
            .collect();
        Ok((out, false))
    }
}

/// Produces one source line (wrapped) per `draw`.
#[derive(Debug, Clone, Default)]
pub struct LazyDrawable {
    lines: Vec<Line>,
    epoch: Option<Epoch>,
    cursor: usize,
}

impl LazyDrawable {
    pub fn new(lines: Vec<Line>) -> Self {
        Self {
            lines,
            epoch: None,
            cursor: 0,
        }
    }
}

impl Drawable for LazyDrawable {
    fn name(&self) -> &'static str {
        "lazy"
    }

    fn init(&mut self, size: Winsize) {
        self.epoch = Some(Epoch::new(size, &self.lines));
        self.cursor = 0;
    }

    fn draw(&mut self) -> Result<Drawn, RenderError> {
        let epoch = self.epoch.ok_or(RenderError::NotInitialized {
            drawable: self.name(),
        })?;
        let Some(line) = self.lines.get(self.cursor) else {
            return Ok((Vec::new(), false));
        };
        let out = wrap(epoch.cols, line, epoch.meta.as_ref());
        self.cursor += 1;
        Ok((out, self.cursor < self.lines.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn size(cols: u16) -> Winsize {
        Winsize { rows: 10, cols }
    }

    fn texts(lines: &[Line]) -> Vec<String> {
        lines.iter().map(Line::plain_text).collect()
    }

    #[test]
    fn draw_before_init_is_an_error() {
        let mut eager = EagerDrawable::new(vec![Line::plain("x")]);
        assert_eq!(
            eager.draw(),
            Err(RenderError::NotInitialized { drawable: "eager" })
        );
        let mut lazy = LazyDrawable::default();
        assert!(lazy.draw().is_err());
    }

    #[test]
    fn eager_draws_once_per_init() {
        let mut eager = EagerDrawable::new(vec![Line::plain("HELLO WORLD"), Line::plain("ok")]);
        eager.init(size(5));
        let (lines, more) = eager.draw().unwrap();
        assert_eq!(texts(&lines), vec!["HELLO", " ", "WORLD", "ok"]);
        assert!(!more);
        assert_eq!(eager.draw().unwrap(), (Vec::new(), false));
        eager.init(size(20));
        assert_eq!(eager.draw().unwrap().0.len(), 2);
    }

    #[test]
    fn lazy_draws_one_source_line_per_call() {
        let mut lazy = LazyDrawable::new(vec![Line::plain("a"), Line::plain("bb cc")]);
        lazy.init(size(3));
        assert_eq!(lazy.draw().unwrap(), (vec![Line::plain("a")], true));
        let (lines, more) = lazy.draw().unwrap();
        assert_eq!(texts(&lines), vec!["bb ", "cc"]);
        assert!(!more);
        assert_eq!(lazy.draw().unwrap(), (Vec::new(), false));
    }

    #[test]
    fn lazy_applies_shared_index_gutter() {
        let mut lazy = LazyDrawable::new(vec![
            Line::plain("first").with_order(1),
            Line::plain("tenth").with_order(10),
        ]);
        lazy.init(size(40));
        assert_eq!(texts(&lazy.draw().unwrap().0), vec![" 1 | first"]);
        assert_eq!(texts(&lazy.draw().unwrap().0), vec!["10 | tenth"]);
    }
}
