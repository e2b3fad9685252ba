//! Centered fixed-size frame inside the terminal.

use core_model::Winsize;
use core_text::width;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBox {
    outer: Winsize,
    inner: Winsize,
}

impl FrameBox {
    /// Reserve `margin_rows` x `margin_cols` around the inner frame, keeping
    /// at least one cell whenever the terminal has one.
    pub fn new(outer: Winsize, margin_rows: u16, margin_cols: u16) -> Self {
        let rows = outer.rows.saturating_sub(margin_rows).max(outer.rows.min(1));
        let cols = outer.cols.saturating_sub(margin_cols).max(outer.cols.min(1));
        Self {
            outer,
            inner: Winsize::new(rows, cols),
        }
    }

    /// Whole terminal used as the frame.
    pub fn full(outer: Winsize) -> Self {
        Self::new(outer, 0, 0)
    }

    pub fn outer(&self) -> Winsize {
        self.outer
    }

    /// Size the layout pass renders into.
    pub fn inner(&self) -> Winsize {
        self.inner
    }

    fn top(&self) -> usize {
        usize::from(self.outer.rows - self.inner.rows) / 2
    }

    fn left(&self) -> usize {
        usize::from(self.outer.cols - self.inner.cols) / 2
    }

    /// Place a rendered inner frame in the middle of a blank outer frame.
    pub fn place(&self, frame: &str) -> String {
        let cols = usize::from(self.outer.cols);
        let blank = " ".repeat(cols);
        let mut rows = vec![blank; usize::from(self.outer.rows)];
        let indent = " ".repeat(self.left());
        for (slot, line) in rows.iter_mut().skip(self.top()).zip(frame.split('\n')) {
            let visible = width::width(&strip_sgr(line));
            let mut row = format!("{indent}{line}");
            let shown = self.left() + visible;
            if shown < cols {
                row.push_str(&" ".repeat(cols - shown));
            }
            *slot = row;
        }
        rows.join("\n")
    }
}

/// `text` without SGR escape sequences.
fn strip_sgr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
            continue;
        }
        out.push(ch);
    }
    out
}
