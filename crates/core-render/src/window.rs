//! Windowing and pagination over a body [`LayerStack`].
//!
//! The stack is drained call by call and every produced row is appended to
//! the current page. Progress is tracked in logical units (the content width
//! of each row, at least one) rather than in rows, so a cursor offset stays
//! meaningful however the content wraps. When a page fills up the focus
//! decides whether it is the one to show:
//!
//! * no focus: the first page is shown;
//! * pager focus: page `n` is shown once reached;
//! * cursor focus: the page whose offset range reaches the cursor is shown.
//!
//! A focus that points past the end of the content yields the last non-empty
//! page together with its real number, so a stale page selection corrects
//! itself on the next frame.

use core_model::LayerStack;
use core_state::Focus;
use core_text::Line;
use tracing::{debug, trace};

use crate::RenderError;

/// One screenful of body content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Window {
    /// Exactly `rows` lines; slots past the content are blank.
    pub lines: Vec<Line>,
    pub page: usize,
    /// True when content continues past this page or this is not page 0.
    pub has_more_pages: bool,
    /// Logical offset at which this page starts.
    pub start_offset: usize,
}

/// Logical units a row contributes to the running offset.
pub fn units(line: &Line) -> usize {
    line.content_width().max(1)
}

struct Page {
    lines: Vec<Line>,
    number: usize,
    start_offset: usize,
}

impl Page {
    fn into_window(self, rows: usize, has_more: bool) -> Window {
        let mut lines = self.lines;
        lines.resize(rows, Line::default());
        Window {
            lines,
            page: self.number,
            has_more_pages: has_more || self.number != 0,
            start_offset: self.start_offset,
        }
    }
}

/// Pick the page of `layer` to display in `rows` x `cols` under `focus`.
///
/// `layer` must already be initialized for the current size.
pub fn window(
    layer: &mut LayerStack,
    rows: usize,
    cols: usize,
    focus: Focus,
) -> Result<Window, RenderError> {
    if rows == 0 {
        return Ok(Window {
            lines: Vec::new(),
            page: 0,
            has_more_pages: layer.has_next(),
            start_offset: 0,
        });
    }

    let mut current = Page {
        lines: Vec::with_capacity(rows),
        number: 0,
        start_offset: 0,
    };
    let mut last_full: Option<Page> = None;
    let mut consumed = 0usize;

    while layer.has_next() {
        let (batch, _) = layer.draw()?;
        let mut batch = batch.into_iter();
        while let Some(line) = batch.next() {
            let width = line.width();
            if cols > 0 && width > cols {
                return Err(RenderError::Overflow { width, cols });
            }
            let line_units = units(&line);
            current.lines.push(line);
            if current.lines.len() < rows {
                consumed += line_units;
                continue;
            }

            let chosen = match focus {
                Focus::None => true,
                Focus::Pager(page) => current.number == page,
                Focus::Cursor(cursor) => consumed + line_units >= cursor,
            };
            consumed += line_units;
            if chosen {
                let has_more = batch.len() > 0 || layer.has_next();
                trace!(target: "render.window", page = current.number, has_more, "page selected");
                return Ok(current.into_window(rows, has_more));
            }

            let next = Page {
                lines: Vec::with_capacity(rows),
                number: current.number + 1,
                start_offset: consumed,
            };
            last_full = Some(std::mem::replace(&mut current, next));
        }
    }

    if current.lines.is_empty()
        && let Some(full) = last_full
    {
        debug!(target: "render.window", page = full.number, "focus past end, clamped");
        return Ok(full.into_window(rows, false));
    }
    Ok(current.into_window(rows, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_model::{EagerDrawable, LazyDrawable, Winsize};
    use pretty_assertions::assert_eq;

    fn stack(lines: &[&str], cols: u16) -> LayerStack {
        let mut stack =
            LayerStack::new().with(LazyDrawable::new(lines.iter().map(|l| Line::plain(*l)).collect()));
        stack.init(Winsize::new(100, cols));
        stack
    }

    fn texts(window: &Window) -> Vec<String> {
        window.lines.iter().map(Line::plain_text).collect()
    }

    const NUMBERS: [&str; 7] = ["one", "two", "three", "four", "five", "six", "seven"];

    #[test]
    fn no_focus_shows_first_page() {
        let w = window(&mut stack(&NUMBERS, 20), 3, 20, Focus::None).unwrap();
        assert_eq!(texts(&w), vec!["one", "two", "three"]);
        assert_eq!(w.page, 0);
        assert!(w.has_more_pages);
    }

    #[test]
    fn short_content_is_blank_padded() {
        let w = window(&mut stack(&["a"], 20), 3, 20, Focus::None).unwrap();
        assert_eq!(texts(&w), vec!["a", "", ""]);
        assert!(!w.has_more_pages);
    }

    #[test]
    fn pager_selects_page() {
        let w = window(&mut stack(&NUMBERS, 20), 3, 20, Focus::Pager(1)).unwrap();
        assert_eq!(texts(&w), vec!["four", "five", "six"]);
        assert_eq!(w.page, 1);
        assert_eq!(w.start_offset, 3 + 3 + 5);
        assert!(w.has_more_pages);

        let w = window(&mut stack(&NUMBERS, 20), 3, 20, Focus::Pager(2)).unwrap();
        assert_eq!(texts(&w), vec!["seven", "", ""]);
        assert_eq!(w.page, 2);
        assert!(w.has_more_pages);
    }

    #[test]
    fn pager_past_end_clamps_to_last_page() {
        let w = window(&mut stack(&NUMBERS, 20), 3, 20, Focus::Pager(9)).unwrap();
        assert_eq!(w.page, 2);
        assert_eq!(texts(&w), vec!["seven", "", ""]);

        let six = &NUMBERS[..6];
        let w = window(&mut stack(six, 20), 3, 20, Focus::Pager(5)).unwrap();
        assert_eq!(w.page, 1);
        assert_eq!(texts(&w), vec!["four", "five", "six"]);
    }

    #[test]
    fn cursor_focus_follows_offset() {
        // Offsets: one 1..=3, two 4..=6, three 7..=11, four 12..=15.
        let w = window(&mut stack(&NUMBERS, 20), 2, 20, Focus::Cursor(7)).unwrap();
        assert_eq!(texts(&w), vec!["three", "four"]);
        assert_eq!(w.page, 1);
        assert_eq!(w.start_offset, 6);

        let w = window(&mut stack(&NUMBERS, 20), 2, 20, Focus::Cursor(6)).unwrap();
        assert_eq!(texts(&w), vec!["one", "two"]);
    }

    #[test]
    fn wrapped_rows_count_their_content() {
        let mut stack = LayerStack::new().with(EagerDrawable::new(vec![
            Line::plain("aaaa bbbb"),
            Line::plain("cc"),
        ]));
        stack.init(Winsize::new(10, 5));
        // Rows: "aaaa " (5), "bbbb" (4), "cc" (2).
        let w = window(&mut stack, 1, 5, Focus::Cursor(9)).unwrap();
        assert_eq!(texts(&w), vec!["bbbb"]);
        assert_eq!(w.page, 1);
        assert_eq!(w.start_offset, 5);

        stack.init(Winsize::new(10, 5));
        let w = window(&mut stack, 1, 5, Focus::Cursor(10)).unwrap();
        assert_eq!(texts(&w), vec!["cc"]);
        assert_eq!(w.page, 2);
    }

    #[test]
    fn zero_rows_yields_empty_window() {
        let w = window(&mut stack(&NUMBERS, 20), 0, 20, Focus::None).unwrap();
        assert!(w.lines.is_empty());
        assert!(w.has_more_pages);
    }

    #[test]
    fn uninitialized_body_is_an_error() {
        let mut stack = LayerStack::new().with(LazyDrawable::new(vec![Line::plain("x")]));
        assert!(matches!(
            window(&mut stack, 3, 10, Focus::None),
            Err(RenderError::NotInitialized { .. })
        ));
    }
}
