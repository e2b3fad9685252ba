//! Frame rendering: layout directives, atoms and ANSI SGR output.
//!
//! Every rendered row occupies exactly `cols` visible columns and a frame has
//! exactly `rows` rows joined by `\n`.

use core_model::Winsize;
use core_text::{Atom, Fragment, Line, SpecKind, width};

pub const BOLD: &str = "\x1b[1m";
pub const NO_BOLD: &str = "\x1b[22m";
pub const REVERSE: &str = "\x1b[7m";
pub const NO_REVERSE: &str = "\x1b[27m";

/// Case-fold and wrap `text` in the SGR sequences of `atom`.
pub fn paint(text: &str, atom: Atom) -> String {
    let mut out = if atom.contains(Atom::LOWER) {
        text.to_lowercase()
    } else {
        text.to_string()
    };
    if atom.contains(Atom::UPPER) {
        out = out.to_uppercase();
    }
    if atom.contains(Atom::BOLD) {
        out = format!("{BOLD}{out}{NO_BOLD}");
    }
    if atom.contains(Atom::SELECTED) {
        out = format!("{REVERSE}{out}{NO_REVERSE}");
    }
    out
}

/// First `cols` columns of `text`.
fn clip(text: &str, cols: usize) -> &str {
    width::split_at_cols(text, cols).0
}

/// Visible text of each fragment before painting. Every fragment is laid out
/// within the columns its predecessors left free, so the parts never add up
/// to more than `cols`.
fn visible(line: &Line, cols: usize) -> Vec<(String, &Fragment)> {
    let mut remaining = cols;
    let mut parts = Vec::with_capacity(line.text.len());
    for fragment in &line.text {
        let text = fragment.spec.apply(&fragment.text, Some(remaining));
        let text = clip(&text, remaining).to_string();
        remaining -= width::width(&text);
        parts.push((text, fragment));
    }
    parts
}

/// Visible text of a whole line, directives applied per fragment.
fn plain(line: &Line, cols: usize) -> String {
    visible(line, cols).into_iter().map(|(text, _)| text).collect()
}

fn line_atom(line: &Line) -> Atom {
    line.text.first().map_or(Atom::empty(), |f| f.atom)
}

/// Render row `index` of `lines` into a string of exactly `cols` visible columns.
pub fn render_line(lines: &[Line], index: usize, cols: usize) -> String {
    let Some(line) = lines.get(index) else {
        return " ".repeat(cols);
    };
    let kind = line.spec.kind();

    let (text, shown) = if kind.intersects(SpecKind::FILLS) {
        let size = if kind.contains(SpecKind::FILL_UP) {
            index.checked_sub(1).and_then(|i| lines.get(i)).map_or(cols, Line::width)
        } else if kind.contains(SpecKind::FILL_DOWN) {
            lines.get(index + 1).map_or(cols, Line::width)
        } else {
            cols
        };
        let filled = width::cycle(&plain(line, cols), size.min(cols));
        let shown = width::width(&filled);
        (paint(&filled, line_atom(line)), shown)
    } else if kind.intersects(
        SpecKind::TRIM_LEFT | SpecKind::TRIM_RIGHT | SpecKind::REPEAT_LEFT | SpecKind::REPEAT_RIGHT,
    ) {
        let decorated = line.spec.apply(&plain(line, cols), Some(cols));
        let decorated = clip(&decorated, cols);
        let shown = width::width(&decorated);
        (paint(decorated, line_atom(line)), shown)
    } else {
        let mut body = String::new();
        let mut shown = 0;
        for (text, fragment) in visible(line, cols) {
            if text.is_empty() {
                continue;
            }
            shown += width::width(&text);
            body.push_str(&paint(&text, fragment.atom));
        }
        let (left, right) = line.spec.pads(shown, Some(cols));
        shown += width::width(&left) + width::width(&right);
        (format!("{left}{body}{right}"), shown)
    };

    text + &" ".repeat(cols.saturating_sub(shown))
}

/// Render a full frame of exactly `size.rows` rows.
pub fn render(lines: &[Line], size: Winsize) -> String {
    let cols = usize::from(size.cols);
    let rows: Vec<String> = (0..usize::from(size.rows))
        .map(|i| render_line(lines, i, cols))
        .collect();
    rows.join("\n")
}
