//! Word wrapping with an optional index gutter.
//!
//! Every produced line is at most `cols` columns wide whenever `cols > 0`.
//! A directive-bearing fragment too wide for a row of its own gets its sized
//! paddings and repeats shrunk to the budget, and its text is split only when
//! the trimmed text alone is still too wide. Wrapping never reorders or drops
//! content: concatenating the non-gutter text of the output reproduces the
//! input.

use tracing::trace;

use crate::line::{Fragment, Line};
use crate::token::{WordToken, tokenize};
use crate::width;

const SEPARATOR: &str = " | ";

/// Layout of the index gutter shared by every line of one drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexMeta {
    digits: usize,
}

impl IndexMeta {
    /// Gutter sized for the widest non-zero `order`, or `None` when no line
    /// is indexed.
    pub fn for_lines(lines: &[Line]) -> Option<IndexMeta> {
        let digits = lines
            .iter()
            .filter(|l| l.order != 0)
            .map(|l| l.order.to_string().len())
            .max()?;
        Some(IndexMeta { digits })
    }

    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Total gutter width, separator included.
    pub fn width(&self) -> usize {
        self.digits + width::width(SEPARATOR)
    }

    /// Gutter for the first physical row of a line. Unindexed lines get a
    /// blank gutter so columns stay aligned.
    pub fn header(&self, order: u16) -> String {
        if order == 0 {
            return self.body();
        }
        format!("{order:>digits$}{SEPARATOR}", digits = self.digits)
    }

    /// Gutter for continuation rows.
    pub fn body(&self) -> String {
        format!("{}{SEPARATOR}", " ".repeat(self.digits))
    }
}

/// Wrap `line` to `cols`, prefixing an index gutter when `meta` is given.
///
/// A line that already fits is emitted as a single row without being
/// tokenized, so its fragments come back untouched.
pub fn wrap(cols: usize, line: &Line, meta: Option<&IndexMeta>) -> Vec<Line> {
    let gutter = meta.map_or(0, IndexMeta::width);
    if line.width() + gutter <= cols {
        let Some(meta) = meta else {
            return vec![line.clone()];
        };
        let mut text = Vec::with_capacity(line.text.len() + 1);
        text.push(Fragment::new(meta.header(line.order)));
        text.extend(line.text.iter().cloned());
        return vec![Line {
            order: line.order,
            text,
            spec: line.spec.clone(),
            gutter,
        }];
    }
    wrap_words(cols, line, meta)
}

/// Greedy word packing without the fits-already shortcut.
///
/// An empty line produces no rows.
pub fn wrap_words(cols: usize, line: &Line, meta: Option<&IndexMeta>) -> Vec<Line> {
    let tokens = tokenize(line);
    let mut packer = Packer::new(cols, line, meta);
    for token in tokens {
        packer.place(token);
    }
    let out = packer.finish();
    trace!(target: "text.wrap", cols, rows = out.len(), "wrapped line");
    out
}

struct Packer<'a> {
    cols: usize,
    source: &'a Line,
    meta: Option<&'a IndexMeta>,
    out: Vec<Line>,
    current: Line,
    width: usize,
}

impl<'a> Packer<'a> {
    fn new(cols: usize, source: &'a Line, meta: Option<&'a IndexMeta>) -> Self {
        let cols = cols.saturating_sub(meta.map_or(0, IndexMeta::width));
        let mut packer = Self {
            cols,
            source,
            meta,
            out: Vec::new(),
            current: Line::default(),
            width: 0,
        };
        packer.current = packer.fresh(true);
        packer
    }

    fn fresh(&self, first: bool) -> Line {
        let mut line = Line {
            order: self.source.order,
            text: Vec::new(),
            spec: self.source.spec.clone(),
            gutter: 0,
        };
        if let Some(meta) = self.meta {
            let prefix = if first {
                meta.header(self.source.order)
            } else {
                meta.body()
            };
            line.text.push(Fragment::new(prefix));
            line.gutter = meta.width();
        }
        line
    }

    fn has_content(&self) -> bool {
        self.current.text.len() > usize::from(self.meta.is_some())
    }

    fn flush(&mut self) {
        let next = self.fresh(false);
        let done = std::mem::replace(&mut self.current, next);
        self.out.push(done);
        self.width = 0;
    }

    fn push(&mut self, fragment: Fragment) {
        self.width += fragment.width();
        self.current.text.push(fragment);
    }

    fn place(&mut self, token: WordToken) {
        let len = token.width();
        if self.width + len <= self.cols {
            token.text.into_iter().for_each(|f| self.push(f));
            return;
        }
        if len <= self.cols {
            self.flush();
            token.text.into_iter().for_each(|f| self.push(f));
            return;
        }
        self.split_long_token(token);
    }

    /// Break a token wider than the budget across rows by code points.
    fn split_long_token(&mut self, token: WordToken) {
        if self.cols == 0 {
            if self.has_content() {
                self.flush();
            }
            token.text.into_iter().for_each(|f| self.push(f));
            self.flush();
            return;
        }

        let mut queue: std::collections::VecDeque<Fragment> = token.text.into();
        while let Some(fragment) = queue.pop_front() {
            let remaining = self.cols.saturating_sub(self.width);
            if remaining == 0 {
                self.flush();
                queue.push_front(fragment);
                continue;
            }
            let size = fragment.width();
            if size <= remaining {
                self.push(fragment);
                continue;
            }
            if !fragment.spec.is_empty() {
                if self.has_content() {
                    self.flush();
                    queue.push_front(fragment);
                    continue;
                }
                let (head, tail) = self.fit_directive(&fragment);
                self.push(head);
                if let Some(tail) = tail {
                    queue.push_front(tail);
                }
                continue;
            }
            let (head, tail) = width::split_at_cols(&fragment.text, remaining);
            let (head, tail) = (fragment.restyle(head), fragment.restyle(tail));
            self.push(head);
            if !tail.is_empty() {
                queue.push_front(tail);
            }
            self.flush();
        }
    }

    /// Shrink a directive fragment to fit an empty row, splitting off the
    /// text that does not fit even undecorated.
    fn fit_directive(&self, fragment: &Fragment) -> (Fragment, Option<Fragment>) {
        let text = &fragment.text;
        let (head, tail) = if width::width(&fragment.spec.trimmed(text)) <= self.cols {
            (text.as_str(), "")
        } else {
            width::split_at_cols(text, self.cols)
        };
        let fitted = Fragment {
            text: head.to_string(),
            atom: fragment.atom,
            spec: fragment.spec.fit(head, self.cols),
        };
        let tail = (!tail.is_empty()).then(|| fragment.restyle(tail));
        (fitted, tail)
    }

    fn finish(mut self) -> Vec<Line> {
        if self.has_content() {
            self.out.push(self.current);
        }
        self.out
    }
}
