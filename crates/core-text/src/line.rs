//! Styled text values: [`Fragment`] and [`Line`].

use std::fmt;

use crate::style::{Atom, Spec};
use crate::width;

/// A run of text sharing one [`Atom`] and one [`Spec`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Fragment {
    pub text: String,
    pub atom: Atom,
    pub spec: Spec,
}

impl Fragment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            atom: Atom::empty(),
            spec: Spec::new(),
        }
    }

    pub fn styled(text: impl Into<String>, atom: Atom) -> Self {
        Self::new(text).with_atom(atom)
    }

    pub fn with_atom(mut self, atom: Atom) -> Self {
        self.atom |= atom;
        self
    }

    pub fn with_spec(mut self, spec: Spec) -> Self {
        self.spec = self.spec.merge(&spec);
        self
    }

    /// New fragment carrying this fragment's style around different text.
    pub fn restyle(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            atom: self.atom,
            spec: self.spec.clone(),
        }
    }

    pub fn same_style(&self, other: &Fragment) -> bool {
        self.atom == other.atom && self.spec == other.spec
    }

    /// Columns this fragment occupies, directives included.
    pub fn width(&self) -> usize {
        self.spec.measure(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Fragment::new(text)
    }
}

impl From<String> for Fragment {
    fn from(text: String) -> Self {
        Fragment::new(text)
    }
}

/// An ordered sequence of fragments rendered as one logical row.
///
/// `order` is the 1-based index shown in an index gutter; `0` means the line
/// is not indexed. `gutter` counts the leading columns taken by a gutter the
/// wrap engine inserted, so that windowing can leave them out of its
/// logical-width accounting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Line {
    pub order: u16,
    pub text: Vec<Fragment>,
    pub spec: Spec,
    pub gutter: usize,
}

impl Line {
    pub fn new(text: Vec<Fragment>) -> Self {
        Self {
            text,
            ..Self::default()
        }
    }

    /// Single unstyled fragment.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(vec![Fragment::new(text)])
    }

    pub fn styled(text: impl Into<String>, atom: Atom) -> Self {
        Self::new(vec![Fragment::styled(text, atom)])
    }

    /// Empty line carrying only a line-level spec.
    pub fn from_spec(spec: Spec) -> Self {
        Self {
            spec,
            ..Self::default()
        }
    }

    /// Blank spacer line.
    pub fn jump() -> Self {
        Self::plain("")
    }

    pub fn with_order(mut self, order: u16) -> Self {
        self.order = order;
        self
    }

    pub fn with_spec(mut self, spec: Spec) -> Self {
        self.spec = self.spec.merge(&spec);
        self
    }

    pub fn push(&mut self, fragment: Fragment) {
        self.text.push(fragment);
    }

    /// Rendered width in columns, gutter included.
    pub fn width(&self) -> usize {
        self.text.iter().map(Fragment::width).sum()
    }

    /// Width without the index gutter.
    pub fn content_width(&self) -> usize {
        self.width().saturating_sub(self.gutter)
    }

    pub fn is_empty(&self) -> bool {
        self.text.iter().all(Fragment::is_empty)
    }

    /// Concatenated raw text of every fragment.
    pub fn plain_text(&self) -> String {
        self.text.iter().map(|f| f.text.as_str()).collect()
    }

    /// Raw text without the index gutter.
    pub fn content_text(&self) -> String {
        let text = self.plain_text();
        let (_, rest) = width::split_at_cols(&text, self.gutter);
        rest.to_string()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in &self.text {
            f.write_str(&fragment.text)?;
        }
        Ok(())
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Line::plain(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Padding;

    #[test]
    fn width_counts_directives() {
        let line = Line::new(vec![
            Fragment::new("ab"),
            Fragment::new("c").with_spec(Spec::padding_left(Padding::sized(4))),
        ]);
        assert_eq!(line.width(), 6);
        assert_eq!(line.plain_text(), "abc");
    }

    #[test]
    fn gutter_is_excluded_from_content() {
        let mut line = Line::new(vec![Fragment::new(" 1 | "), Fragment::new("hello")]);
        line.gutter = 5;
        assert_eq!(line.content_width(), 5);
        assert_eq!(line.content_text(), "hello");
    }

    #[test]
    fn atoms_accumulate() {
        let frag = Fragment::styled("x", Atom::BOLD).with_atom(Atom::UPPER);
        assert_eq!(frag.atom, Atom::BOLD | Atom::UPPER);
        assert!(!frag.same_style(&Fragment::new("x")));
        assert!(frag.same_style(&frag.restyle("y")));
    }
}
