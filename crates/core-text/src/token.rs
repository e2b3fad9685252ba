//! Word tokenization for the wrap engine.

use crate::line::{Fragment, Line};

/// Maximal run of text that is either all whitespace or all non-whitespace
/// and never crosses a style boundary.
///
/// A fragment carrying layout directives always forms a token of its own and
/// is never split here: its measured width depends on the whole text. Only
/// the wrap engine splits one, when it cannot fit a row even undecorated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WordToken {
    pub text: Vec<Fragment>,
}

impl WordToken {
    pub fn width(&self) -> usize {
        self.text.iter().map(Fragment::width).sum()
    }

    pub fn is_whitespace(&self) -> bool {
        self.text
            .iter()
            .all(|f| f.spec.is_empty() && f.text.chars().all(char::is_whitespace))
    }

    fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Split a line into word tokens. Empty fragments are skipped.
pub fn tokenize(line: &Line) -> Vec<WordToken> {
    let mut tokens = Vec::new();
    for fragment in &line.text {
        if fragment.is_empty() {
            continue;
        }
        if !fragment.spec.is_empty() {
            tokens.push(WordToken {
                text: vec![fragment.clone()],
            });
            continue;
        }

        let mut buf = String::new();
        let mut in_space: Option<bool> = None;
        for ch in fragment.text.chars() {
            let space = ch.is_whitespace();
            if in_space.is_some_and(|prev| prev != space) {
                tokens.push(WordToken {
                    text: vec![fragment.restyle(std::mem::take(&mut buf))],
                });
            }
            in_space = Some(space);
            buf.push(ch);
        }
        if !buf.is_empty() {
            tokens.push(WordToken {
                text: vec![fragment.restyle(buf)],
            });
        }
    }
    tokens.retain(|t| !t.is_empty());
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Atom, Spec};
    use pretty_assertions::assert_eq;

    fn texts(tokens: &[WordToken]) -> Vec<String> {
        tokens
            .iter()
            .map(|t| t.text.iter().map(|f| f.text.as_str()).collect())
            .collect()
    }

    #[test]
    fn splits_on_whitespace_transitions() {
        let line = Line::plain("HELLO  WORLD ");
        assert_eq!(texts(&tokenize(&line)), vec!["HELLO", "  ", "WORLD", " "]);
    }

    #[test]
    fn style_change_forces_boundary() {
        let line = Line::new(vec![
            Fragment::new("Hel"),
            Fragment::styled("lo", Atom::BOLD),
            Fragment::new(""),
            Fragment::new("!"),
        ]);
        let tokens = tokenize(&line);
        assert_eq!(texts(&tokens), vec!["Hel", "lo", "!"]);
        assert_eq!(tokens[1].text[0].atom, Atom::BOLD);
    }

    #[test]
    fn spec_fragments_stay_whole() {
        let line = Line::new(vec![Fragment::new("a b").with_spec(Spec::trim_left(1))]);
        let tokens = tokenize(&line);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].width(), 2);
        assert!(!tokens[0].is_whitespace());
    }
}
