//! Column measurement and padding helpers.
//!
//! Every width decision in the workspace is a code-point count: one `char`
//! occupies one terminal column. Callers never measure bytes directly.
//!
//! The helpers below are the building blocks for the layout directives in
//! [`crate::style`]. Fill text is cycled code point by code point, so a
//! multi-character fill such as `"zig"` produces `"zigzi"` for five columns.

/// Display width of `text` in columns.
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Fill text used when a directive carries none.
pub const DEFAULT_FILL: &str = " ";

fn fill_chars(fill: &str) -> impl Iterator<Item = char> + Clone + '_ {
    let fill = if fill.is_empty() { DEFAULT_FILL } else { fill };
    fill.chars().cycle()
}

/// Repeat `fill` from its first code point until `cols` columns are produced.
pub fn cycle(fill: &str, cols: usize) -> String {
    fill_chars(fill).take(cols).collect()
}

/// Like [`cycle`] but aligned so the result ends on the last code point of
/// `text`. `cycle_tail("ab", 3)` is `"bab"`.
pub fn cycle_tail(text: &str, cols: usize) -> String {
    let chars: Vec<char> = if text.is_empty() {
        DEFAULT_FILL.chars().collect()
    } else {
        text.chars().collect()
    };
    let mut out: Vec<char> = chars.iter().rev().copied().cycle().take(cols).collect();
    out.reverse();
    out.into_iter().collect()
}

/// Prefix `text` with fill until it is `cols` wide. Wider text is returned as is.
pub fn pad_left(text: &str, cols: usize, fill: &str) -> String {
    let len = width(text);
    if len >= cols {
        return text.to_string();
    }
    let mut out = cycle(fill, cols - len);
    out.push_str(text);
    out
}

/// Suffix `text` with fill until it is `cols` wide.
pub fn pad_right(text: &str, cols: usize, fill: &str) -> String {
    let len = width(text);
    if len >= cols {
        return text.to_string();
    }
    let mut out = text.to_string();
    out.push_str(&cycle(fill, cols - len));
    out
}

/// Center `text` within `cols`; an odd remainder goes to the right.
pub fn pad_center(text: &str, cols: usize, fill: &str) -> String {
    let len = width(text);
    if len >= cols {
        return text.to_string();
    }
    let total = cols - len;
    let left = total / 2;
    let mut out = cycle(fill, left);
    out.push_str(text);
    out.push_str(&cycle(fill, total - left));
    out
}

/// Drop the first `n` code points. `n == 0` is treated as `1`; text no
/// longer than `n` is left untouched.
pub fn trim_left(text: &str, n: usize) -> String {
    let n = n.max(1);
    if n >= width(text) {
        return text.to_string();
    }
    text.chars().skip(n).collect()
}

/// Keep only the first `n` code points. `n == 0` is treated as `1`; text no
/// longer than `n` is left untouched.
pub fn trim_right(text: &str, n: usize) -> String {
    let n = n.max(1);
    if n >= width(text) {
        return text.to_string();
    }
    text.chars().take(n).collect()
}

/// Split `text` after `n` code points.
pub fn split_at_cols(text: &str, n: usize) -> (&str, &str) {
    match text.char_indices().nth(n) {
        Some((idx, _)) => text.split_at(idx),
        None => (text, ""),
    }
}
