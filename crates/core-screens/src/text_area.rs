//! Multi-line editor screen over a code-point [`Buffer`].
//!
//! The caret and the selection anchor are code-point offsets. A selection is
//! active whenever they differ. Every mutation goes through [`History`] so
//! Ctrl+G / Ctrl+T can walk it back and forth.

use core_events::{KeyCode, KeyModifiers, KeySet};
use core_model::{
    Definition, EagerDrawable, LazyDrawable, Screen, ScreenEvent, ScreenResult, ViewModel,
};
use core_state::{ActionKind, History, UiState, apply_delta};
use core_text::{Atom, Buffer, Fragment, Line};
use tracing::{debug, trace, warn};

#[derive(Debug)]
pub struct TextArea {
    name: String,
    title: Vec<Line>,
    buffer: Buffer,
    caret: usize,
    anchor: usize,
    /// Column kept across consecutive vertical moves.
    goal: Option<usize>,
    history: History,
}

impl Default for TextArea {
    fn default() -> Self {
        Self::new()
    }
}

impl TextArea {
    pub fn new() -> Self {
        Self {
            name: "TextArea".into(),
            title: Vec::new(),
            buffer: Buffer::new(),
            caret: 0,
            anchor: 0,
            goal: None,
            history: History::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_title(mut self, title: impl IntoIterator<Item = Line>) -> Self {
        self.title.extend(title);
        self
    }

    /// Initial content; the caret starts at its end. Not recorded in history.
    pub fn with_text(mut self, text: &str) -> Self {
        self.buffer = Buffer::from_text(text);
        self.caret = self.buffer.len();
        self.anchor = self.caret;
        self
    }

    pub fn with_history(mut self, history: History) -> Self {
        self.history = history;
        self
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Ordered `start..end` of the active selection.
    pub fn selection(&self) -> Option<(usize, usize)> {
        (self.caret != self.anchor)
            .then(|| (self.caret.min(self.anchor), self.caret.max(self.anchor)))
    }

    pub fn select(&mut self, anchor: usize, caret: usize) {
        self.history.seal();
        self.anchor = anchor.min(self.buffer.len());
        self.caret = caret.min(self.buffer.len());
    }

    fn place(&mut self, caret: usize) {
        self.caret = caret;
        self.anchor = caret;
    }

    fn insert(&mut self, text: &str) {
        let (start, end) = self.selection().unwrap_or((self.caret, self.caret));
        let deleted = self.buffer.slice(start, end);
        self.history
            .push_event(ActionKind::Insert, start, end, &deleted, text);
        if self.buffer.splice(start, end, text).is_some() {
            self.place(start + text.chars().count());
        }
    }

    fn remove(&mut self, kind: ActionKind, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let deleted = self.buffer.slice(start, end);
        self.history.push_event(kind, start, end, &deleted, "");
        if self.buffer.splice(start, end, "").is_some() {
            self.place(start);
        }
    }

    fn delete_backward(&mut self, word: bool) {
        let (start, end) = match self.selection() {
            Some(range) => range,
            None if word => (self.buffer.word_start_before(self.caret), self.caret),
            None => (self.caret.saturating_sub(1), self.caret),
        };
        self.remove(ActionKind::DeleteBackward, start, end);
    }

    fn delete_forward(&mut self, word: bool) {
        let (start, end) = match self.selection() {
            Some(range) => range,
            None if word => (self.caret, self.buffer.word_end_after(self.caret)),
            None => (self.caret, (self.caret + 1).min(self.buffer.len())),
        };
        self.remove(ActionKind::DeleteForward, start, end);
    }

    fn step(&mut self, forward: bool, mods: KeyModifiers) {
        let extend = mods.contains(KeyModifiers::SHIFT);
        if !extend && let Some((start, end)) = self.selection() {
            self.history.seal();
            self.place(if forward { end } else { start });
            return;
        }
        let target = match (forward, mods.contains(KeyModifiers::CTRL)) {
            (false, false) => self.caret.saturating_sub(1),
            (false, true) => self.buffer.word_start_before(self.caret),
            (true, false) => (self.caret + 1).min(self.buffer.len()),
            (true, true) => self.buffer.word_end_after(self.caret),
        };
        self.move_caret(target, extend);
    }

    fn vertical(&mut self, down: bool, extend: bool) {
        let column = self.goal.unwrap_or_else(|| self.buffer.column(self.caret));
        let line = if down {
            self.buffer.next_line_start(self.caret)
        } else {
            self.buffer.prev_line_start(self.caret)
        };
        if let Some(start) = line {
            let target = self.buffer.clamp_to_line(start, column);
            self.move_caret(target, extend);
        }
        self.goal = Some(column);
    }

    /// Caret movement without an edit. Pending history is sealed so later
    /// edits never coalesce with ones made at another position.
    fn move_caret(&mut self, target: usize, extend: bool) {
        self.history.seal();
        self.caret = target;
        if !extend {
            self.anchor = target;
        }
    }

    fn undo(&mut self) {
        let Some(delta) = self.history.undo() else {
            return;
        };
        self.apply(&delta, "undo");
    }

    fn redo(&mut self) {
        let Some(delta) = self.history.redo() else {
            return;
        };
        self.apply(&delta, "redo");
    }

    fn apply(&mut self, delta: &core_state::Delta, op: &'static str) {
        if apply_delta(&mut self.buffer, delta) {
            self.place(delta.caret());
            trace!(target: "screens.textarea", op, start = delta.start, end = delta.end, len = self.buffer.len(), "delta_applied");
        } else {
            warn!(target: "screens.textarea", op, start = delta.start, end = delta.end, len = self.buffer.len(), "delta_out_of_range");
        }
    }

    /// One Line per buffer line, with the selection or the caret cell
    /// highlighted. A caret at a line end is shown as a trailing cell.
    fn render_lines(&self) -> Vec<Line> {
        let selection = self.selection();
        let highlighted = |at: usize| match selection {
            Some((start, end)) => at >= start && at < end,
            None => at == self.caret,
        };
        let mut out = Vec::new();
        let mut start = 0;
        for chars in self.buffer.lines() {
            let end = start + chars.len();
            let mut line = Line::new(Vec::new());
            let mut run = String::new();
            let mut run_selected = false;
            for (i, ch) in chars.iter().enumerate() {
                let selected = highlighted(start + i);
                if selected != run_selected && !run.is_empty() {
                    line.push(fragment(std::mem::take(&mut run), run_selected));
                }
                run_selected = selected;
                run.push(if *ch == '\t' { ' ' } else { *ch });
            }
            if !run.is_empty() {
                line.push(fragment(run, run_selected));
            }
            if selection.is_none() && self.caret == end {
                line.push(Fragment::styled(" ", Atom::SELECTED));
            }
            out.push(line);
            start = end + 1;
        }
        out
    }

    /// Logical body offset of the caret over the rendered lines.
    fn caret_offset(&self, lines: &[Line]) -> usize {
        let row = self.buffer.chars()[..self.caret]
            .iter()
            .filter(|c| **c == '\n')
            .count();
        let before: usize = lines[..row.min(lines.len())]
            .iter()
            .map(|l| l.width().max(1))
            .sum();
        before + self.buffer.column(self.caret) + 1
    }
}

fn fragment(text: String, selected: bool) -> Fragment {
    if selected {
        Fragment::styled(text, Atom::SELECTED)
    } else {
        Fragment::new(text)
    }
}

impl Screen for TextArea {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn definition(&self) -> Definition {
        Definition {
            consumes: KeySet::all_except([KeyCode::Esc]),
        }
    }

    fn update(&mut self, state: &UiState, event: &ScreenEvent) -> ScreenResult {
        let mods = event.key.mods;
        let vertical = matches!(event.key.code, KeyCode::Up | KeyCode::Down);
        match event.key.code {
            KeyCode::Char(ch) if !mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT) => {
                self.insert(ch.encode_utf8(&mut [0; 4]));
            }
            KeyCode::Enter => self.insert("\n"),
            KeyCode::Tab => self.insert("\t"),
            KeyCode::Backspace => self.delete_backward(false),
            KeyCode::DeleteWordBackward => self.delete_backward(true),
            KeyCode::Delete => self.delete_forward(false),
            KeyCode::DeleteWordForward => self.delete_forward(true),
            KeyCode::Left => self.step(false, mods),
            KeyCode::Right => self.step(true, mods),
            KeyCode::Up => self.vertical(false, mods.contains(KeyModifiers::SHIFT)),
            KeyCode::Down => self.vertical(true, mods.contains(KeyModifiers::SHIFT)),
            KeyCode::Home => {
                let target = self.buffer.line_start(self.caret);
                self.move_caret(target, mods.contains(KeyModifiers::SHIFT));
            }
            KeyCode::End => {
                let target = self.buffer.line_end(self.caret);
                self.move_caret(target, mods.contains(KeyModifiers::SHIFT));
            }
            KeyCode::Undo => self.undo(),
            KeyCode::Redo => self.redo(),
            _ => {}
        }
        if !vertical {
            self.goal = None;
        }
        debug!(target: "screens.textarea", caret = self.caret, len = self.buffer.len(), "update");

        let mut state = *state;
        state.cursor.cursor = self.caret_offset(&self.render_lines());
        ScreenResult::from_state(state)
    }

    fn view(&mut self, state: &UiState) -> ViewModel {
        let mut vm = ViewModel::from_state(state);
        vm.header.push(EagerDrawable::new(self.title.clone()));
        let lines = self.render_lines();
        let offset = self.caret_offset(&lines);
        vm.body.push(LazyDrawable::new(lines));
        vm.follow_cursor(offset);
        vm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::KeyEvent;
    use core_model::Winsize;
    use core_state::ManualClock;
    use pretty_assertions::assert_eq;

    fn area(text: &str) -> (TextArea, ManualClock) {
        let clock = ManualClock::new(0);
        let t = TextArea::new()
            .with_text(text)
            .with_history(History::with_clock(clock.clone()));
        (t, clock)
    }

    fn key(t: &mut TextArea, code: KeyCode, mods: KeyModifiers) {
        t.update(
            &UiState::default(),
            &ScreenEvent::new(KeyEvent::new(code, mods)),
        );
    }

    fn press(t: &mut TextArea, code: KeyCode) {
        key(t, code, KeyModifiers::empty());
    }

    fn typed(t: &mut TextArea, text: &str) {
        for ch in text.chars() {
            press(t, KeyCode::Char(ch));
        }
    }

    fn body(t: &mut TextArea) -> Vec<Line> {
        let mut vm = t.view(&UiState::default());
        vm.body.init(Winsize::new(20, 40));
        vm.body.drain_all().unwrap()
    }

    #[test]
    fn typing_and_undo_redo() {
        let (mut t, _clock) = area("");
        typed(&mut t, "hello world");
        assert_eq!(t.text(), "hello world");
        press(&mut t, KeyCode::Undo);
        assert_eq!(t.text(), "hello");
        assert_eq!(t.caret(), 5);
        press(&mut t, KeyCode::Undo);
        assert_eq!(t.text(), "");
        press(&mut t, KeyCode::Redo);
        assert_eq!(t.text(), "hello");
        assert_eq!(t.caret(), 5);
    }

    #[test]
    fn typing_over_selection_is_one_undo_step() {
        let (mut t, _clock) = area("abcdef");
        t.select(1, 4);
        typed(&mut t, "XY");
        assert_eq!(t.text(), "aXYef");
        assert_eq!(t.caret(), 3);
        press(&mut t, KeyCode::Undo);
        assert_eq!(t.text(), "abcdef");
        assert_eq!(t.caret(), 4);
    }

    #[test]
    fn backspace_run_coalesces() {
        let (mut t, _clock) = area("abcdef");
        for _ in 0..3 {
            press(&mut t, KeyCode::Backspace);
        }
        assert_eq!(t.text(), "abc");
        press(&mut t, KeyCode::Undo);
        assert_eq!(t.text(), "abcdef");
        assert_eq!(t.caret(), 6);
    }

    #[test]
    fn debounce_splits_events() {
        let (mut t, clock) = area("");
        typed(&mut t, "ab");
        clock.advance(5_000);
        typed(&mut t, "cd");
        press(&mut t, KeyCode::Undo);
        assert_eq!(t.text(), "ab");
    }

    #[test]
    fn word_deletes() {
        let (mut t, _clock) = area("one two three");
        press(&mut t, KeyCode::DeleteWordBackward);
        assert_eq!(t.text(), "one two ");
        press(&mut t, KeyCode::Home);
        press(&mut t, KeyCode::DeleteWordForward);
        assert_eq!(t.text(), " two ");
        press(&mut t, KeyCode::Undo);
        assert_eq!(t.text(), "one two ");
    }

    #[test]
    fn delete_forward_and_selection_delete() {
        let (mut t, _clock) = area("abc");
        press(&mut t, KeyCode::Home);
        press(&mut t, KeyCode::Delete);
        assert_eq!(t.text(), "bc");
        key(&mut t, KeyCode::Right, KeyModifiers::SHIFT);
        key(&mut t, KeyCode::Right, KeyModifiers::SHIFT);
        assert_eq!(t.selection(), Some((0, 2)));
        press(&mut t, KeyCode::Backspace);
        assert_eq!(t.text(), "");
        press(&mut t, KeyCode::Undo);
        assert_eq!(t.text(), "bc");
    }

    #[test]
    fn deletes_around_a_move_undo_separately() {
        let (mut t, _clock) = area("AxByC");
        press(&mut t, KeyCode::Home);
        press(&mut t, KeyCode::Right);
        press(&mut t, KeyCode::Delete);
        press(&mut t, KeyCode::Right);
        press(&mut t, KeyCode::Delete);
        assert_eq!(t.text(), "ABC");

        press(&mut t, KeyCode::Undo);
        assert_eq!(t.text(), "AByC");
        press(&mut t, KeyCode::Undo);
        assert_eq!(t.text(), "AxByC");
        press(&mut t, KeyCode::Redo);
        press(&mut t, KeyCode::Redo);
        assert_eq!(t.text(), "ABC");
    }

    #[test]
    fn typing_after_a_round_trip_move_is_a_new_event() {
        let (mut t, _clock) = area("");
        typed(&mut t, "ab");
        press(&mut t, KeyCode::Left);
        press(&mut t, KeyCode::Right);
        typed(&mut t, "cd");
        press(&mut t, KeyCode::Undo);
        assert_eq!(t.text(), "ab");
        assert_eq!(t.caret(), 2);
    }

    #[test]
    fn movement_collapses_selection_and_keeps_column() {
        let (mut t, _clock) = area("abcdef\nxy\nlonger line");
        t.select(0, 3);
        press(&mut t, KeyCode::Left);
        assert_eq!((t.caret(), t.selection()), (0, None));

        press(&mut t, KeyCode::End);
        assert_eq!(t.caret(), 6);
        press(&mut t, KeyCode::Down);
        assert_eq!(t.caret(), 9);
        press(&mut t, KeyCode::Down);
        assert_eq!(t.caret(), 16);
        press(&mut t, KeyCode::Up);
        press(&mut t, KeyCode::Up);
        assert_eq!(t.caret(), 6);

        key(&mut t, KeyCode::Left, KeyModifiers::CTRL);
        assert_eq!(t.caret(), 0);
    }

    #[test]
    fn modified_chars_do_not_insert() {
        let (mut t, _clock) = area("");
        key(&mut t, KeyCode::Char('x'), KeyModifiers::CTRL);
        key(&mut t, KeyCode::Char('y'), KeyModifiers::ALT);
        key(&mut t, KeyCode::Char('Z'), KeyModifiers::SHIFT);
        assert_eq!(t.text(), "Z");
    }

    #[test]
    fn view_highlights_caret_and_selection() {
        let (mut t, _clock) = area("ab\ncd");
        let lines = body(&mut t);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text.last(), Some(&Fragment::styled(" ", Atom::SELECTED)));

        t.select(1, 4);
        let lines = body(&mut t);
        assert_eq!(
            lines[0].text,
            vec![Fragment::new("a"), Fragment::styled("b", Atom::SELECTED)]
        );
        assert_eq!(
            lines[1].text,
            vec![Fragment::styled("c", Atom::SELECTED), Fragment::new("d")]
        );
    }

    #[test]
    fn view_follows_caret() {
        let (mut t, _clock) = area("\nabc\nde");
        let vm = t.view(&UiState::default());
        // blank line (1) + "abc" (3) + column 2 + 1
        assert!(vm.cursor.enabled);
        assert_eq!(vm.cursor.cursor, 7);
    }

    #[test]
    fn consumes_everything_but_escape() {
        let t = TextArea::new();
        let consumes = t.definition().consumes;
        assert!(consumes.contains(&KeyCode::Char('b')));
        assert!(consumes.contains(&KeyCode::Left));
        assert!(!consumes.contains(&KeyCode::Esc));
    }
}
