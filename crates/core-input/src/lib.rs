//! Blocking input thread and crossterm key decoding.

mod service;
pub use service::{EventSource, InputThread, TerminalEvents, spawn_input_thread};

use core_events::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::event::{KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyModifiers as CMods};

pub(crate) fn map_mods(m: CMods) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if m.contains(CMods::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if m.contains(CMods::ALT) {
        out |= KeyModifiers::ALT;
    }
    if m.contains(CMods::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}

/// Control chords with a dedicated logical action.
fn control_action(ch: char) -> Option<KeyCode> {
    Some(match ch.to_ascii_lowercase() {
        'a' => KeyCode::Home,
        'e' => KeyCode::End,
        'c' => KeyCode::Exit,
        'w' => KeyCode::DeleteWordBackward,
        'd' => KeyCode::DeleteWordForward,
        'g' => KeyCode::Undo,
        't' => KeyCode::Redo,
        _ => return None,
    })
}

/// Decode a terminal key into the logical key surface. Never fails:
/// anything unrecognized becomes [`KeyCode::Unknown`].
pub fn map_key(key: &CKeyEvent) -> KeyEvent {
    let mods = map_mods(key.modifiers);
    let code = match key.code {
        CKeyCode::Char(ch) if mods.contains(KeyModifiers::CTRL) => {
            if let Some(action) = control_action(ch) {
                return KeyEvent::new(action, mods - KeyModifiers::CTRL);
            }
            KeyCode::Char(ch)
        }
        CKeyCode::Char('d') if mods.contains(KeyModifiers::ALT) => KeyCode::DeleteWordForward,
        CKeyCode::Char(ch) => KeyCode::Char(ch),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Tab => KeyCode::Tab,
        CKeyCode::BackTab => return KeyEvent::new(KeyCode::Tab, mods | KeyModifiers::SHIFT),
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Delete => KeyCode::Delete,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        CKeyCode::Esc => KeyCode::Esc,
        _ => KeyCode::Unknown,
    };
    KeyEvent::new(code, mods)
}
