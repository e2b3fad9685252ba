//! Decoded key surface and the input queue shared by the input thread and the
//! main loop.

use std::fmt;
use std::sync::atomic::AtomicU64;

use crossbeam_channel::{Receiver, Sender, bounded};

// -------------------------------------------------------------------------------------------------
// Channel Policy
// -------------------------------------------------------------------------------------------------
// Single producer (the blocking input thread) and single consumer (the main loop). The producer
// uses a blocking `send`, parking until space is available rather than dropping keys. Dropping the
// sender closes the queue; the main loop treats a disconnected queue as the shutdown signal.
// -------------------------------------------------------------------------------------------------
pub const EVENT_CHANNEL_CAP: usize = 8192;

// -------------------------------------------------------------------------------------------------
// Telemetry
// -------------------------------------------------------------------------------------------------
// Relaxed atomic counters, logged on shutdown and inspected by tests.
// -------------------------------------------------------------------------------------------------
pub static CHANNEL_SEND_FAILURES: AtomicU64 = AtomicU64::new(0);
pub static KEYPRESS_TOTAL: AtomicU64 = AtomicU64::new(0);
pub static KEYPRESS_UNKNOWN: AtomicU64 = AtomicU64::new(0);
pub static INPUT_THREAD_STARTS: AtomicU64 = AtomicU64::new(0);
pub static INPUT_STOP_EXIT: AtomicU64 = AtomicU64::new(0);
pub static INPUT_STOP_CHANNEL: AtomicU64 = AtomicU64::new(0);
pub static INPUT_STOP_ERROR: AtomicU64 = AtomicU64::new(0);

/// Event consumed by the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
}

/// Bounded queue sized by [`EVENT_CHANNEL_CAP`].
pub fn channel() -> (Sender<Event>, Receiver<Event>) {
    bounded(EVENT_CHANNEL_CAP)
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

/// Logical key actions consumed by screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    DeleteWordBackward,
    DeleteWordForward,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Esc,
    Undo,
    Redo,
    Exit,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    pub fn char(ch: char) -> Self {
        Self::plain(KeyCode::Char(ch))
    }

    /// Printable character carried by the event, if any.
    pub fn as_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(ch) => Some(ch),
            _ => None,
        }
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        KeyEvent::plain(code)
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.code, self.mods)
    }
}

/// Keys a screen handles itself, shielding them from wrapping screens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeySet {
    #[default]
    None,
    All,
    Only(Vec<KeyCode>),
    /// Everything except the listed keys.
    AllExcept(Vec<KeyCode>),
}

impl KeySet {
    pub fn only(codes: impl IntoIterator<Item = KeyCode>) -> Self {
        KeySet::Only(codes.into_iter().collect())
    }

    pub fn all_except(codes: impl IntoIterator<Item = KeyCode>) -> Self {
        KeySet::AllExcept(codes.into_iter().collect())
    }

    pub fn contains(&self, code: &KeyCode) -> bool {
        match self {
            KeySet::None => false,
            KeySet::All => true,
            KeySet::Only(codes) => codes.contains(code),
            KeySet::AllExcept(codes) => !codes.contains(code),
        }
    }
}
