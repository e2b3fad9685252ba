//! Text-edit history: action coalescing and undo/redo deltas.
//!
//! Keystroke-level [`TextAction`]s queue up as pending actions. A flush merges
//! contiguous actions of the same kind into durable [`TextEvent`]s, which form
//! a bounded linear history with an undo/redo cursor.
//!
//! Flush boundaries (checked before a new action is queued, only when actions
//! are pending):
//! - the inserted text contains a space or newline,
//! - the action kind differs from the last pending one,
//! - the debounce window elapsed since the last pending action.
//!
//! `undo`/`redo` always flush first, so a half-typed word is undoable.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use core_text::Buffer;
use tracing::trace;

/// Maximum number of coalesced events retained.
pub const EVENT_LIMIT: usize = 200;
/// Idle time after which the next keystroke starts a new event.
pub const DEBOUNCE_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Insert,
    DeleteBackward,
    DeleteForward,
}

/// One keystroke-level edit.
///
/// `start..end` is the range the edit replaced. For `DeleteBackward`, `start`
/// is the offset of the removed code point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAction {
    pub kind: ActionKind,
    pub start: usize,
    pub end: usize,
    pub deleted: String,
    pub inserted: String,
    pub timestamp: u64,
}

/// A coalesced, undoable edit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextEvent {
    pub start: usize,
    pub inserted: String,
    pub deleted: String,
}

/// Splice replacing `start..end` of a buffer with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delta {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl Delta {
    /// Caret position right after the spliced text.
    pub fn caret(&self) -> usize {
        self.start + self.text.chars().count()
    }
}

/// Millisecond time source used for debouncing.
pub trait Clock: Send {
    fn now_ms(&self) -> u64;
}

/// Monotonic clock measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Clock advanced by hand. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::Relaxed);
    }

    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryLimits {
    pub event_limit: usize,
    pub debounce_ms: u64,
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self {
            event_limit: EVENT_LIMIT,
            debounce_ms: DEBOUNCE_MS,
        }
    }
}

pub struct History {
    clock: Box<dyn Clock>,
    limits: HistoryLimits,
    actions: Vec<TextAction>,
    events: Vec<TextEvent>,
    cursor: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("limits", &self.limits)
            .field("pending", &self.actions.len())
            .field("events", &self.events.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_clock(SystemClock::default())
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            limits: HistoryLimits::default(),
            actions: Vec::new(),
            events: Vec::new(),
            cursor: 0,
        }
    }

    pub fn with_limits(mut self, limits: HistoryLimits) -> Self {
        self.limits = HistoryLimits {
            event_limit: limits.event_limit.max(1),
            ..limits
        };
        self
    }

    pub fn limits(&self) -> HistoryLimits {
        self.limits
    }

    pub fn events(&self) -> &[TextEvent] {
        &self.events
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of queued, not yet coalesced actions.
    pub fn pending(&self) -> usize {
        self.actions.len()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0 || !self.actions.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        self.actions.is_empty() && self.cursor < self.events.len()
    }

    /// Record an edit. Any redo tail is discarded.
    pub fn push_event(
        &mut self,
        kind: ActionKind,
        start: usize,
        end: usize,
        deleted: &str,
        inserted: &str,
    ) {
        if self.cursor < self.events.len() {
            trace!(target: "state.history", dropped = self.events.len() - self.cursor, "redo_tail_truncated");
            self.events.truncate(self.cursor);
        }
        let now = self.clock.now_ms();
        if self.should_flush(kind, inserted, now) {
            self.flush();
        }
        self.actions.push(TextAction {
            kind,
            start,
            end,
            deleted: deleted.to_string(),
            inserted: inserted.to_string(),
            timestamp: now,
        });
    }

    /// Close the pending actions into events so the next edit opens a new
    /// group. Editors call this whenever the caret moves without an edit.
    pub fn seal(&mut self) {
        self.flush();
    }

    pub fn undo(&mut self) -> Option<Delta> {
        self.flush();
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        let event = &self.events[self.cursor];
        trace!(target: "state.history", cursor = self.cursor, events = self.events.len(), "undo");
        Some(Delta {
            start: event.start,
            end: event.start + event.inserted.chars().count(),
            text: event.deleted.clone(),
        })
    }

    pub fn redo(&mut self) -> Option<Delta> {
        self.flush();
        let event = self.events.get(self.cursor)?;
        let delta = Delta {
            start: event.start,
            end: event.start + event.deleted.chars().count(),
            text: event.inserted.clone(),
        };
        self.cursor += 1;
        trace!(target: "state.history", cursor = self.cursor, events = self.events.len(), "redo");
        Some(delta)
    }

    fn should_flush(&self, kind: ActionKind, inserted: &str, now: u64) -> bool {
        let Some(last) = self.actions.last() else {
            return false;
        };
        inserted.contains([' ', '\n'])
            || last.kind != kind
            || now.saturating_sub(last.timestamp) >= self.limits.debounce_ms
    }

    fn flush(&mut self) {
        if self.actions.is_empty() {
            return;
        }
        let merged = merge_actions(&self.actions);
        trace!(target: "state.history", actions = self.actions.len(), events = merged.len(), "flush");
        self.actions.clear();
        self.events.extend(merged);
        self.cursor = self.events.len();
        self.limit_events();
    }

    fn limit_events(&mut self) {
        let excess = self.events.len().saturating_sub(self.limits.event_limit);
        if excess == 0 {
            return;
        }
        self.events.drain(..excess);
        self.cursor = self.cursor.saturating_sub(excess);
        trace!(target: "state.history", evicted = excess, cursor = self.cursor, "events_trimmed");
    }
}

struct Group<'a> {
    kind: ActionKind,
    origin: usize,
    probe: usize,
    extent: usize,
    inserted_len: usize,
    deleted: Vec<&'a str>,
    inserted: Vec<&'a str>,
}

impl<'a> Group<'a> {
    fn open(action: &'a TextAction) -> Self {
        Self {
            kind: action.kind,
            origin: action.start,
            probe: action.start,
            extent: action.end,
            inserted_len: action.inserted.chars().count(),
            deleted: vec![&action.deleted],
            inserted: vec![&action.inserted],
        }
    }

    fn accepts(&self, action: &TextAction) -> bool {
        if action.kind != self.kind {
            return false;
        }
        match action.kind {
            ActionKind::Insert => self.origin + self.inserted_len == action.start,
            ActionKind::DeleteBackward => action.start == self.probe.saturating_sub(1),
            ActionKind::DeleteForward => action.start == self.probe + 1,
        }
    }

    fn extend(&mut self, action: &'a TextAction) {
        self.probe = action.start;
        self.inserted_len += action.inserted.chars().count();
        self.deleted.push(&action.deleted);
        self.inserted.push(&action.inserted);
    }

    fn forge(self) -> TextEvent {
        let start = self.origin.min(self.probe).min(self.extent);
        let join = |parts: Vec<&str>| -> String {
            match self.kind {
                ActionKind::DeleteBackward => parts.into_iter().rev().collect(),
                ActionKind::Insert | ActionKind::DeleteForward => parts.concat(),
            }
        };
        TextEvent {
            start,
            inserted: join(self.inserted),
            deleted: join(self.deleted),
        }
    }
}

/// Coalesce pending actions; every discontinuity starts a new event.
fn merge_actions(actions: &[TextAction]) -> Vec<TextEvent> {
    let mut events = Vec::new();
    let mut group: Option<Group<'_>> = None;
    for action in actions {
        if let Some(g) = group.as_mut()
            && g.accepts(action)
        {
            g.extend(action);
            continue;
        }
        if let Some(done) = group.replace(Group::open(action)) {
            events.push(done.forge());
        }
    }
    events.extend(group.map(Group::forge));
    events
}

/// Apply `delta` to `buffer`. Out-of-range deltas are ignored and reported
/// with `false`.
pub fn apply_delta(buffer: &mut Buffer, delta: &Delta) -> bool {
    buffer.splice(delta.start, delta.end, &delta.text).is_some()
}
