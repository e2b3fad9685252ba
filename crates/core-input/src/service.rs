use std::io;
use std::sync::atomic::Ordering;
use std::thread::{self, JoinHandle};

use core_events::{
    CHANNEL_SEND_FAILURES, Event, INPUT_STOP_CHANNEL, INPUT_STOP_ERROR, INPUT_STOP_EXIT,
    INPUT_THREAD_STARTS, KEYPRESS_TOTAL, KEYPRESS_UNKNOWN, KeyCode,
};
use crossbeam_channel::Sender;
use crossterm::event::{Event as CEvent, KeyEventKind as CKind};
use tracing::{info, trace, warn};

use crate::map_key;

/// Blocking source of terminal events. `Ok(None)` means the source is exhausted.
pub trait EventSource: Send + 'static {
    fn next_event(&mut self) -> io::Result<Option<CEvent>>;
}

/// The process terminal, read through crossterm.
#[derive(Debug, Default)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn next_event(&mut self) -> io::Result<Option<CEvent>> {
        crossterm::event::read().map(Some)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ExitReason {
    Running,
    ExitKey,
    ChannelClosed,
    SourceEnded,
    SourceError,
}

impl ExitReason {
    fn as_str(&self) -> &'static str {
        match self {
            ExitReason::Running => "running",
            ExitReason::ExitKey => "exit_key",
            ExitReason::ChannelClosed => "channel_closed",
            ExitReason::SourceEnded => "source_ended",
            ExitReason::SourceError => "source_error",
        }
    }
}

/// Reads events, decodes keys and forwards them until an exit key, a read
/// error or a closed queue. Dropping the sender on return closes the queue.
pub struct InputThread<S: EventSource> {
    sender: Sender<Event>,
    source: S,
    exit_reason: ExitReason,
    source_error: Option<io::ErrorKind>,
}

impl<S: EventSource> InputThread<S> {
    pub fn new(sender: Sender<Event>, source: S) -> Self {
        Self {
            sender,
            source,
            exit_reason: ExitReason::Running,
            source_error: None,
        }
    }

    pub fn run(mut self) {
        info!(target: "input.thread", "input_thread_started");
        INPUT_THREAD_STARTS.fetch_add(1, Ordering::Relaxed);
        while self.exit_reason == ExitReason::Running {
            match self.source.next_event() {
                Ok(Some(CEvent::Key(key))) => {
                    if matches!(key.kind, CKind::Press | CKind::Repeat) {
                        self.forward_key(map_key(&key));
                    }
                }
                Ok(Some(CEvent::Resize(w, h))) => {
                    trace!(target: "input.event", w, h, "resize");
                    self.send(Event::Resize(w, h));
                }
                Ok(Some(_)) => {}
                Ok(None) => self.exit_reason = ExitReason::SourceEnded,
                Err(err) => {
                    self.source_error = Some(err.kind());
                    self.exit_reason = ExitReason::SourceError;
                }
            }
        }

        match self.exit_reason {
            ExitReason::ExitKey => INPUT_STOP_EXIT.fetch_add(1, Ordering::Relaxed),
            ExitReason::ChannelClosed => INPUT_STOP_CHANNEL.fetch_add(1, Ordering::Relaxed),
            ExitReason::SourceError => INPUT_STOP_ERROR.fetch_add(1, Ordering::Relaxed),
            ExitReason::SourceEnded | ExitReason::Running => 0,
        };
        if let Some(kind) = self.source_error {
            warn!(target: "input.thread", error_kind = ?kind, "input_read_error");
        }
        info!(target: "input.thread", reason = self.exit_reason.as_str(), "input_thread_stopped");
    }

    fn forward_key(&mut self, key: core_events::KeyEvent) {
        trace!(target: "input.event", code = ?key.code, mods = ?key.mods, "keypress");
        if key.code == KeyCode::Unknown {
            KEYPRESS_UNKNOWN.fetch_add(1, Ordering::Relaxed);
        }
        if !self.send(Event::Key(key)) {
            return;
        }
        KEYPRESS_TOTAL.fetch_add(1, Ordering::Relaxed);
        if key.code == KeyCode::Exit {
            self.exit_reason = ExitReason::ExitKey;
        }
    }

    fn send(&mut self, event: Event) -> bool {
        match self.sender.send(event) {
            Ok(()) => true,
            Err(_) => {
                CHANNEL_SEND_FAILURES.fetch_add(1, Ordering::Relaxed);
                self.exit_reason = ExitReason::ChannelClosed;
                false
            }
        }
    }
}

/// Spawn the dedicated input thread.
pub fn spawn_input_thread<S: EventSource>(
    sender: Sender<Event>,
    source: S,
) -> anyhow::Result<JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name("lattice-input".into())
        .spawn(move || InputThread::new(sender, source).run())?;
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::{KeyEvent, KeyModifiers};
    use crossterm::event::{KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyModifiers as CMods};
    use std::collections::VecDeque;

    struct Scripted(VecDeque<io::Result<CEvent>>);

    impl EventSource for Scripted {
        fn next_event(&mut self) -> io::Result<Option<CEvent>> {
            self.0.pop_front().transpose()
        }
    }

    fn press(code: CKeyCode, mods: CMods) -> io::Result<CEvent> {
        Ok(CEvent::Key(CKeyEvent::new(code, mods)))
    }

    fn run_scenario(events: Vec<io::Result<CEvent>>) -> Vec<Event> {
        let (tx, rx) = core_events::channel();
        InputThread::new(tx, Scripted(events.into())).run();
        rx.iter().collect()
    }

    #[test]
    fn forwards_keys_and_resizes() {
        let out = run_scenario(vec![
            press(CKeyCode::Char('a'), CMods::NONE),
            Ok(CEvent::Resize(80, 24)),
            press(CKeyCode::Char('g'), CMods::CONTROL),
        ]);
        assert_eq!(
            out,
            vec![
                Event::Key(KeyEvent::char('a')),
                Event::Resize(80, 24),
                Event::Key(KeyEvent::plain(KeyCode::Undo)),
            ]
        );
    }

    #[test]
    fn exit_key_stops_after_forwarding() {
        let out = run_scenario(vec![
            press(CKeyCode::Char('c'), CMods::CONTROL),
            press(CKeyCode::Char('z'), CMods::NONE),
        ]);
        assert_eq!(out, vec![Event::Key(KeyEvent::plain(KeyCode::Exit))]);
    }

    #[test]
    fn read_error_closes_queue() {
        let before = INPUT_STOP_ERROR.load(Ordering::Relaxed);
        let out = run_scenario(vec![
            press(CKeyCode::Left, CMods::SHIFT),
            Err(io::Error::other("tty gone")),
            press(CKeyCode::Char('z'), CMods::NONE),
        ]);
        assert_eq!(
            out,
            vec![Event::Key(KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT))]
        );
        assert!(INPUT_STOP_ERROR.load(Ordering::Relaxed) > before);
    }

    #[test]
    fn closed_queue_ends_thread() {
        let (tx, rx) = core_events::channel();
        drop(rx);
        let before = INPUT_STOP_CHANNEL.load(Ordering::Relaxed);
        let events: VecDeque<_> = vec![press(CKeyCode::Char('a'), CMods::NONE)].into();
        InputThread::new(tx, Scripted(events)).run();
        assert!(INPUT_STOP_CHANNEL.load(Ordering::Relaxed) > before);
    }

    #[test]
    fn spawned_thread_joins() {
        let (tx, rx) = core_events::channel();
        let handle = spawn_input_thread(tx, Scripted(VecDeque::new())).unwrap();
        handle.join().unwrap();
        assert!(rx.recv().is_err());
    }
}
