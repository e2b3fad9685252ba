//! Main loop: size the frame, draw when dirty, feed one key per tick.

use std::fmt;
use std::sync::atomic::Ordering;
use std::time::Duration;

use anyhow::Result;
use core_config::{Config, ConfigContext};
use core_events::{
    CHANNEL_SEND_FAILURES, Event, INPUT_STOP_CHANNEL, INPUT_STOP_ERROR, INPUT_STOP_EXIT,
    KEYPRESS_TOTAL, KEYPRESS_UNKNOWN, KeyCode, KeyEvent,
};
use core_model::{Screen, ScreenEvent, Winsize};
use core_render::{FrameBox, compose, paint_frame};
use core_state::UiState;
use core_terminal::TerminalBackend;
use core_text::Line;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use tracing::{debug, error, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    ExitKey,
    ChannelClosed,
}

impl ShutdownReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::ExitKey => "exit_key",
            ShutdownReason::ChannelClosed => "channel_closed",
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn log_shutdown_stage(reason: ShutdownReason, stage: &'static str) {
    info!(
        target: "runtime.shutdown",
        reason = reason.as_str(),
        stage = stage,
        "shutdown_stage"
    );
}

/// Input counters accumulated over the session.
pub fn log_input_telemetry() {
    info!(
        target: "runtime.shutdown",
        keypress_total = KEYPRESS_TOTAL.load(Ordering::Relaxed),
        keypress_unknown = KEYPRESS_UNKNOWN.load(Ordering::Relaxed),
        send_failures = CHANNEL_SEND_FAILURES.load(Ordering::Relaxed),
        stop_exit = INPUT_STOP_EXIT.load(Ordering::Relaxed),
        stop_channel = INPUT_STOP_CHANNEL.load(Ordering::Relaxed),
        stop_error = INPUT_STOP_ERROR.load(Ordering::Relaxed),
        "input_telemetry"
    );
}

pub struct Runtime {
    screen: Box<dyn Screen>,
    state: UiState,
    config: Config,
    frame: Option<FrameBox>,
    dirty: bool,
}

impl Runtime {
    pub fn new(screen: Box<dyn Screen>, config: Config) -> Self {
        Self {
            screen,
            state: UiState::default(),
            config,
            frame: None,
            dirty: true,
        }
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn screen_name(&self) -> String {
        self.screen.name()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn tick(&self) -> Duration {
        Duration::from_millis(self.config.file.runtime.tick_ms.max(1))
    }

    pub fn run<B: TerminalBackend>(
        &mut self,
        backend: &mut B,
        events: &Receiver<Event>,
    ) -> Result<ShutdownReason> {
        let span = tracing::debug_span!(target: "runtime", "event_loop");
        let _enter = span.enter();
        loop {
            self.resize(backend.size()?);
            if self.dirty {
                let frame = self.draw();
                backend.write_frame(&frame)?;
            }
            match events.recv_timeout(self.tick()) {
                Ok(Event::Key(key)) if key.code == KeyCode::Exit => {
                    return Ok(ShutdownReason::ExitKey);
                }
                Ok(Event::Key(key)) => self.handle_key(key),
                Ok(Event::Resize(cols, rows)) => {
                    trace!(target: "runtime", rows, cols, "resize_event");
                    self.dirty = true;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return Ok(ShutdownReason::ChannelClosed),
            }
        }
    }

    /// Recompute the frame box when the terminal size changed.
    pub fn resize(&mut self, outer: Winsize) {
        if self.frame.map(|f| f.outer()) == Some(outer) {
            return;
        }
        let margins = self
            .config
            .apply_context(ConfigContext::new(outer.rows, outer.cols));
        let frame = FrameBox::new(outer, margins.margin_rows, margins.margin_cols);
        debug!(
            target: "runtime",
            rows = outer.rows,
            cols = outer.cols,
            inner_rows = frame.inner().rows,
            inner_cols = frame.inner().cols,
            "frame_resized"
        );
        self.frame = Some(frame);
        self.dirty = true;
    }

    /// View, compose and paint one full terminal frame. The frame stays dirty
    /// while the layout keeps moving the threaded focus state.
    pub fn draw(&mut self) -> String {
        let Some(frame) = self.frame else {
            return String::new();
        };
        let mut vm = self.screen.view(&self.state);
        let lines = match compose(&mut vm, frame.inner()) {
            Ok(composition) => {
                let next = UiState {
                    pager: composition.pager,
                    cursor: composition.cursor,
                };
                self.dirty = next != self.state;
                self.state = next;
                composition.lines
            }
            Err(err) => {
                error!(target: "runtime", error = %err, "render_failed");
                self.dirty = false;
                vec![Line::plain(format!("render error: {err}"))]
            }
        };
        paint_frame(&lines, &frame)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let result = self.screen.update(&self.state, &ScreenEvent::new(key));
        self.state = result.state;
        if let Some(next) = result.screen {
            info!(target: "runtime", from = %self.screen.name(), to = %next.name(), "screen_replaced");
            self.screen = next;
            self.state = UiState::default();
        }
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_config::FrameConfig;
    use core_screens::{Article, TextArea};
    use core_state::PagerState;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct FakeTerminal {
        size: Winsize,
        frames: Vec<String>,
    }

    impl TerminalBackend for FakeTerminal {
        fn enter(&mut self) -> Result<()> {
            Ok(())
        }
        fn leave(&mut self) -> Result<()> {
            Ok(())
        }
        fn set_title(&mut self, _title: &str) -> Result<()> {
            Ok(())
        }
        fn size(&self) -> Result<Winsize> {
            Ok(self.size)
        }
        fn write_frame(&mut self, frame: &str) -> Result<()> {
            self.frames.push(frame.to_string());
            Ok(())
        }
    }

    fn config(margin_rows: u16, margin_cols: u16) -> Config {
        let mut config = Config::default();
        config.file.frame = FrameConfig {
            margin_rows,
            margin_cols,
        };
        config.file.runtime.tick_ms = 1;
        config
    }

    fn article(lines: usize) -> Box<dyn Screen> {
        Box::new(Article::new().with_article((0..lines).map(|i| Line::plain(format!("row {i}")))))
    }

    #[test]
    fn draws_until_disconnected() {
        let (tx, rx) = core_events::channel();
        tx.send(Event::Key(KeyEvent::char('x'))).unwrap();
        drop(tx);
        let mut terminal = FakeTerminal {
            size: Winsize::new(4, 10),
            ..FakeTerminal::default()
        };
        let mut runtime = Runtime::new(Box::new(TextArea::new()), config(0, 0));
        let reason = runtime.run(&mut terminal, &rx).unwrap();
        assert_eq!(reason, ShutdownReason::ChannelClosed);
        let last = terminal.frames.last().unwrap();
        assert!(last.starts_with('x'));
        assert_eq!(last.split('\n').count(), 4);
    }

    #[test]
    fn exit_key_stops_the_loop() {
        let (tx, rx) = core_events::channel();
        tx.send(Event::Key(KeyEvent::plain(KeyCode::Exit))).unwrap();
        let mut terminal = FakeTerminal {
            size: Winsize::new(3, 5),
            ..FakeTerminal::default()
        };
        let mut runtime = Runtime::new(article(1), config(0, 0));
        assert_eq!(runtime.run(&mut terminal, &rx).unwrap(), ShutdownReason::ExitKey);
        assert_eq!(terminal.frames.len(), 1);
    }

    #[test]
    fn frame_is_centered_with_clamped_margins() {
        let mut runtime = Runtime::new(article(1), config(2, 4));
        runtime.resize(Winsize::new(4, 10));
        let rows: Vec<String> = runtime.draw().split('\n').map(str::to_string).collect();
        assert_eq!(rows, vec!["          ", "  row 0   ", "          ", "          "]);

        let mut tiny = Runtime::new(article(1), config(50, 50));
        tiny.resize(Winsize::new(2, 3));
        let out = tiny.draw();
        assert_eq!(out.split('\n').count(), 2);
        assert!(out.split('\n').all(|row| row.chars().count() == 3));
    }

    #[test]
    fn focus_state_settles() {
        let mut runtime = Runtime::new(article(10), config(0, 0));
        runtime.resize(Winsize::new(3, 10));
        runtime.draw();
        assert_eq!(runtime.state().pager, PagerState::page(0));
        assert!(runtime.is_dirty());
        runtime.draw();
        assert!(!runtime.is_dirty());
    }

    #[test]
    fn too_small_frame_shows_diagnostic() {
        let screen = Box::new(Article::new().with_title([Line::plain("a"), Line::plain("b")]));
        let mut runtime = Runtime::new(screen, config(0, 0));
        runtime.resize(Winsize::new(1, 20));
        assert_eq!(runtime.draw(), "Too low resolution  ");
    }
}
