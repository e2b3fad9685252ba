//! Contract between application screens and the runtime.

use core_events::{KeyEvent, KeySet};
use core_state::UiState;

use crate::ViewModel;

/// Static facts about a screen that wrapping screens consult.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Definition {
    /// Keys the screen handles itself; decorators leave these alone.
    pub consumes: KeySet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenEvent {
    pub key: KeyEvent,
}

impl ScreenEvent {
    pub fn new(key: KeyEvent) -> Self {
        Self { key }
    }
}

/// Outcome of [`Screen::update`].
pub struct ScreenResult {
    pub state: UiState,
    /// Screen to transition to, if any.
    pub screen: Option<Box<dyn Screen>>,
    /// Tell wrapping screens not to act on this event.
    pub ignore_parents: bool,
}

impl ScreenResult {
    pub fn from_state(state: UiState) -> Self {
        Self {
            state,
            screen: None,
            ignore_parents: false,
        }
    }

    /// Transition to `screen` with a fresh UI state.
    pub fn transition(screen: Box<dyn Screen>) -> Self {
        Self {
            state: UiState::default(),
            screen: Some(screen),
            ignore_parents: false,
        }
    }

    pub fn ignoring_parents(mut self) -> Self {
        self.ignore_parents = true;
        self
    }
}

impl std::fmt::Debug for ScreenResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenResult")
            .field("state", &self.state)
            .field("screen", &self.screen.as_ref().map(|s| s.name()))
            .field("ignore_parents", &self.ignore_parents)
            .finish()
    }
}

pub trait Screen {
    fn name(&self) -> String;

    fn definition(&self) -> Definition {
        Definition::default()
    }

    fn update(&mut self, state: &UiState, event: &ScreenEvent) -> ScreenResult;

    fn view(&mut self, state: &UiState) -> ViewModel;
}

impl<S: Screen + ?Sized> Screen for Box<S> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn definition(&self) -> Definition {
        (**self).definition()
    }

    fn update(&mut self, state: &UiState, event: &ScreenEvent) -> ScreenResult {
        (**self).update(state, event)
    }

    fn view(&mut self, state: &UiState) -> ViewModel {
        (**self).view(state)
    }
}
