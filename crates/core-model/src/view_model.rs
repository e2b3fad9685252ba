use core_state::{CursorState, PagerState, UiState};

use crate::LayerStack;

/// Single editable prompt line rendered below the footer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputLine {
    pub prompt: String,
    pub value: String,
}

impl InputLine {
    pub fn new(prompt: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            value: value.into(),
        }
    }

    pub fn text(&self) -> String {
        format!("{}{}", self.prompt, self.value)
    }
}

/// Everything a screen wants drawn for one frame. Built fresh per frame.
#[derive(Debug, Default)]
pub struct ViewModel {
    pub header: LayerStack,
    pub body: LayerStack,
    pub footer: LayerStack,
    pub input: Option<InputLine>,
    pub pager: PagerState,
    pub cursor: CursorState,
}

impl ViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty view model carrying the focus threaded from the previous frame.
    pub fn from_state(state: &UiState) -> Self {
        Self {
            pager: state.pager,
            cursor: state.cursor,
            ..Self::default()
        }
    }

    /// Follow `cursor` (1-based logical offset into the body) on this frame.
    pub fn follow_cursor(&mut self, cursor: usize) -> &mut Self {
        self.cursor = CursorState {
            enabled: true,
            cursor,
            offset: self.cursor.offset,
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_line_joins_prompt_and_value() {
        let input = InputLine::new("> ", "héllo");
        assert_eq!(input.text(), "> héllo");
        assert_eq!(InputLine::default().text(), "");
    }

    #[test]
    fn from_state_threads_focus() {
        let state = UiState {
            pager: PagerState::page(2),
            cursor: CursorState {
                enabled: false,
                cursor: 0,
                offset: 7,
            },
        };
        let mut vm = ViewModel::from_state(&state);
        assert_eq!(vm.pager, PagerState::page(2));
        vm.follow_cursor(12);
        assert_eq!(
            vm.cursor,
            CursorState {
                enabled: true,
                cursor: 12,
                offset: 7
            }
        );
        assert!(vm.body.is_empty());
    }
}
