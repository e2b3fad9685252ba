use core_model::{Definition, EagerDrawable, Screen, ScreenEvent, ScreenResult, ViewModel};
use core_state::UiState;
use core_text::Line;

/// Prepends fixed lines to the wrapped screen's header.
pub struct Header {
    inner: Box<dyn Screen>,
    lines: Vec<Line>,
}

impl Header {
    pub fn new(inner: impl Screen + 'static) -> Self {
        Self::boxed(Box::new(inner), Vec::new())
    }

    fn boxed(inner: Box<dyn Screen>, lines: Vec<Line>) -> Self {
        Self { inner, lines }
    }

    pub fn with_lines(mut self, lines: impl IntoIterator<Item = Line>) -> Self {
        self.lines.extend(lines);
        self
    }
}

impl Screen for Header {
    fn name(&self) -> String {
        self.inner.name()
    }

    fn definition(&self) -> Definition {
        self.inner.definition()
    }

    fn update(&mut self, state: &UiState, event: &ScreenEvent) -> ScreenResult {
        let mut result = self.inner.update(state, event);
        if !result.ignore_parents
            && let Some(next) = result.screen.take()
        {
            result.screen = Some(Box::new(Header::boxed(next, self.lines.clone())));
        }
        result
    }

    fn view(&mut self, state: &UiState) -> ViewModel {
        let mut vm = self.inner.view(state);
        vm.header.unshift(EagerDrawable::new(self.lines.clone()));
        vm
    }
}
