use core_events::KeyCode;
use core_model::{Definition, EagerDrawable, Screen, ScreenEvent, ScreenResult, ViewModel};
use core_state::UiState;
use core_text::Line;
use tracing::trace;

use crate::right_aligned;

/// Left/Right page through the wrapped screen's body unless it handles
/// those keys itself. While the threaded state follows a cursor the page is
/// derived from the cursor, so the arrows go to the wrapped screen instead.
pub struct Pagination {
    inner: Box<dyn Screen>,
}

impl Pagination {
    pub fn new(inner: impl Screen + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }

    fn boxed(inner: Box<dyn Screen>) -> Self {
        Self { inner }
    }

    fn page(&self, state: &UiState, code: KeyCode) -> Option<UiState> {
        if state.cursor.enabled {
            return None;
        }
        let mut state = *state;
        match code {
            KeyCode::Left => state.pager.page = state.pager.page.saturating_sub(1),
            KeyCode::Right => state.pager.page += 1,
            _ => return None,
        }
        trace!(target: "screens.pagination", page = state.pager.page, "page");
        Some(state)
    }
}

impl Screen for Pagination {
    fn name(&self) -> String {
        self.inner.name()
    }

    fn definition(&self) -> Definition {
        self.inner.definition()
    }

    fn update(&mut self, state: &UiState, event: &ScreenEvent) -> ScreenResult {
        let code = event.key.code;
        if !self.inner.definition().consumes.contains(&code)
            && let Some(state) = self.page(state, code)
        {
            return ScreenResult::from_state(state);
        }

        let mut result = self.inner.update(state, event);
        if !result.ignore_parents
            && let Some(next) = result.screen.take()
        {
            result.screen = Some(Box::new(Pagination::boxed(next)));
        }
        result
    }

    fn view(&mut self, state: &UiState) -> ViewModel {
        let mut vm = self.inner.view(state);
        if vm.pager.enabled {
            let label = format!("page: {}", vm.pager.page);
            vm.footer
                .unshift(EagerDrawable::new(vec![Line::jump(), right_aligned(label)]));
        }
        vm
    }
}
