use core_events::{KeyCode, KeyEvent};
use core_model::{Definition, EagerDrawable, Screen, ScreenEvent, ScreenResult, ViewModel};
use core_state::UiState;
use core_text::Line;
use tracing::debug;

use crate::right_aligned;

/// Owns the current screen plus the screens it was reached from.
///
/// Transitions returned by the current screen are absorbed here: the current
/// screen is pushed and the new one takes its place. `b` or Esc pops back
/// unless the current screen handles that key itself.
pub struct Navigator {
    current: Box<dyn Screen>,
    back: Vec<Box<dyn Screen>>,
}

impl Navigator {
    pub fn new(root: impl Screen + 'static) -> Self {
        Self {
            current: Box::new(root),
            back: Vec::new(),
        }
    }

    pub fn depth(&self) -> usize {
        self.back.len()
    }

    fn is_back(key: &KeyEvent) -> bool {
        key.code == KeyCode::Esc || (key.code == KeyCode::Char('b') && key.mods.is_empty())
    }

    fn pop(&mut self) -> bool {
        let Some(previous) = self.back.pop() else {
            return false;
        };
        let left = std::mem::replace(&mut self.current, previous);
        debug!(target: "screens.navigator", from = %left.name(), to = %self.current.name(), depth = self.back.len(), "back");
        true
    }
}

impl Screen for Navigator {
    fn name(&self) -> String {
        self.current.name()
    }

    fn definition(&self) -> Definition {
        self.current.definition()
    }

    fn update(&mut self, state: &UiState, event: &ScreenEvent) -> ScreenResult {
        if Self::is_back(&event.key)
            && !self.current.definition().consumes.contains(&event.key.code)
            && self.pop()
        {
            return ScreenResult::from_state(UiState::default());
        }

        let mut result = self.current.update(state, event);
        if let Some(next) = result.screen.take() {
            let previous = std::mem::replace(&mut self.current, next);
            debug!(target: "screens.navigator", from = %previous.name(), to = %self.current.name(), depth = self.back.len() + 1, "open");
            self.back.push(previous);
        }
        result
    }

    fn view(&mut self, state: &UiState) -> ViewModel {
        let mut vm = self.current.view(state);
        if let Some(previous) = self.back.last() {
            let label = format!("back: {}", previous.name());
            vm.footer.unshift(EagerDrawable::new(vec![right_aligned(label)]));
        }
        vm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Article, IndexMenu, MenuOption, TextArea};
    use core_model::Winsize;
    use pretty_assertions::assert_eq;

    fn press(nav: &mut Navigator, key: KeyEvent) -> ScreenResult {
        nav.update(&UiState::default(), &ScreenEvent::new(key))
    }

    fn navigator() -> Navigator {
        Navigator::new(
            IndexMenu::new("Index")
                .with_option(MenuOption::new("read", || {
                    Box::new(Article::new().with_name("Reader"))
                }))
                .with_option(MenuOption::new("write", || {
                    Box::new(TextArea::new().with_name("Editor"))
                })),
        )
    }

    fn footer(nav: &mut Navigator) -> Vec<String> {
        let mut vm = nav.view(&UiState::default());
        vm.footer.init(Winsize::new(10, 20));
        vm.footer
            .drain_all()
            .unwrap()
            .iter()
            .map(Line::plain_text)
            .collect()
    }

    #[test]
    fn transition_pushes_and_back_pops() {
        let mut nav = navigator();
        let result = press(&mut nav, KeyEvent::plain(KeyCode::Enter));
        assert!(result.screen.is_none());
        assert_eq!(nav.name(), "Reader");
        assert_eq!(nav.depth(), 1);
        assert_eq!(footer(&mut nav), vec!["back: Index"]);

        press(&mut nav, KeyEvent::char('b'));
        assert_eq!(nav.name(), "Index");
        assert_eq!(nav.depth(), 0);
        assert!(footer(&mut nav).is_empty());
    }

    #[test]
    fn editor_keeps_b_but_esc_leaves() {
        let mut nav = navigator();
        press(&mut nav, KeyEvent::plain(KeyCode::Down));
        press(&mut nav, KeyEvent::plain(KeyCode::Enter));
        assert_eq!(nav.name(), "Editor");

        press(&mut nav, KeyEvent::char('b'));
        assert_eq!(nav.name(), "Editor");
        press(&mut nav, KeyEvent::plain(KeyCode::Esc));
        assert_eq!(nav.name(), "Index");
    }

    #[test]
    fn back_at_root_reaches_the_screen() {
        let mut nav = navigator();
        let result = press(&mut nav, KeyEvent::char('b'));
        assert!(result.screen.is_none());
        assert_eq!(nav.name(), "Index");
        assert_eq!(nav.depth(), 0);
    }
}
