use core_events::{KeyCode, KeySet};
use core_model::{
    Definition, EagerDrawable, LazyDrawable, Screen, ScreenEvent, ScreenResult, ViewModel,
};
use core_state::UiState;
use core_text::{Fragment, Line};
use tracing::debug;

/// Builds the screen an option opens.
pub type Factory = Box<dyn FnMut() -> Box<dyn Screen>>;

pub struct MenuOption {
    pub label: Vec<Fragment>,
    factory: Factory,
}

impl MenuOption {
    pub fn new(label: impl Into<Fragment>, factory: impl FnMut() -> Box<dyn Screen> + 'static) -> Self {
        Self {
            label: vec![label.into()],
            factory: Box::new(factory),
        }
    }

    pub fn styled(label: Vec<Fragment>, factory: impl FnMut() -> Box<dyn Screen> + 'static) -> Self {
        Self {
            label,
            factory: Box::new(factory),
        }
    }
}

/// Selectable list of options, each opening another screen.
pub struct IndexMenu {
    name: String,
    title: Vec<Line>,
    options: Vec<MenuOption>,
    selected: usize,
}

impl std::fmt::Debug for IndexMenu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexMenu")
            .field("name", &self.name)
            .field("options", &self.options.len())
            .field("selected", &self.selected)
            .finish()
    }
}

impl IndexMenu {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: Vec::new(),
            options: Vec::new(),
            selected: 0,
        }
    }

    pub fn with_title(mut self, title: impl IntoIterator<Item = Line>) -> Self {
        self.title.extend(title);
        self
    }

    pub fn with_option(mut self, option: MenuOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn option_line(&self, index: usize) -> Line {
        let marker = if index == self.selected { ">" } else { "-" };
        let mut text = vec![Fragment::new("  "), Fragment::new(marker), Fragment::new(" ")];
        text.extend(self.options[index].label.iter().cloned());
        Line::new(text)
    }

    /// Logical body offset of the selected option; every preceding option
    /// line contributes at least one unit.
    fn selection_offset(&self) -> usize {
        (0..self.selected)
            .map(|i| self.option_line(i).width().max(1))
            .sum::<usize>()
            + 1
    }
}

impl Screen for IndexMenu {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn definition(&self) -> Definition {
        Definition {
            consumes: KeySet::only([KeyCode::Up, KeyCode::Down, KeyCode::Tab, KeyCode::Enter]),
        }
    }

    fn update(&mut self, state: &UiState, event: &ScreenEvent) -> ScreenResult {
        let count = self.options.len();
        if count == 0 {
            return ScreenResult::from_state(*state);
        }
        match event.key.code {
            KeyCode::Up => self.selected = (self.selected + count - 1) % count,
            KeyCode::Down | KeyCode::Tab => self.selected = (self.selected + 1) % count,
            KeyCode::Enter => {
                debug!(target: "screens.menu", menu = %self.name, option = self.selected, "open");
                let next = (self.options[self.selected].factory)();
                return ScreenResult::transition(next);
            }
            _ => {}
        }
        let mut state = *state;
        state.cursor.cursor = self.selection_offset();
        ScreenResult::from_state(state)
    }

    fn view(&mut self, state: &UiState) -> ViewModel {
        let mut vm = ViewModel::from_state(state);
        vm.header.push(EagerDrawable::new(self.title.clone()));
        let lines = (0..self.options.len()).map(|i| self.option_line(i)).collect();
        vm.body.push(LazyDrawable::new(lines));
        let offset = self.selection_offset();
        vm.follow_cursor(offset);
        vm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Article;
    use core_events::KeyEvent;
    use core_model::Winsize;
    use pretty_assertions::assert_eq;

    fn menu() -> IndexMenu {
        IndexMenu::new("Index")
            .with_title([Line::plain("Menu")])
            .with_option(MenuOption::new("one", || Box::new(Article::new().with_name("One"))))
            .with_option(MenuOption::new("two", || Box::new(Article::new().with_name("Two"))))
            .with_option(MenuOption::new("three", || {
                Box::new(Article::new().with_name("Three"))
            }))
    }

    fn press(menu: &mut IndexMenu, code: KeyCode) -> ScreenResult {
        menu.update(&UiState::default(), &ScreenEvent::new(KeyEvent::plain(code)))
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut m = menu();
        press(&mut m, KeyCode::Up);
        assert_eq!(m.selected(), 2);
        press(&mut m, KeyCode::Down);
        assert_eq!(m.selected(), 0);
        press(&mut m, KeyCode::Tab);
        assert_eq!(m.selected(), 1);
    }

    #[test]
    fn enter_opens_selected_option() {
        let mut m = menu();
        press(&mut m, KeyCode::Down);
        let result = press(&mut m, KeyCode::Enter);
        let next = result.screen.expect("transition");
        assert_eq!(next.name(), "Two");
        assert_eq!(result.state, UiState::default());
    }

    #[test]
    fn view_marks_selection_and_follows_it() {
        let mut m = menu();
        press(&mut m, KeyCode::Down);
        let mut vm = m.view(&UiState::default());
        vm.body.init(Winsize::new(10, 20));
        let lines: Vec<String> = vm
            .body
            .drain_all()
            .unwrap()
            .iter()
            .map(Line::plain_text)
            .collect();
        assert_eq!(lines, vec!["  - one", "  > two", "  - three"]);
        // past "  - one"
        assert!(vm.cursor.enabled);
        assert_eq!(vm.cursor.cursor, 8);
    }

    #[test]
    fn empty_menu_ignores_keys() {
        let mut m = IndexMenu::new("Empty");
        let result = press(&mut m, KeyCode::Enter);
        assert!(result.screen.is_none());
        assert!(m.definition().consumes.contains(&KeyCode::Enter));
    }
}
