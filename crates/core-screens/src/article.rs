use core_model::{EagerDrawable, LazyDrawable, Screen, ScreenEvent, ScreenResult, ViewModel};
use core_state::UiState;
use core_text::Line;

/// Static text: title lines in the header, article lines in the body.
#[derive(Debug, Clone)]
pub struct Article {
    name: String,
    title: Vec<Line>,
    article: Vec<Line>,
}

impl Default for Article {
    fn default() -> Self {
        Self::new()
    }
}

impl Article {
    pub fn new() -> Self {
        Self {
            name: "Article".into(),
            title: Vec::new(),
            article: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_title(mut self, title: impl IntoIterator<Item = Line>) -> Self {
        self.title.extend(title);
        self
    }

    pub fn with_article(mut self, article: impl IntoIterator<Item = Line>) -> Self {
        self.article.extend(article);
        self
    }
}

impl Screen for Article {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn update(&mut self, state: &UiState, _event: &ScreenEvent) -> ScreenResult {
        ScreenResult::from_state(*state)
    }

    fn view(&mut self, state: &UiState) -> ViewModel {
        let mut vm = ViewModel::from_state(state);
        vm.header.push(EagerDrawable::new(self.title.clone()));
        vm.body.push(LazyDrawable::new(self.article.clone()));
        vm
    }
}
