//! Focus descriptors threaded between screens and the windowing engine.

/// Explicit page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PagerState {
    pub enabled: bool,
    pub page: usize,
}

impl PagerState {
    pub fn page(page: usize) -> Self {
        Self {
            enabled: true,
            page,
        }
    }
}

/// Cursor-following selection.
///
/// `cursor` is a 1-based logical offset into the body content. `offset` is the
/// logical offset at which the last rendered page started; it is written back
/// by the layout pass and only informative for screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorState {
    pub enabled: bool,
    pub cursor: usize,
    pub offset: usize,
}

impl CursorState {
    pub fn at(cursor: usize) -> Self {
        Self {
            enabled: true,
            cursor,
            offset: 0,
        }
    }
}

/// The strategy driving one frame's page choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Show the first page.
    #[default]
    None,
    Pager(usize),
    Cursor(usize),
}

impl Focus {
    /// Cursor focus wins over pager focus when both are enabled.
    pub fn select(pager: &PagerState, cursor: &CursorState) -> Focus {
        if cursor.enabled {
            Focus::Cursor(cursor.cursor)
        } else if pager.enabled {
            Focus::Pager(pager.page)
        } else {
            Focus::None
        }
    }
}

/// UI state carried across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiState {
    pub pager: PagerState,
    pub cursor: CursorState,
}

impl UiState {
    pub fn focus(&self) -> Focus {
        Focus::select(&self.pager, &self.cursor)
    }
}
