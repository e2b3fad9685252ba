//! Screens shown when the binary starts.

use std::path::Path;

use core_config::HistoryConfig;
use core_model::Screen;
use core_screens::{Article, Header, IndexMenu, MenuOption, Navigator, Pagination, TextArea};
use core_state::{History, HistoryLimits};
use core_text::{Atom, Fragment, Line, Padding, Spec};

const ABOUT: &str = "lattice lays styled lines out into a fixed frame. Bodies are drawn lazily and \
cut into pages; the page shown follows either an explicit page number or a cursor offset. \
Use the arrow keys to page through long content, b or Esc to go back and Ctrl+C to quit.";

const KEYS: &[(&str, &str)] = &[
    ("Up / Down / Tab", "move through a menu"),
    ("Enter", "open the selected entry"),
    ("Left / Right", "previous / next page"),
    ("b / Esc", "back"),
    ("Ctrl+G / Ctrl+T", "undo / redo in the editor"),
    ("Ctrl+W / Ctrl+D", "delete word backward / forward"),
    ("Ctrl+C", "quit"),
];

fn banner() -> Vec<Line> {
    vec![
        Line::styled("lattice", Atom::BOLD | Atom::UPPER)
            .with_spec(Spec::padding_center(Padding::new())),
        Line::plain("=").with_spec(Spec::fill()),
    ]
}

fn title(text: &str) -> Vec<Line> {
    vec![
        Line::styled(text, Atom::BOLD),
        Line::plain("-").with_spec(Spec::fill_up()),
    ]
}

fn history(config: &HistoryConfig) -> History {
    History::new().with_limits(HistoryLimits {
        event_limit: config.event_limit,
        debounce_ms: config.debounce_ms,
    })
}

/// One indexed line per item, numbered from 1. Orders saturate at `u16::MAX`.
fn numbered<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<Line> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| Line::plain(item).with_order(u16::try_from(i + 1).unwrap_or(u16::MAX)))
        .collect()
}

fn about() -> Box<dyn Screen> {
    Box::new(
        Article::new()
            .with_name("About")
            .with_title(title("About"))
            .with_article(numbered(ABOUT.split(". "))),
    )
}

fn keys() -> Box<dyn Screen> {
    let rows = KEYS.iter().map(|(key, what)| {
        Line::new(vec![
            Fragment::styled(*key, Atom::BOLD)
                .with_spec(Spec::padding_right(Padding::sized(18).with_text("."))),
            Fragment::new(" "),
            Fragment::new(*what),
        ])
    });
    Box::new(
        Article::new()
            .with_name("Keys")
            .with_title(title("Keys"))
            .with_article(rows),
    )
}

fn editor(text: &str, config: &HistoryConfig) -> TextArea {
    TextArea::new()
        .with_name("Editor")
        .with_title(title("Editor"))
        .with_text(text)
        .with_history(history(config))
}

/// The root screen: a menu of demo screens, or an editor over `path` when
/// one was given and could be read.
pub fn root(path: Option<&Path>, config: &HistoryConfig) -> Box<dyn Screen> {
    let opened = path.and_then(|p| match std::fs::read_to_string(p) {
        Ok(text) => {
            tracing::debug!(target: "io", file = %p.display(), size_bytes = text.len(), "file_read_ok");
            Some(text)
        }
        Err(err) => {
            tracing::error!(target: "io", file = %p.display(), error = %err, "file_open_error");
            None
        }
    });

    let navigator = match opened {
        Some(text) => Navigator::new(editor(&text, config)),
        None => {
            let history = config.clone();
            Navigator::new(
                IndexMenu::new("Index")
                    .with_title(title("Index"))
                    .with_option(MenuOption::new("About", about))
                    .with_option(MenuOption::new("Keys", keys))
                    .with_option(MenuOption::new("Editor", move || {
                        Box::new(editor("", &history))
                    })),
            )
        }
    };
    Box::new(Pagination::new(Header::new(navigator).with_lines(banner())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_menu() {
        let screen = root(
            Some(Path::new("/definitely/not/here.txt")),
            &HistoryConfig::default(),
        );
        assert_eq!(screen.name(), "Index");
    }

    #[test]
    fn numbering_starts_at_one_and_saturates() {
        let lines = numbered(["a", "b"]);
        let orders: Vec<u16> = lines.iter().map(|l| l.order).collect();
        assert_eq!(orders, vec![1, 2]);

        let many = numbered(std::iter::repeat_n("x", usize::from(u16::MAX) + 2));
        assert_eq!(many[usize::from(u16::MAX) - 1].order, u16::MAX);
        assert_eq!(many.last().map(|l| l.order), Some(u16::MAX));
    }

    #[test]
    fn readable_file_opens_editor() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("note.txt");
        std::fs::write(&file, "hello\nworld").unwrap();
        let screen = root(Some(&file), &HistoryConfig::default());
        assert_eq!(screen.name(), "Editor");
    }
}
