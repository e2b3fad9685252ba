//! Reusable screens and screen decorators.
//!
//! [`Article`], [`IndexMenu`] and [`TextArea`] produce view models of their
//! own. [`Pagination`] and [`Header`] wrap another screen and decorate its
//! view; both re-wrap screens returned by transitions unless the result asks
//! to ignore parents. [`Navigator`] absorbs transitions into an owned back
//! stack.

mod article;
mod header;
mod index_menu;
mod navigator;
mod pagination;
mod text_area;

pub use article::Article;
pub use header::Header;
pub use index_menu::{Factory, IndexMenu, MenuOption};
pub use navigator::Navigator;
pub use pagination::Pagination;
pub use text_area::TextArea;

use core_text::{Fragment, Line, Padding, Spec};

/// Footer label pushed to the right edge of the frame.
pub(crate) fn right_aligned(text: String) -> Line {
    Line::new(vec![Fragment::new(text)]).with_spec(Spec::padding_left(Padding::new()))
}
