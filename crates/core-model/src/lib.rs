//! Drawables, layer composition and the screen contract.
//!
//! A [`Screen`] produces a [`ViewModel`] of three [`LayerStack`]s (header,
//! body, footer) each frame. Every drawable in a stack is initialized once
//! per terminal size and then drawn until it reports no more output; the
//! windowing pass in `core-render` consumes the body stack incrementally.

mod drawable;
mod error;
mod layer;
mod screen;
mod view_model;

pub use drawable::{Drawable, Drawn, EagerDrawable, LazyDrawable};
pub use error::RenderError;
pub use layer::LayerStack;
pub use screen::{Definition, Screen, ScreenEvent, ScreenResult};
pub use view_model::{InputLine, ViewModel};

/// Terminal size in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Winsize {
    pub rows: u16,
    pub cols: u16,
}

impl Winsize {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }
}
