//! Windowing, layout composition and ANSI frame rendering.
//!
//! A frame is produced in three steps:
//!
//! 1. [`compose`] initializes a [`ViewModel`](core_model::ViewModel)'s layer
//!    stacks for the frame size and picks one page of body content with
//!    [`window`], between the header and the footer.
//! 2. [`render`] turns the composed lines into exactly `rows` strings of
//!    exactly `cols` visible columns, applying layout directives and atoms.
//! 3. [`FrameBox::place`] centers the frame in the terminal and [`Writer`]
//!    emits it.

mod fixed;
mod layout;
mod style;
mod window;
mod writer;

pub use core_model::RenderError;
pub use fixed::FrameBox;
pub use layout::{Composition, TOO_LOW_RESOLUTION, compose};
pub use style::{paint, render, render_line};
pub use window::{Window, units, window};
pub use writer::{Command, Writer};

use core_text::Line;

/// Render composed `lines` into the frame box and return the full terminal frame.
pub fn paint_frame(lines: &[Line], frame: &FrameBox) -> String {
    frame.place(&render(lines, frame.inner()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_model::Winsize;

    #[test]
    fn painted_frame_fills_terminal() {
        let frame = FrameBox::new(Winsize::new(5, 8), 2, 4);
        let out = paint_frame(&[Line::plain("hi")], &frame);
        let rows: Vec<&str> = out.split('\n').collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[1], "  hi    ");
        assert!(rows.iter().all(|r| r.chars().count() == 8));
    }
}
