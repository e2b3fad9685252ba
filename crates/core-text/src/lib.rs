//! Styled text model, word wrapping and the code-point edit buffer.
//!
//! Widths are code-point counts throughout; see [`width`].

pub mod buffer;
pub mod line;
pub mod style;
pub mod token;
pub mod width;
pub mod wrap;

pub use buffer::Buffer;
pub use line::{Fragment, Line};
pub use style::{Atom, Directive, Padding, Spec, SpecKind};
pub use token::{WordToken, tokenize};
pub use wrap::{IndexMeta, wrap, wrap_words};
