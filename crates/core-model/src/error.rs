use thiserror::Error;

/// Internal invariant violations surfaced by drawing and layout.
///
/// The frame loop logs these and shows a diagnostic line instead of the frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("{drawable} drawable drawn before init")]
    NotInitialized { drawable: &'static str },
    #[error("wrapped line is {width} columns wide, budget is {cols}")]
    Overflow { width: usize, cols: usize },
}
