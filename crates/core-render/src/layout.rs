//! Frame composition: header, body page, footer and input line.

use core_model::{ViewModel, Winsize};
use core_state::{CursorState, Focus, PagerState};
use core_text::{Line, wrap};
use tracing::{debug, trace};

use crate::RenderError;
use crate::window::window;

/// Shown instead of a frame when header, footer and input leave no body rows.
pub const TOO_LOW_RESOLUTION: &str = "Too low resolution";

/// A laid-out frame plus the focus state to carry into the next frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Composition {
    pub lines: Vec<Line>,
    pub pager: PagerState,
    pub cursor: CursorState,
}

pub fn compose(vm: &mut ViewModel, size: Winsize) -> Result<Composition, RenderError> {
    let rows = usize::from(size.rows);
    let cols = usize::from(size.cols);

    vm.header.init(size);
    vm.body.init(size);
    vm.footer.init(size);

    let header = vm.header.drain_all()?;
    let footer = vm.footer.drain_all()?;
    let input = vm
        .input
        .as_ref()
        .map(|input| wrap(cols, &Line::plain(input.text()), None))
        .unwrap_or_default();

    let reserved = header.len() + footer.len() + input.len();
    let Some(rest) = rows.checked_sub(reserved) else {
        debug!(target: "render.layout", rows, reserved, "viewport too small");
        return Ok(Composition {
            lines: vec![Line::plain(TOO_LOW_RESOLUTION)],
            pager: vm.pager,
            cursor: vm.cursor,
        });
    };

    let focus = Focus::select(&vm.pager, &vm.cursor);
    let page = window(&mut vm.body, rest, cols, focus)?;
    trace!(
        target: "render.layout",
        header = header.len(),
        body = rest,
        footer = footer.len(),
        page = page.page,
        "composed"
    );

    let mut lines = header;
    lines.extend(page.lines);
    lines.extend(footer);
    lines.extend(input);

    Ok(Composition {
        lines,
        pager: PagerState {
            enabled: page.has_more_pages,
            page: page.page,
        },
        cursor: CursorState {
            offset: page.start_offset,
            ..vm.cursor
        },
    })
}
