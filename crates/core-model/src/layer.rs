//! Ordered, short-circuiting composition of drawables.
//!
//! `draw` walks the enabled layers in order and concatenates their output,
//! stopping after the first layer that still has more to give. A layer is
//! disabled the first time it reports no more and stays disabled until the
//! next `init`. Draining a stack is therefore incremental: each call yields
//! the next layer's worth of lines.

use core_text::Line;
use tracing::trace;

use crate::drawable::{Drawable, Drawn};
use crate::{RenderError, Winsize};

struct Layer {
    drawable: Box<dyn Drawable>,
    enabled: bool,
}

impl Layer {
    fn new(drawable: Box<dyn Drawable>) -> Self {
        Self {
            drawable,
            enabled: true,
        }
    }
}

#[derive(Default)]
pub struct LayerStack {
    layers: Vec<Layer>,
}

impl std::fmt::Debug for LayerStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(
                self.layers
                    .iter()
                    .map(|l| (l.drawable.name(), l.enabled)),
            )
            .finish()
    }
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a drawable after the existing layers.
    pub fn push(&mut self, drawable: impl Drawable + 'static) -> &mut Self {
        self.layers.push(Layer::new(Box::new(drawable)));
        self
    }

    /// Insert a drawable before the existing layers.
    pub fn unshift(&mut self, drawable: impl Drawable + 'static) -> &mut Self {
        self.layers.insert(0, Layer::new(Box::new(drawable)));
        self
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, drawable: impl Drawable + 'static) -> Self {
        self.push(drawable);
        self
    }

    /// Move every layer of `other` behind this stack's layers.
    pub fn append(&mut self, other: LayerStack) -> &mut Self {
        self.layers.extend(other.layers);
        self
    }

    /// Move every layer of `other` in front of this stack's layers.
    pub fn prepend(&mut self, other: LayerStack) -> &mut Self {
        let tail = std::mem::replace(&mut self.layers, other.layers);
        self.layers.extend(tail);
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Start a new size epoch: every drawable is re-initialized and re-enabled.
    pub fn init(&mut self, size: Winsize) -> &mut Self {
        for layer in &mut self.layers {
            layer.drawable.init(size);
            layer.enabled = true;
        }
        self
    }

    pub fn draw(&mut self) -> Result<Drawn, RenderError> {
        let mut out = Vec::new();
        let mut more = false;
        for layer in self.layers.iter_mut().filter(|l| l.enabled) {
            let (lines, has_more) = layer.drawable.draw()?;
            if !has_more {
                layer.enabled = false;
            }
            out.extend(lines);
            if has_more {
                more = true;
                break;
            }
        }
        trace!(target: "render.layer", lines = out.len(), more, "layer draw");
        Ok((out, more))
    }

    /// Whether any layer is still enabled.
    pub fn has_next(&self) -> bool {
        self.layers.iter().any(|l| l.enabled)
    }

    /// Draw until every layer is exhausted.
    pub fn drain_all(&mut self) -> Result<Vec<Line>, RenderError> {
        let mut out = Vec::new();
        while self.has_next() {
            let (lines, _) = self.draw()?;
            out.extend(lines);
        }
        Ok(out)
    }
}
