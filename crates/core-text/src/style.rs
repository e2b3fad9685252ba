//! Text attributes and layout directives.
//!
//! An [`Atom`] only changes how text is painted. A [`Spec`] may change how
//! much room text occupies, so the wrap engine measures through it.

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::width;

bitflags! {
    /// Rendering attributes. Never affect layout.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Atom: u8 {
        const BOLD = 0b0000_0001;
        const UPPER = 0b0000_0010;
        const LOWER = 0b0000_0100;
        const SELECTED = 0b0000_1000;
    }
}

bitflags! {
    /// Set of directive kinds present on a [`Spec`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SpecKind: u16 {
        const PADDING_LEFT = 1 << 0;
        const PADDING_RIGHT = 1 << 1;
        const PADDING_CENTER = 1 << 2;
        const REPEAT_LEFT = 1 << 3;
        const REPEAT_RIGHT = 1 << 4;
        const TRIM_LEFT = 1 << 5;
        const TRIM_RIGHT = 1 << 6;
        const FILL = 1 << 7;
        const FILL_UP = 1 << 8;
        const FILL_DOWN = 1 << 9;

        const PADDING = Self::PADDING_LEFT.bits() | Self::PADDING_RIGHT.bits() | Self::PADDING_CENTER.bits();
        const FILLS = Self::FILL.bits() | Self::FILL_UP.bits() | Self::FILL_DOWN.bits();
    }
}

/// Arguments shared by padding and repeat directives.
///
/// A missing `size` means "up to the available columns" for paddings and
/// "nothing" for repeats. Missing `text` falls back to a space for paddings.
/// A repeat without text cycles the decorated text itself in place of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Padding {
    pub size: Option<usize>,
    pub text: Option<String>,
}

impl Padding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sized(size: usize) -> Self {
        Self {
            size: Some(size),
            text: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    fn fill(&self) -> &str {
        self.text.as_deref().unwrap_or(width::DEFAULT_FILL)
    }

    fn repeat_size(&self, cols: Option<usize>) -> usize {
        let size = self.size.unwrap_or(0);
        cols.map_or(size, |cols| size.min(cols))
    }

    /// Target width for a padding directive under an optional column budget.
    fn target(&self, cols: Option<usize>) -> Option<usize> {
        match (self.size, cols) {
            (Some(size), Some(cols)) => Some(size.min(cols)),
            (Some(size), None) => Some(size),
            (None, cols) => cols,
        }
    }
}

/// A single layout directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Directive {
    PaddingLeft(Padding),
    PaddingRight(Padding),
    PaddingCenter(Padding),
    RepeatLeft(Padding),
    RepeatRight(Padding),
    TrimLeft(usize),
    TrimRight(usize),
    /// Expand to consume the remaining columns of the row.
    Fill,
    /// Expand to consume the remaining rows above the line.
    FillUp,
    /// Expand to consume the remaining rows below the line.
    FillDown,
}

impl Directive {
    pub fn kind(&self) -> SpecKind {
        match self {
            Directive::PaddingLeft(_) => SpecKind::PADDING_LEFT,
            Directive::PaddingRight(_) => SpecKind::PADDING_RIGHT,
            Directive::PaddingCenter(_) => SpecKind::PADDING_CENTER,
            Directive::RepeatLeft(_) => SpecKind::REPEAT_LEFT,
            Directive::RepeatRight(_) => SpecKind::REPEAT_RIGHT,
            Directive::TrimLeft(_) => SpecKind::TRIM_LEFT,
            Directive::TrimRight(_) => SpecKind::TRIM_RIGHT,
            Directive::Fill => SpecKind::FILL,
            Directive::FillUp => SpecKind::FILL_UP,
            Directive::FillDown => SpecKind::FILL_DOWN,
        }
    }
}

/// Combination of layout directives, at most one per kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Spec {
    directives: SmallVec<[Directive; 2]>,
}

impl Spec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn padding_left(padding: Padding) -> Self {
        Self::new().with(Directive::PaddingLeft(padding))
    }

    pub fn padding_right(padding: Padding) -> Self {
        Self::new().with(Directive::PaddingRight(padding))
    }

    pub fn padding_center(padding: Padding) -> Self {
        Self::new().with(Directive::PaddingCenter(padding))
    }

    pub fn repeat_left(padding: Padding) -> Self {
        Self::new().with(Directive::RepeatLeft(padding))
    }

    pub fn repeat_right(padding: Padding) -> Self {
        Self::new().with(Directive::RepeatRight(padding))
    }

    pub fn trim_left(n: usize) -> Self {
        Self::new().with(Directive::TrimLeft(n))
    }

    pub fn trim_right(n: usize) -> Self {
        Self::new().with(Directive::TrimRight(n))
    }

    pub fn fill() -> Self {
        Self::new().with(Directive::Fill)
    }

    pub fn fill_up() -> Self {
        Self::new().with(Directive::FillUp)
    }

    pub fn fill_down() -> Self {
        Self::new().with(Directive::FillDown)
    }

    /// Add a directive, replacing any existing directive of the same kind.
    pub fn with(mut self, directive: Directive) -> Self {
        let kind = directive.kind();
        match self.directives.iter_mut().find(|d| d.kind() == kind) {
            Some(slot) => *slot = directive,
            None => self.directives.push(directive),
        }
        self
    }

    /// Union of both specs; directives in `other` win on conflicts.
    pub fn merge(&self, other: &Spec) -> Spec {
        other
            .directives
            .iter()
            .cloned()
            .fold(self.clone(), |spec, d| spec.with(d))
    }

    pub fn kind(&self) -> SpecKind {
        self.directives
            .iter()
            .fold(SpecKind::empty(), |acc, d| acc | d.kind())
    }

    pub fn has(&self, kind: SpecKind) -> bool {
        self.kind().intersects(kind)
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    fn find(&self, kind: SpecKind) -> Option<&Directive> {
        self.directives.iter().find(|d| d.kind() == kind)
    }

    /// Apply the width-changing directives to `text`.
    ///
    /// Trims run first, then paddings, then repeats. Fill directives need row
    /// context and are left to the renderer. With `cols == None` unsized
    /// paddings are skipped, which is how the wrap engine measures.
    pub fn apply(&self, text: &str, cols: Option<usize>) -> String {
        if self.is_empty() {
            return text.to_string();
        }
        let mut out = self.trimmed(text);
        if out.is_empty() {
            return out;
        }
        if let Some(Directive::PaddingCenter(p)) = self.find(SpecKind::PADDING_CENTER)
            && let Some(target) = p.target(cols)
        {
            out = width::pad_center(&out, target, p.fill());
        }
        if let Some(Directive::PaddingLeft(p)) = self.find(SpecKind::PADDING_LEFT)
            && let Some(target) = p.target(cols)
        {
            out = width::pad_left(&out, target, p.fill());
        }
        if let Some(Directive::PaddingRight(p)) = self.find(SpecKind::PADDING_RIGHT)
            && let Some(target) = p.target(cols)
        {
            out = width::pad_right(&out, target, p.fill());
        }
        if let Some(Directive::RepeatLeft(p)) = self.find(SpecKind::REPEAT_LEFT) {
            let size = p.repeat_size(cols);
            out = match &p.text {
                Some(fill) => width::cycle(fill, size) + &out,
                None => width::cycle_tail(&out, size),
            };
        }
        if let Some(Directive::RepeatRight(p)) = self.find(SpecKind::REPEAT_RIGHT) {
            let size = p.repeat_size(cols);
            out = match &p.text {
                Some(fill) => out + &width::cycle(fill, size),
                None => width::cycle(&out, size),
            };
        }
        out
    }

    /// Directive of `kind` together with its padding arguments.
    fn sized(&self, kind: SpecKind) -> Option<(&Directive, &Padding)> {
        let directive = self.find(kind)?;
        match directive {
            Directive::PaddingLeft(p)
            | Directive::PaddingRight(p)
            | Directive::PaddingCenter(p)
            | Directive::RepeatLeft(p)
            | Directive::RepeatRight(p) => Some((directive, p)),
            _ => None,
        }
    }

    /// `text` after the trim directives only.
    pub fn trimmed(&self, text: &str) -> String {
        let mut out = text.to_string();
        if let Some(Directive::TrimLeft(n)) = self.find(SpecKind::TRIM_LEFT) {
            out = width::trim_left(&out, *n);
        }
        if let Some(Directive::TrimRight(n)) = self.find(SpecKind::TRIM_RIGHT) {
            out = width::trim_right(&out, *n);
        }
        out
    }

    /// Same directives with sizes shrunk so that `text` measures at most
    /// `cols`. Only sized paddings and repeats change; when the trimmed text
    /// alone is wider than `cols` the result still measures that wide.
    pub fn fit(&self, text: &str, cols: usize) -> Spec {
        let mut used = width::width(&self.trimmed(text));
        if self.is_empty() || used == 0 {
            return self.clone();
        }
        let mut fitted = self.clone();
        for kind in [
            SpecKind::PADDING_CENTER,
            SpecKind::PADDING_LEFT,
            SpecKind::PADDING_RIGHT,
        ] {
            let Some((directive, p)) = self.sized(kind) else {
                continue;
            };
            let Some(size) = p.size else {
                continue;
            };
            let size = size.min(cols);
            used = used.max(size);
            fitted = fitted.with(resized(directive, size));
        }
        for kind in [SpecKind::REPEAT_LEFT, SpecKind::REPEAT_RIGHT] {
            let Some((directive, p)) = self.sized(kind) else {
                continue;
            };
            let size = p.size.unwrap_or(0);
            let size = if p.text.is_some() {
                let size = size.min(cols.saturating_sub(used));
                used += size;
                size
            } else {
                used = size.min(cols);
                used
            };
            fitted = fitted.with(resized(directive, size));
        }
        fitted
    }

    /// Fill placed before and after a text `width` columns wide by the
    /// padding directives alone, in the same order [`apply`](Self::apply)
    /// uses. Lets callers decorate text they must not rewrite.
    pub fn pads(&self, width: usize, cols: Option<usize>) -> (String, String) {
        let mut left = String::new();
        let mut right = String::new();
        if width == 0 {
            return (left, right);
        }
        let mut current = width;
        let order = [
            SpecKind::PADDING_CENTER,
            SpecKind::PADDING_LEFT,
            SpecKind::PADDING_RIGHT,
        ];
        for kind in order {
            let (padding, split): (&Padding, fn(usize) -> (usize, usize)) = match self.find(kind) {
                Some(Directive::PaddingCenter(p)) => (p, |t| (t / 2, t - t / 2)),
                Some(Directive::PaddingLeft(p)) => (p, |t| (t, 0)),
                Some(Directive::PaddingRight(p)) => (p, |t| (0, t)),
                _ => continue,
            };
            let Some(target) = padding.target(cols) else {
                continue;
            };
            if current >= target {
                continue;
            }
            let (l, r) = split(target - current);
            left = width::cycle(padding.fill(), l) + &left;
            right.push_str(&width::cycle(padding.fill(), r));
            current = target;
        }
        (left, right)
    }

    /// Width `text` occupies once the directives are applied without a column budget.
    pub fn measure(&self, text: &str) -> usize {
        if self.is_empty() {
            return width::width(text);
        }
        width::width(&self.apply(text, None))
    }
}

/// Copy of a padding or repeat directive with a new size.
fn resized(directive: &Directive, size: usize) -> Directive {
    let sized = |p: &Padding| Padding {
        size: Some(size),
        text: p.text.clone(),
    };
    match directive {
        Directive::PaddingLeft(p) => Directive::PaddingLeft(sized(p)),
        Directive::PaddingRight(p) => Directive::PaddingRight(sized(p)),
        Directive::PaddingCenter(p) => Directive::PaddingCenter(sized(p)),
        Directive::RepeatLeft(p) => Directive::RepeatLeft(sized(p)),
        Directive::RepeatRight(p) => Directive::RepeatRight(sized(p)),
        other => other.clone(),
    }
}

impl From<Directive> for Spec {
    fn from(directive: Directive) -> Self {
        Spec::new().with(directive)
    }
}
