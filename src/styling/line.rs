//! Styled segment and line types for composable terminal output
//!
//! A [`Segment`] is the atomic unit every renderer produces. Styles are kept
//! beside the text rather than embedded in it, so width calculation never has
//! to strip escape codes.

use anstyle::Style;
use unicode_width::UnicodeWidthStr;

/// Horizontal alignment of a segment or column
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// A piece of text with an optional style and layout hints
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: Option<Style>,
    /// Minimum visual width; shorter text is padded when rendered
    pub min_width: Option<usize>,
    /// Pure spacing. The layout engine omits the column separator next to it.
    pub margin: bool,
    /// Overrides the owning column's alignment for the padding of this segment
    pub align: Option<Align>,
}

impl Segment {
    pub fn new(text: impl Into<String>, style: Option<Style>) -> Self {
        Self {
            text: text.into(),
            style,
            min_width: None,
            margin: false,
            align: None,
        }
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Self::new(text, None)
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self::new(text, Some(style))
    }

    /// Style only when one is given; keeps call sites free of `if color`.
    pub fn maybe_styled(text: impl Into<String>, style: Option<Style>) -> Self {
        Self::new(text, style)
    }

    /// Blank spacing of the given width
    pub fn margin(width: usize) -> Self {
        Self {
            margin: true,
            ..Self::raw(" ".repeat(width))
        }
    }

    pub fn with_min_width(mut self, width: usize) -> Self {
        self.min_width = Some(width);
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    /// Visual width of the text alone (unicode-aware, styles never count)
    pub fn text_width(&self) -> usize {
        self.text.width()
    }

    /// Width this segment occupies: `max(text width, min width)`
    pub fn width(&self) -> usize {
        self.text_width().max(self.min_width.unwrap_or(0))
    }

    /// Renders with ANSI escape codes, padding to `min_width`.
    ///
    /// Padding stays outside the styled region so underlines and backgrounds
    /// never bleed into alignment whitespace.
    pub fn render(&self, default_align: Align) -> String {
        let body = match &self.style {
            Some(style) => format!("{}{}{}", style.render(), self.text, style.render_reset()),
            None => self.text.clone(),
        };
        let pad = self.width() - self.text_width();
        if pad == 0 {
            return body;
        }
        match self.align.unwrap_or(default_align) {
            Align::Left => format!("{body}{}", " ".repeat(pad)),
            Align::Right => format!("{}{body}", " ".repeat(pad)),
        }
    }
}

/// A line (or one cell of a line) composed of multiple segments
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyledLine {
    pub segments: Vec<Segment>,
}

impl StyledLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw (unstyled) segment
    pub fn push_raw(&mut self, text: impl Into<String>) {
        self.segments.push(Segment::raw(text));
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Append every segment from another styled line.
    pub fn extend(&mut self, other: StyledLine) {
        self.segments.extend(other.segments);
    }

    /// Pad with spaces to reach a specific width
    pub fn pad_to(&mut self, target_width: usize) {
        let current_width = self.width();
        if current_width < target_width {
            self.push_raw(" ".repeat(target_width - current_width));
        }
    }

    /// Pad on the left with spaces to reach a specific width
    pub fn pad_left_to(&mut self, target_width: usize) {
        let current_width = self.width();
        if current_width < target_width {
            self.segments
                .insert(0, Segment::raw(" ".repeat(target_width - current_width)));
        }
    }

    /// Returns the total visual width
    pub fn width(&self) -> usize {
        self.segments.iter().map(Segment::width).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Renders the entire line with ANSI escape codes
    pub fn render(&self, default_align: Align) -> String {
        self.segments
            .iter()
            .map(|s| s.render(default_align))
            .collect()
    }

    /// Text with styles dropped and padding applied
    pub fn plain(&self, default_align: Align) -> String {
        self.segments
            .iter()
            .map(|s| {
                Segment {
                    style: None,
                    ..s.clone()
                }
                .render(default_align)
            })
            .collect()
    }
}

impl From<Vec<Segment>> for StyledLine {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}
