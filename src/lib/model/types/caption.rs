//! Module implementing the caption field & style types.

use std::fmt;

use model::constants::{DEFAULT_BOTTOM_TEXT, DEFAULT_COLOR, DEFAULT_HALIGN,
                       DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH, DEFAULT_TEXT_SIZE,
                       DEFAULT_TOP_TEXT};
use super::align::{HAlign, VAlign};
use super::color::Color;


macro_attr! {
    /// One of the two caption fields of the meme screen.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, IterVariants!(CaptionFields))]
    pub enum CaptionField {
        /// Caption above the picture.
        Top,
        /// Caption below the picture.
        Bottom,
    }
}

impl CaptionField {
    /// Placeholder text the field holds before it's edited.
    #[inline]
    pub fn placeholder(&self) -> &'static str {
        match *self {
            CaptionField::Top => DEFAULT_TOP_TEXT,
            CaptionField::Bottom => DEFAULT_BOTTOM_TEXT,
        }
    }

    /// Vertical anchoring of the text within the field.
    ///
    /// Multi-line captions grow away from the edge of the screen they're closest to.
    #[inline]
    pub fn valign(&self) -> VAlign {
        match *self {
            CaptionField::Top => VAlign::Top,
            CaptionField::Bottom => VAlign::Bottom,
        }
    }
}

impl fmt::Display for CaptionField {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CaptionField::Top => write!(fmt, "top"),
            CaptionField::Bottom => write!(fmt, "bottom"),
        }
    }
}


/// Text attributes shared by both caption fields.
#[derive(Clone, Copy, PartialEq)]
pub struct CaptionStyle {
    /// Size of the text.
    pub size: f32,
    /// Color the glyphs are filled with.
    pub color: Color,
    /// Color of the glyph outline.
    pub stroke_color: Color,
    /// Width of the outline as a percentage of `size`.
    ///
    /// Negative width means the text is stroked *and* filled,
    /// positive one means it is only stroked.
    pub stroke_width: f32,
    /// Horizontal alignment of text within its field.
    pub halign: HAlign,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        CaptionStyle{
            size: DEFAULT_TEXT_SIZE,
            color: DEFAULT_COLOR,
            stroke_color: DEFAULT_STROKE_COLOR,
            stroke_width: DEFAULT_STROKE_WIDTH,
            halign: DEFAULT_HALIGN,
        }
    }
}

impl CaptionStyle {
    /// Whether the glyphs' interior is painted with `color`.
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.stroke_width <= 0.0
    }

    /// Outline thickness in pixels.
    ///
    /// Zero stroke width yields no outline at all, but anything else
    /// is at least a single pixel so that the outline remains visible.
    pub fn outline_px(&self) -> u32 {
        if self.stroke_width == 0.0 {
            return 0;
        }
        let px = self.size * self.stroke_width.abs() / 100.0;
        (px.round() as u32).max(1)
    }
}

impl fmt::Debug for CaptionStyle {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{halign:?}{{{size}pt [{color}] {stroke_width}%[{stroke_color}]}}",
            halign = self.halign,
            size = self.size,
            color = self.color,
            stroke_width = self.stroke_width,
            stroke_color = self.stroke_color)
    }
}
