//! Module defining constants relevant to the data model.

use super::types::{Color, HAlign};


/// Placeholder text of the top caption field.
pub const DEFAULT_TOP_TEXT: &'static str = "TOP";
/// Placeholder text of the bottom caption field.
pub const DEFAULT_BOTTOM_TEXT: &'static str = "BOTTOM";

/// Size of the caption text (in points, which are pixels here).
pub const DEFAULT_TEXT_SIZE: f32 = 40.0;

/// Default color of the caption text.
pub const DEFAULT_COLOR: Color = Color(0xff, 0xff, 0xff);
/// Default color of the caption outline.
/// This should be the inversion of DEFAULT_COLOR.
pub const DEFAULT_STROKE_COLOR: Color = Color(0x0, 0x0, 0x0);

/// Default stroke width, as a percentage of the text size.
///
/// Negative values mean the text is both stroked and filled,
/// positive ones that it's only stroked (hollow).
pub const DEFAULT_STROKE_WIDTH: f32 = -3.0;

/// Default horizontal alignment of caption text.
pub const DEFAULT_HALIGN: HAlign = HAlign::Center;

/// Maximum length (in Unicode codepoints) of a single caption text.
pub const MAX_CAPTION_LENGTH: usize = 256;

/// Default quality of JPEG images produced from memes (in %).
pub const DEFAULT_JPEG_QUALITY: u8 = 85;
