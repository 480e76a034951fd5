//! Module with composer configuration.

use model::{CaptionStyle, Color, HAlign, DEFAULT_COLOR, DEFAULT_HALIGN, DEFAULT_JPEG_QUALITY,
            DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH, DEFAULT_TEXT_SIZE};


/// Structure holding configuration for the `Composer`.
///
/// Can be deserialized from JSON (or any other serde format),
/// with all the fields being optional.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Whether the screen offers sharing the meme.
    pub share_button: bool,
    /// Size of the caption text.
    pub text_size: f32,
    /// Width of caption outline as a percentage of `text_size`.
    /// Negative values mean the text is also filled.
    pub stroke_width: f32,
    pub text_color: Color,
    pub stroke_color: Color,
    /// Horizontal alignment of caption lines.
    pub halign: HAlign,
    /// Quality of shared JPEG images (in %).
    pub jpeg_quality: u8,
}

impl Default for Config {
    /// Initialize Config with default values.
    fn default() -> Self {
        Config{
            share_button: true,
            text_size: DEFAULT_TEXT_SIZE,
            stroke_width: DEFAULT_STROKE_WIDTH,
            text_color: DEFAULT_COLOR,
            stroke_color: DEFAULT_STROKE_COLOR,
            halign: DEFAULT_HALIGN,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl Config {
    /// Style that both caption fields are rendered with.
    pub fn caption_style(&self) -> CaptionStyle {
        CaptionStyle{
            size: self.text_size,
            color: self.text_color,
            stroke_color: self.stroke_color,
            stroke_width: self.stroke_width,
            halign: self.halign,
        }
    }
}
