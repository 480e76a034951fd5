//! Module implementing the `Meme` type.

use std::fmt;
use std::sync::Arc;

use image::{DynamicImage, GenericImageView, RgbaImage};


/// A finished meme: two captions burned into a picture.
///
/// Memes are created from scratch on every share and never modified afterwards,
/// which is why all the fields are read-only.
#[derive(Clone)]
pub struct Meme {
    top_text: String,
    bottom_text: String,
    original_image: Arc<DynamicImage>,
    rendered_image: Arc<RgbaImage>,
}

impl Meme {
    #[inline]
    pub(crate) fn new(top_text: String, bottom_text: String,
                      original_image: Arc<DynamicImage>,
                      rendered_image: RgbaImage) -> Self {
        Meme{top_text, bottom_text, original_image,
             rendered_image: Arc::new(rendered_image)}
    }
}

impl Meme {
    /// Text of the top caption.
    #[inline]
    pub fn top_text(&self) -> &str {
        &self.top_text
    }

    /// Text of the bottom caption.
    #[inline]
    pub fn bottom_text(&self) -> &str {
        &self.bottom_text
    }

    /// The picture as it was picked, without any captions.
    #[inline]
    pub fn original_image(&self) -> &Arc<DynamicImage> {
        &self.original_image
    }

    /// The flattened screen with captions burned in.
    #[inline]
    pub fn rendered_image(&self) -> &Arc<RgbaImage> {
        &self.rendered_image
    }
}

impl fmt::Debug for Meme {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let (orig_width, orig_height) = self.original_image.dimensions();
        let (width, height) = self.rendered_image.dimensions();
        fmt.debug_struct("Meme")
            .field("top_text", &self.top_text)
            .field("bottom_text", &self.bottom_text)
            .field("original_image", &format_args!("{}x{}", orig_width, orig_height))
            .field("rendered_image", &format_args!("{}x{}", width, height))
            .finish()
    }
}
