//! Module implementing the meme screen and its flattening into a bitmap.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use image::{DynamicImage, GenericImageView, RgbaImage};
use image::imageops::{self, FilterType};
use rusttype::{point, Rect};

use model::{CaptionField, CaptionStyle, Color, ContentFit, Size};
use resources::Font;
use super::text::{self, Style};


/// Height of the toolbars at the top & bottom of the screen.
pub const TOOLBAR_HEIGHT: u32 = 44;
/// Horizontal inset of caption fields from the screen edges.
pub const FIELD_MARGIN: u32 = 16;

const BACKGROUND_COLOR: Color = Color(0x0, 0x0, 0x0);
const TOOLBAR_COLOR: Color = Color(0xf7, 0xf7, 0xf7);

const RESIZE_FILTER: FilterType = FilterType::Lanczos3;


/// Visibility of the two toolbars (the "chrome").
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Chrome {
    pub top_bar_hidden: bool,
    pub bottom_bar_hidden: bool,
}

impl Chrome {
    #[inline]
    pub fn visible() -> Self {
        Chrome{top_bar_hidden: false, bottom_bar_hidden: false}
    }

    #[inline]
    pub fn hidden() -> Self {
        Chrome{top_bar_hidden: true, bottom_bar_hidden: true}
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        !self.top_bar_hidden && !self.bottom_bar_hidden
    }
}


/// View displaying the picked picture.
#[derive(Clone, Default)]
pub struct ImageView {
    pub image: Option<Arc<DynamicImage>>,
    pub content_fit: ContentFit,
}

impl fmt::Debug for ImageView {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut ds = fmt.debug_struct("ImageView");
        match self.image {
            Some(ref img) => {
                let (width, height) = img.dimensions();
                ds.field("image", &format_args!("{}x{}", width, height));
            }
            None => { ds.field("image", &"None"); }
        }
        ds.field("content_fit", &self.content_fit).finish()
    }
}


/// Single-line editable text field holding a caption.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextField {
    pub text: String,
}

impl TextField {
    #[inline]
    pub fn new<S: Into<String>>(text: S) -> Self {
        TextField{text: text.into()}
    }
}


/// The meme screen: a picture covering the whole screen,
/// two caption fields over it, and toolbars at the top & bottom.
pub struct Screen {
    bounds: Size,
    origin_y: f32,
    pub image_view: ImageView,
    top_field: TextField,
    bottom_field: TextField,
    pub chrome: Chrome,
    style: CaptionStyle,
    font: Font,
}

impl Screen {
    pub fn new(bounds: Size, font: Font, style: CaptionStyle) -> Self {
        Screen{
            bounds,
            origin_y: 0.0,
            image_view: ImageView::default(),
            top_field: TextField::new(CaptionField::Top.placeholder()),
            bottom_field: TextField::new(CaptionField::Bottom.placeholder()),
            chrome: Chrome::visible(),
            style,
            font,
        }
    }
}

impl Screen {
    #[inline]
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    #[inline]
    pub fn set_bounds(&mut self, bounds: Size) {
        self.bounds = bounds;
    }

    /// Vertical offset of the whole view; negative means shifted up.
    #[inline]
    pub fn origin_y(&self) -> f32 {
        self.origin_y
    }

    #[inline]
    pub fn set_origin_y(&mut self, y: f32) {
        self.origin_y = y;
    }

    #[inline]
    pub fn style(&self) -> &CaptionStyle {
        &self.style
    }

    #[inline]
    pub fn set_style(&mut self, style: CaptionStyle) {
        self.style = style;
    }

    #[inline]
    pub fn font(&self) -> &Font {
        &self.font
    }

    #[inline]
    pub fn field(&self, field: CaptionField) -> &TextField {
        match field {
            CaptionField::Top => &self.top_field,
            CaptionField::Bottom => &self.bottom_field,
        }
    }

    #[inline]
    pub fn field_mut(&mut self, field: CaptionField) -> &mut TextField {
        match field {
            CaptionField::Top => &mut self.top_field,
            CaptionField::Bottom => &mut self.bottom_field,
        }
    }

    /// Rectangle occupied by given caption field (in unshifted view coordinates).
    pub fn field_rect(&self, field: CaptionField) -> Rect<f32> {
        let width = self.bounds.width as f32;
        let height = self.bounds.height as f32;
        let toolbar = TOOLBAR_HEIGHT as f32;
        let margin = FIELD_MARGIN as f32;

        let (min_y, max_y) = match field {
            CaptionField::Top => (toolbar, (height / 2.0).max(toolbar)),
            CaptionField::Bottom => ((height / 2.0).min(height - toolbar), height - toolbar),
        };
        Rect{min: point(margin, min_y), max: point((width - margin).max(margin), max_y)}
    }

    /// Hide the chrome until the returned guard is dropped.
    pub fn hide_chrome(&mut self) -> ChromeHidden {
        let previous = self.chrome;
        self.chrome = Chrome::hidden();
        trace!("Chrome hidden (was {:?})", previous);
        ChromeHidden{screen: self, previous}
    }
}

impl Screen {
    /// Flatten whatever is currently visible on the screen into a bitmap
    /// of the screen's dimensions.
    pub fn snapshot(&self) -> RgbaImage {
        let Size{width, height} = self.bounds;
        debug!("Taking a {}x{} snapshot of the screen", width, height);

        let mut view = RgbaImage::from_pixel(width, height, BACKGROUND_COLOR.to_rgba(0xff));
        if width == 0 || height == 0 {
            warn!("Empty screen bounds, snapshot will be empty");
            return view;
        }

        if let Some(ref image) = self.image_view.image {
            self.draw_image(&mut view, image);
        }
        for field in CaptionField::iter_variants() {
            self.draw_caption(&mut view, field);
        }
        self.draw_chrome(&mut view);

        let offset = self.origin_y.round() as i64;
        if offset == 0 {
            return view;
        }
        trace!("Shifting the snapshot by {}px", offset);
        let mut shifted = RgbaImage::from_pixel(width, height, BACKGROUND_COLOR.to_rgba(0xff));
        imageops::replace(&mut shifted, &view, 0, offset);
        shifted
    }

    fn draw_image(&self, canvas: &mut RgbaImage, image: &DynamicImage) {
        let (width, height) = canvas.dimensions();
        let (img_width, img_height) = image.dimensions();
        if img_width == 0 || img_height == 0 {
            warn!("Picture has no pixels, not drawing it");
            return;
        }
        trace!("Drawing {}x{} picture with {:?}", img_width, img_height,
            self.image_view.content_fit);

        match self.image_view.content_fit {
            ContentFit::Fit => {
                let scaled = image.resize(width, height, RESIZE_FILTER).to_rgba8();
                let (scaled_width, scaled_height) = scaled.dimensions();
                let x = (width - scaled_width.min(width)) / 2;
                let y = (height - scaled_height.min(height)) / 2;
                imageops::overlay(canvas, &scaled, x as i64, y as i64);
            }
            ContentFit::Fill => {
                let scaled = image.resize_to_fill(width, height, RESIZE_FILTER).to_rgba8();
                imageops::overlay(canvas, &scaled, 0, 0);
            }
        }
    }

    fn draw_caption(&self, canvas: &mut RgbaImage, field: CaptionField) {
        let text = &self.field(field).text;
        if text.trim().is_empty() {
            return;
        }
        text::check(&self.font, text);

        let (width, height) = canvas.dimensions();
        let style = Style::new(&self.font, self.style.size);
        let mask = text::render_mask(width, height, text,
                                     (field.valign(), self.style.halign),
                                     self.field_rect(field), &style);
        text::paint(canvas, &mask, &self.style);
    }

    fn draw_chrome(&self, canvas: &mut RgbaImage) {
        let (width, height) = canvas.dimensions();
        let bar_height = TOOLBAR_HEIGHT.min(height);
        let bar = RgbaImage::from_pixel(width, bar_height, TOOLBAR_COLOR.to_rgba(0xff));
        if !self.chrome.top_bar_hidden {
            imageops::replace(canvas, &bar, 0, 0);
        }
        if !self.chrome.bottom_bar_hidden {
            imageops::replace(canvas, &bar, 0, (height - bar_height) as i64);
        }
    }
}

impl fmt::Debug for Screen {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Screen")
            .field("bounds", &self.bounds)
            .field("origin_y", &self.origin_y)
            .field("image_view", &self.image_view)
            .field("top_field", &self.top_field)
            .field("bottom_field", &self.bottom_field)
            .field("chrome", &self.chrome)
            .field("style", &self.style)
            .finish()
    }
}


/// Guard returned by `Screen::hide_chrome`.
///
/// Gives read access to the screen while the chrome is hidden,
/// and restores the previous chrome when dropped.
pub struct ChromeHidden<'s> {
    screen: &'s mut Screen,
    previous: Chrome,
}

impl<'s> Deref for ChromeHidden<'s> {
    type Target = Screen;

    fn deref(&self) -> &Self::Target {
        self.screen
    }
}

impl<'s> Drop for ChromeHidden<'s> {
    fn drop(&mut self) {
        self.screen.chrome = self.previous;
        trace!("Chrome restored to {:?}", self.previous);
    }
}
