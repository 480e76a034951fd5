//! Module which defines the meme composer.
//!
//! The composer is the brain of the meme screen. It reacts to events
//! coming from the user (taps, edits) and the device (rotation, keyboard),
//! keeps the screen consistent with them, and produces memes on demand.

mod builder;
mod config;
mod controls;
mod error;

#[cfg(test)]
mod tests;

pub use self::builder::Builder;
pub use self::config::Config;
pub use self::controls::Controls;
pub use self::error::{BuildError, ComposeError};


use std::fmt;
use std::sync::Arc;

use image::{DynamicImage, GenericImageView};
use unicode_normalization::UnicodeNormalization;

use model::{CaptionField, ContentFit, DeviceOrientation, Meme, MAX_CAPTION_LENGTH, Size};
use platform::{self, Abandoned, ImageSource, Pending, PickOutcome, ShareItem, ShareOutcome,
               ShareSink, SourceKind};
use render::{Chrome, Screen};
use resources::Font;


/// Whether the composer has something to make a meme from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No picture has been picked yet (or it was discarded).
    Empty,
    /// A picture is on the screen and can be captioned & shared.
    Ready,
}


/// The meme composer.
///
/// Owns the meme screen together with the platform's `ImageSource` and `ShareSink`,
/// and drives them in response to events.
pub struct Composer<S, K>
    where S: ImageSource, K: ShareSink
{
    source: S,
    sink: K,
    config: Config,
    screen: Screen,

    is_portrait_device: bool,
    is_landscape_image: bool,
    base_view_y_offset: f32,
    view_shifted: bool,
    controls: Controls,
    active_field: Option<CaptionField>,

    pending_pick: Option<Pending<PickOutcome>>,
    pending_share: Option<Pending<ShareOutcome>>,
}

impl<S, K> Composer<S, K>
    where S: ImageSource, K: ShareSink
{
    #[inline]
    pub(super) fn new(source: S, sink: K, font: Font, config: Config) -> Self {
        let screen = Screen::new(Size::new(0, 0), font, config.caption_style());
        Composer{
            source, sink, config, screen,
            is_portrait_device: false,
            is_landscape_image: false,
            base_view_y_offset: 0.0,
            view_shifted: false,
            controls: Controls::default(),
            active_field: None,
            pending_pick: None,
            pending_share: None,
        }
    }

    /// Create a builder for the `Composer`.
    #[inline]
    pub fn builder() -> Builder<S, K> {
        Builder::new()
    }
}

// Screen lifecycle & pictures.
impl<S, K> Composer<S, K>
    where S: ImageSource, K: ShareSink
{
    /// Set up the screen for given bounds, before anything is shown.
    pub fn initialize(&mut self, bounds: Size) {
        self.screen.set_bounds(bounds);
        self.base_view_y_offset = self.screen.origin_y();
        self.view_shifted = false;

        self.controls.set_enabled(false, self.config.share_button);
        self.controls.set_pickers(true, self.source.is_camera_available());
        self.screen.set_style(self.config.caption_style());

        self.is_portrait_device = bounds.is_portrait();
        self.update_content_fit();
        info!("Meme screen initialized at {} ({}), camera {}available",
            bounds, if self.is_portrait_device { "portrait" } else { "landscape" },
            if self.controls.camera { "" } else { "not " });
    }

    /// Ask the image source for a picture.
    ///
    /// Returns whether the picker has actually been presented.
    pub fn request_image(&mut self, kind: SourceKind) -> bool {
        if self.pending_pick.is_some() {
            warn!("Picker is already shown, ignoring request for {}", kind);
            return false;
        }
        if kind == SourceKind::Camera && !self.source.is_camera_available() {
            warn!("Camera is not available");
            return false;
        }
        if !self.controls.pick(kind) {
            warn!("Picking from {} is currently disabled", kind);
            return false;
        }

        debug!("Presenting picker for {}", kind);
        let (done, pending) = platform::continuation();
        self.pending_pick = Some(pending);
        self.source.present(kind, done);
        self.pump();
        true
    }

    /// Handle a picture that the user has picked.
    pub fn on_image_picked(&mut self, image: Arc<DynamicImage>) {
        let (width, height) = image.dimensions();
        info!("Picked a {}x{} picture", width, height);

        self.is_landscape_image = width > height;
        self.screen.image_view.image = Some(image);
        self.controls.set_enabled(true, self.config.share_button);
        self.update_content_fit();
        self.source.dismiss();
    }

    /// Handle the user backing out of the picker.
    pub fn on_image_pick_canceled(&mut self) {
        debug!("Picking a picture was canceled");
        self.source.dismiss();
    }

    /// Handle the device changing its orientation.
    pub fn on_device_rotated(&mut self, orientation: DeviceOrientation, bounds: Size) {
        debug!("Device rotated to {:?} ({})", orientation, bounds);
        self.is_portrait_device = orientation.is_portrait();
        self.screen.set_bounds(bounds);
        self.update_content_fit();
    }

    /// How the picture should be fitted into the screen right now.
    #[inline]
    pub fn content_fit(&self) -> ContentFit {
        ContentFit::for_orientations(self.is_portrait_device, self.is_landscape_image)
    }

    /// Discard the picture & captions, starting over.
    pub fn on_cancel(&mut self) {
        info!("Discarding the meme");
        self.screen.image_view.image = None;
        for field in CaptionField::iter_variants() {
            self.screen.field_mut(field).text = field.placeholder().to_owned();
        }
        self.controls.set_enabled(false, self.config.share_button);
    }

    fn update_content_fit(&mut self) {
        let fit = self.content_fit();
        if self.screen.image_view.content_fit != fit {
            trace!("Content fit changes to {:?}", fit);
        }
        self.screen.image_view.content_fit = fit;
    }
}

// Caption editing & the keyboard.
impl<S, K> Composer<S, K>
    where S: ImageSource, K: ShareSink
{
    /// Start editing a caption field, which clears its text.
    pub fn begin_editing(&mut self, field: CaptionField) {
        if !self.controls.field(field) {
            warn!("Cannot edit the {} caption before a picture is picked", field);
            return;
        }
        debug!("Editing the {} caption", field);
        self.screen.field_mut(field).text.clear();
        self.active_field = Some(field);
    }

    /// Type some text at the end of a caption field.
    pub fn insert_text(&mut self, field: CaptionField, text: &str) {
        if !self.controls.field(field) {
            warn!("Ignoring text typed into disabled {} caption", field);
            return;
        }
        let mut caption = self.screen.field(field).text.clone();
        caption.push_str(text);
        self.screen.field_mut(field).text = normalize_caption(&caption);
    }

    /// Replace the whole text of a caption field.
    pub fn set_text<T: Into<String>>(&mut self, field: CaptionField, text: T) {
        if !self.controls.field(field) {
            warn!("Ignoring text set on disabled {} caption", field);
            return;
        }
        let text = text.into();
        self.screen.field_mut(field).text = normalize_caption(&text);
    }

    /// Finish editing a caption field.
    ///
    /// Always returns `false`, i.e. the field doesn't submit anything.
    pub fn end_editing(&mut self, field: CaptionField) -> bool {
        debug!("Finished editing the {} caption", field);
        self.screen.set_origin_y(self.base_view_y_offset);
        self.view_shifted = false;
        self.controls.set_pickers(true, self.source.is_camera_available());
        if self.active_field == Some(field) {
            self.active_field = None;
        }
        false
    }

    /// Handle the on-screen keyboard appearing.
    ///
    /// Only the bottom caption would be covered by the keyboard,
    /// so the view is moved up just when that one is being edited.
    pub fn on_keyboard_show(&mut self, keyboard_height: f32) {
        if self.active_field != Some(CaptionField::Bottom) {
            trace!("Keyboard shown while not editing the bottom caption");
            return;
        }
        if self.view_shifted {
            trace!("View already moved up for the keyboard");
            return;
        }
        debug!("Moving the view up by {} for the keyboard", keyboard_height);
        let y = self.screen.origin_y() - keyboard_height;
        self.screen.set_origin_y(y);
        self.view_shifted = true;
        self.controls.set_pickers(false, false);
    }
}

// Making & sharing memes.
impl<S, K> Composer<S, K>
    where S: ImageSource, K: ShareSink
{
    /// Flatten the screen (without toolbars) into a new `Meme`.
    pub fn render_meme(&mut self) -> Result<Meme, ComposeError> {
        let image = self.screen.image_view.image.clone().ok_or(ComposeError::NoImage)?;
        let bitmap = {
            let screen = self.screen.hide_chrome();
            screen.snapshot()
        };
        let meme = Meme::new(self.screen.field(CaptionField::Top).text.clone(),
                             self.screen.field(CaptionField::Bottom).text.clone(),
                             image, bitmap);
        debug!("Rendered {:?}", meme);
        Ok(meme)
    }

    /// Render a meme and offer it to the share sink.
    ///
    /// The meme that's been handed over is returned. How the sharing turned out
    /// is only logged, as it doesn't affect the composer in any way.
    pub fn share(&mut self) -> Result<Meme, ComposeError> {
        if !self.config.share_button {
            return Err(ComposeError::ShareDisabled);
        }
        if self.pending_share.is_some() {
            return Err(ComposeError::SharePending);
        }
        let meme = self.render_meme()?;

        info!("Sharing {:?}", meme);
        let item = ShareItem::new(meme.rendered_image().clone(), self.config.jpeg_quality);
        let (done, pending) = platform::continuation();
        self.pending_share = Some(pending);
        self.sink.present(item, done);
        self.pump();
        Ok(meme)
    }

    /// Deliver replies from the platform that have arrived in the meantime.
    ///
    /// Returns whether anything has been delivered.
    pub fn pump(&mut self) -> bool {
        let mut delivered = false;

        if let Some(reply) = self.pending_pick.as_mut().and_then(Pending::poll) {
            self.pending_pick = None;
            delivered = true;
            match reply {
                Ok(PickOutcome::Picked(image)) => self.on_image_picked(image),
                Ok(PickOutcome::Canceled) => self.on_image_pick_canceled(),
                Err(Abandoned) => {
                    debug!("Picker went away without a reply");
                    self.on_image_pick_canceled();
                }
            }
        }

        if let Some(reply) = self.pending_share.as_mut().and_then(Pending::poll) {
            self.pending_share = None;
            delivered = true;
            match reply {
                Ok(ShareOutcome::Completed) => info!("Meme shared"),
                Ok(ShareOutcome::Canceled) => debug!("Sharing canceled"),
                Ok(ShareOutcome::Failed(reason)) => error!("Sharing failed: {}", reason),
                Err(Abandoned) => debug!("Share surface went away without a reply"),
            }
        }

        delivered
    }
}

// Accessors.
impl<S, K> Composer<S, K>
    where S: ImageSource, K: ShareSink
{
    #[inline]
    pub fn phase(&self) -> Phase {
        if self.screen.image_view.image.is_some() { Phase::Ready } else { Phase::Empty }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    #[inline]
    pub fn controls(&self) -> Controls {
        self.controls
    }

    /// Current text of given caption field.
    #[inline]
    pub fn text(&self, field: CaptionField) -> &str {
        &self.screen.field(field).text
    }

    #[inline]
    pub fn picked_image(&self) -> Option<&Arc<DynamicImage>> {
        self.screen.image_view.image.as_ref()
    }

    #[inline]
    pub fn active_field(&self) -> Option<CaptionField> {
        self.active_field
    }

    #[inline]
    pub fn is_portrait_device(&self) -> bool {
        self.is_portrait_device
    }

    #[inline]
    pub fn is_landscape_image(&self) -> bool {
        self.is_landscape_image
    }

    #[inline]
    pub fn view_y_offset(&self) -> f32 {
        self.screen.origin_y()
    }

    /// Whether a picker or share surface is waiting for a reply.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending_pick.is_some() || self.pending_share.is_some()
    }

    #[inline]
    pub fn source(&self) -> &S {
        &self.source
    }

    #[inline]
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    #[inline]
    pub fn sink(&self) -> &K {
        &self.sink
    }

    #[inline]
    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// Capture the complete state of the screen for later comparison.
    pub fn state(&self) -> StateSnapshot {
        StateSnapshot{
            picked_image: self.picked_image().map(|img| img.dimensions().into()),
            top_text: self.text(CaptionField::Top).to_owned(),
            bottom_text: self.text(CaptionField::Bottom).to_owned(),
            is_portrait_device: self.is_portrait_device,
            is_landscape_image: self.is_landscape_image,
            base_view_y_offset: self.base_view_y_offset,
            view_y_offset: self.screen.origin_y(),
            content_fit: self.screen.image_view.content_fit,
            controls: self.controls,
            active_field: self.active_field,
            chrome: self.screen.chrome,
        }
    }
}

impl<S, K> fmt::Debug for Composer<S, K>
    where S: ImageSource, K: ShareSink
{
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Composer")
            .field("phase", &self.phase())
            .field("screen", &self.screen)
            .field("controls", &self.controls)
            .field("active_field", &self.active_field)
            .field("is_pending", &self.is_pending())
            .finish()
    }
}


/// Comparable copy of the composer's screen state.
#[derive(Clone, Debug, PartialEq)]
pub struct StateSnapshot {
    /// Size of the picked picture, if any.
    pub picked_image: Option<Size>,
    pub top_text: String,
    pub bottom_text: String,
    pub is_portrait_device: bool,
    pub is_landscape_image: bool,
    pub base_view_y_offset: f32,
    pub view_y_offset: f32,
    pub content_fit: ContentFit,
    pub controls: Controls,
    pub active_field: Option<CaptionField>,
    pub chrome: Chrome,
}


/// NFC-normalize the caption & cut it down to the maximum length.
fn normalize_caption(text: &str) -> String {
    let mut result: String = text.nfc().collect();
    if let Some((index, _)) = result.char_indices().nth(MAX_CAPTION_LENGTH) {
        warn!("Caption too long, truncating to {} characters", MAX_CAPTION_LENGTH);
        result.truncate(index);
    }
    result
}
