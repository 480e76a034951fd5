//! Module defining the capabilities the composer borrows from its platform.
//!
//! The composer never takes pictures nor shares anything by itself.
//! It asks an `ImageSource` for a picture and a `ShareSink` to share the meme,
//! and they reply through a `Completion` whenever they are done.

mod continuation;


pub use self::continuation::{continuation, Abandoned, Completion, Pending};


use std::fmt;
use std::sync::Arc;

use image::{DynamicImage, GenericImageView, ImageError, ImageFormat, RgbaImage};

use render::MemeOutput;


/// Where should the picture be taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Take a new photo.
    Camera,
    /// Pick an existing one from the photo library.
    Library,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SourceKind::Camera => write!(fmt, "camera"),
            SourceKind::Library => write!(fmt, "photo library"),
        }
    }
}


/// Reply of an `ImageSource` to the picker request.
#[derive(Clone)]
pub enum PickOutcome {
    Picked(Arc<DynamicImage>),
    Canceled,
}

impl fmt::Debug for PickOutcome {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            PickOutcome::Picked(ref img) => {
                let (width, height) = img.dimensions();
                write!(fmt, "PickOutcome::Picked({}x{})", width, height)
            }
            PickOutcome::Canceled => write!(fmt, "PickOutcome::Canceled"),
        }
    }
}


/// Reply of a `ShareSink` after the share surface has been closed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The item has been shared somewhere.
    Completed,
    /// User dismissed the share surface.
    Canceled,
    /// Sharing has failed for the given reason.
    Failed(String),
}


/// The single item being shared: a rendered meme bitmap.
#[derive(Clone)]
pub struct ShareItem {
    bitmap: Arc<RgbaImage>,
    jpeg_quality: u8,
}

impl ShareItem {
    #[inline]
    pub(crate) fn new(bitmap: Arc<RgbaImage>, jpeg_quality: u8) -> Self {
        ShareItem{bitmap, jpeg_quality}
    }

    #[inline]
    pub fn bitmap(&self) -> &RgbaImage {
        &self.bitmap
    }

    /// Encode the bitmap in given format (PNG or JPEG).
    pub fn encode(&self, format: ImageFormat) -> Result<MemeOutput, ImageError> {
        match format {
            ImageFormat::Jpeg => MemeOutput::jpeg(&self.bitmap, self.jpeg_quality),
            ImageFormat::Png => MemeOutput::png(&self.bitmap),
            f => {
                warn!("Unsupported output format {:?}, falling back to PNG", f);
                MemeOutput::png(&self.bitmap)
            }
        }
    }
}

impl fmt::Debug for ShareItem {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let (width, height) = self.bitmap.dimensions();
        write!(fmt, "ShareItem{{{}x{}, jpeg_quality: {}}}", width, height, self.jpeg_quality)
    }
}


/// Source of pictures: camera and/or photo library.
pub trait ImageSource {
    /// Whether the camera can be used to take pictures.
    fn is_camera_available(&self) -> bool;

    /// Present the picker for given source kind.
    ///
    /// The picker must eventually reply through `done`, exactly once.
    fn present(&mut self, kind: SourceKind, done: Completion<PickOutcome>);

    /// Dismiss the picker after its reply has been handled.
    fn dismiss(&mut self) {}
}

/// Share surface accepting a single meme.
pub trait ShareSink {
    /// Present the share surface for given item.
    ///
    /// The surface must eventually reply through `done`, exactly once.
    fn present(&mut self, item: ShareItem, done: Completion<ShareOutcome>);
}
