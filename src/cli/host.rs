//! Module implementing the shell as the composer's platform.
//!
//! Pictures come from files named on the command line,
//! and memes are "shared" by writing them out.

use std::io::{self, Write};
use std::path::Path;

use image::ImageFormat;
use mememe::{Completion, ImageSource, PhotoLibrary, PickOutcome, PictureError,
             ShareItem, ShareOutcome, ShareSink, SourceKind};


/// Image source picking a single picture given upfront.
#[derive(Debug)]
pub struct ArgvSource {
    library: PhotoLibrary,
    picture: String,
    error: Option<PictureError>,
}

impl ArgvSource {
    pub fn new<D: AsRef<Path>, P: Into<String>>(library: D, picture: P) -> Self {
        ArgvSource{
            library: PhotoLibrary::new(library),
            picture: picture.into(),
            error: None,
        }
    }

    /// Error that made the picker give up, if any.
    #[inline]
    pub fn error(&self) -> Option<&PictureError> {
        self.error.as_ref()
    }
}

impl ImageSource for ArgvSource {
    fn is_camera_available(&self) -> bool {
        false
    }

    fn present(&mut self, kind: SourceKind, done: Completion<PickOutcome>) {
        if kind == SourceKind::Camera {
            warn!("No camera in the shell");
            return done.complete(PickOutcome::Canceled);
        }
        debug!("Picking `{}` from {}", self.picture, kind);
        match self.library.pick(&self.picture) {
            Ok(image) => done.complete(PickOutcome::Picked(image)),
            Err(e) => {
                error!("Cannot pick `{}`: {}", self.picture, e);
                self.error = Some(e);
                done.complete(PickOutcome::Canceled);
            }
        }
    }

    fn dismiss(&mut self) {
        trace!("Picker dismissed");
    }
}


/// Share sink that writes the meme to a file or stdout.
pub struct WriterSink {
    output: Box<dyn Write>,
    format: ImageFormat,
    outcome: Option<ShareOutcome>,
}

impl WriterSink {
    pub fn new<W: Write + 'static>(output: W, format: ImageFormat) -> Self {
        WriterSink{output: Box::new(output), format, outcome: None}
    }

    /// How the last share turned out, if there was any.
    #[inline]
    pub fn outcome(&self) -> Option<&ShareOutcome> {
        self.outcome.as_ref()
    }

    fn write(&mut self, item: &ShareItem) -> io::Result<usize> {
        let output = item.encode(self.format)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        trace!("Writing {} bytes of {}...",
            output.len(), output.mime_type().map(|m| m.to_string()).unwrap_or_default());
        self.output.write_all(output.bytes())?;
        self.output.flush()?;
        Ok(output.len())
    }
}

impl ShareSink for WriterSink {
    fn present(&mut self, item: ShareItem, done: Completion<ShareOutcome>) {
        debug!("Sharing {:?} as {:?}", item, self.format);
        let outcome = match self.write(&item) {
            Ok(len) => {
                debug!("Meme written ({} bytes)", len);
                ShareOutcome::Completed
            }
            Err(e) => ShareOutcome::Failed(format!("{}", e)),
        };
        self.outcome = Some(outcome.clone());
        done.complete(outcome);
    }
}
