//! Module implementing the builder for `Composer`.

use std::path::{Path, PathBuf};

use platform::{ImageSource, ShareSink};
use resources::{DEFAULT_FONT_NAME, Font, FontLoader, Loader};
use super::config::Config;
use super::error::BuildError;
use super::Composer;


/// Builder for `Composer`.
#[derive(Debug)]
#[must_use = "unused builder which must be used"]
pub struct Builder<S, K>
    where S: ImageSource, K: ShareSink
{
    errors: Vec<BuildError>,

    image_source: Option<S>,
    share_sink: Option<K>,

    font: Option<Font>,
    font_directory: Option<PathBuf>,
    font_name: Option<String>,

    config: Option<Config>,
    share_button: Option<bool>,
    jpeg_quality: Option<u8>,
}

impl<S, K> Builder<S, K>
    where S: ImageSource, K: ShareSink
{
    /// Create a new `Builder`.
    #[inline]
    pub fn new() -> Self {
        Builder::default()
    }
}
impl<S, K> Default for Builder<S, K>
    where S: ImageSource, K: ShareSink
{
    fn default() -> Self {
        Builder{
            errors: vec![],
            image_source: None,
            share_sink: None,
            font: None,
            font_directory: None,
            font_name: None,
            config: None,
            share_button: None,
            jpeg_quality: None,
        }
    }
}

// Setters.
impl<S, K> Builder<S, K>
    where S: ImageSource, K: ShareSink
{
    /// Set the source the pictures will be picked from.
    #[inline]
    pub fn image_source(mut self, source: S) -> Self {
        self.image_source = Some(source); self
    }

    /// Set the sink that the memes will be shared to.
    #[inline]
    pub fn share_sink(mut self, sink: K) -> Self {
        self.share_sink = Some(sink); self
    }

    /// Use given font for the captions.
    #[inline]
    pub fn font(mut self, font: Font) -> Self {
        if self.font_name.is_some() {
            return self.err(BuildError::conflict("font", "font name"));
        }
        if self.font_directory.is_some() {
            return self.err(BuildError::conflict("font", "font directory"));
        }
        self.font = Some(font); self
    }

    /// Set the directory where the caption font will be loaded from.
    ///
    /// Unless `font_name` is also given, the font is expected to be named
    /// like the built-in one.
    #[inline]
    pub fn font_directory<P: AsRef<Path>>(mut self, directory: P) -> Self {
        if self.font.is_some() {
            return self.err(BuildError::conflict("font", "font directory"));
        }
        self.font_directory = Some(directory.as_ref().to_owned()); self
    }

    /// Set the name of the font (file name without extension) to load for the captions.
    #[inline]
    pub fn font_name<N: Into<String>>(mut self, name: N) -> Self {
        if self.font.is_some() {
            return self.err(BuildError::conflict("font", "font name"));
        }
        self.font_name = Some(name.into()); self
    }

    /// Provide the whole configuration at once.
    ///
    /// Individual setters like `share_button` take precedence over it.
    #[inline]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config); self
    }

    /// Set whether the screen offers sharing the meme.
    #[inline]
    pub fn share_button(mut self, enabled: bool) -> Self {
        self.share_button = Some(enabled); self
    }

    /// Set the quality percentage of JPEG images produced for sharing.
    #[inline]
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        if quality == 0 || quality > 100 {
            return self.err(BuildError::Invalid(format!(
                "JPEG quality must be between 1 and 100, got {}", quality)));
        }
        self.jpeg_quality = Some(quality); self
    }
}

// Validation & building.
impl<S, K> Builder<S, K>
    where S: ImageSource, K: ShareSink
{
    /// Build the `Composer`.
    pub fn build(mut self) -> Result<Composer<S, K>, BuildError> {
        self.check_errors()?;

        let config = self.build_config()?;
        let font = self.build_font()?;
        let source = self.image_source.take().ok_or(BuildError::NoImageSource)?;
        let sink = self.share_sink.take().ok_or(BuildError::NoShareSink)?;
        Ok(Composer::new(source, sink, font, config))
    }
}

// Utilities for validation & building.
impl<S, K> Builder<S, K>
    where S: ImageSource, K: ShareSink
{
    #[doc(hidden)]
    fn build_config(&self) -> Result<Config, BuildError> {
        let mut config = self.config.unwrap_or_default();
        if let Some(enabled) = self.share_button {
            config.share_button = enabled;
        }
        if let Some(quality) = self.jpeg_quality {
            config.jpeg_quality = quality;
        }
        if config.jpeg_quality == 0 || config.jpeg_quality > 100 {
            return Err(BuildError::Invalid(format!(
                "JPEG quality must be between 1 and 100, got {}", config.jpeg_quality)));
        }
        if !(config.text_size > 0.0) {
            return Err(BuildError::Invalid(format!(
                "text size must be positive, got {}", config.text_size)));
        }
        Ok(config)
    }

    #[doc(hidden)]
    fn build_font(&mut self) -> Result<Font, BuildError> {
        if let Some(font) = self.font.take() {
            return Ok(font);
        }
        if self.font_directory.is_none() && self.font_name.is_none() {
            return Ok(Font::builtin());
        }

        let directory = self.font_directory.take().unwrap_or_else(|| PathBuf::from("."));
        let name = self.font_name.take().unwrap_or_else(|| DEFAULT_FONT_NAME.to_owned());
        debug!("Loading caption font `{}` from {}", name, directory.display());
        FontLoader::new(&directory).load(&name)
            .map_err(|e| BuildError::Font(name, e))
    }

    #[doc(hidden)]
    fn check_errors(&mut self) -> Result<(), BuildError> {
        if self.errors.len() > 1 {
            warn!("{} errors while configuring the composer, reporting the first one",
                self.errors.len());
        }
        match self.errors.drain(..).next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    #[doc(hidden)]
    fn err(mut self, error: BuildError) -> Self {
        self.errors.push(error); self
    }
}
