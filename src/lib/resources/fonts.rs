//! Module for loading fonts used in meme captions.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::Path;

use rusttype;

use super::Loader;
use super::filesystem::{BytesLoader, FileLoader};


pub const FILE_EXTENSION: &'static str = "ttf";

/// Name of the font that's built into the library.
pub const DEFAULT_FONT_NAME: &'static str = "DejaVuSansCondensed-Bold";

/// Condensed bold face used when no other font is given.
const DEFAULT_FONT_BYTES: &'static [u8] =
    include_bytes!("../../../data/fonts/DejaVuSansCondensed-Bold.ttf");


/// Font that can be used to render meme captions.
macro_attr! {
    #[derive(Clone, NewtypeDeref!, NewtypeFrom!)]
    pub struct Font(rusttype::Font<'static>);
}

impl Font {
    /// Parse a font from the content of a TrueType file.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, FontError> {
        rusttype::Font::try_from_vec(bytes).map(Font).ok_or(FontError::Invalid)
    }

    /// The embedded condensed bold font.
    pub fn builtin() -> Self {
        lazy_static! {
            static ref BUILTIN: Font = Font(
                rusttype::Font::try_from_bytes(DEFAULT_FONT_BYTES)
                    .expect("embedded font is a valid TrueType file"));
        }
        BUILTIN.clone()
    }
}

impl Default for Font {
    fn default() -> Self {
        Font::builtin()
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Font({} glyphs)", self.0.glyph_count())
    }
}


/// Loader of `.ttf` fonts from a directory.
#[derive(Debug)]
pub struct FontLoader {
    inner: BytesLoader<'static>,
}

impl FontLoader {
    pub fn new<D: AsRef<Path>>(directory: D) -> Self {
        FontLoader{
            inner: BytesLoader::new(
                FileLoader::for_extension(directory, FILE_EXTENSION))
        }
    }
}

impl Loader for FontLoader {
    type Item = Font;
    type Err = FontError;

    fn load<'n>(&self, name: &'n str) -> Result<Font, Self::Err> {
        let bytes = self.inner.load(name)?;
        let font = Font::from_bytes(bytes).map_err(|e| {
            error!("Font file for `{}` resource is not a valid TrueType font", name);
            e
        })?;
        debug!("Font `{}` loaded successfully", name);
        Ok(font)
    }
}


/// Error that may occur while loading a font.
#[derive(Debug)]
pub enum FontError {
    /// Font file couldn't be found or read.
    Io(io::Error),
    /// The file doesn't contain a usable font.
    Invalid,
}

impl From<io::Error> for FontError {
    fn from(e: io::Error) -> Self {
        FontError::Io(e)
    }
}

impl Error for FontError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            FontError::Io(ref e) => Some(e),
            FontError::Invalid => None,
        }
    }
}

impl fmt::Display for FontError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FontError::Io(ref e) => write!(fmt, "cannot read font file: {}", e),
            FontError::Invalid => write!(fmt, "not a valid TrueType font"),
        }
    }
}
