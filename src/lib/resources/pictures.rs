//! Module handling the pictures that memes are made from.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::io;
use std::path::Path;
use std::sync::Arc;

use image::{self, DynamicImage, GenericImageView, ImageError, ImageFormat};

use super::Loader;
use super::filesystem::{self, FileLoader};


lazy_static! {
    /// Map of picture file extensions to supported image formats.
    pub static ref IMAGE_FORMAT_EXTENSIONS: HashMap<&'static str, ImageFormat> = hashmap!{
        "bmp" => ImageFormat::Bmp,
        "gif" => ImageFormat::Gif,
        "jpeg" => ImageFormat::Jpeg,
        "jpg" => ImageFormat::Jpeg,
        "png" => ImageFormat::Png,
    };
}


/// A directory of pictures the user can pick from.
///
/// Pictures are looked up by their name, i.e. file name without the extension.
/// Explicit file paths are accepted, too.
#[derive(Debug)]
pub struct PhotoLibrary {
    inner: FileLoader<'static>,
}

impl PhotoLibrary {
    pub fn new<D: AsRef<Path>>(directory: D) -> Self {
        PhotoLibrary{
            inner: FileLoader::for_extensions(directory, IMAGE_FORMAT_EXTENSIONS.keys()),
        }
    }
}

impl PhotoLibrary {
    /// Pick a picture either by its name within the library or by a file path.
    pub fn pick(&self, name_or_path: &str) -> Result<Arc<DynamicImage>, PictureError> {
        let path = Path::new(name_or_path);
        if path.is_file() {
            trace!("Picture `{}` is an existing file", name_or_path);
            return decode_file(path).map(Arc::new);
        }
        self.load(name_or_path).map(Arc::new)
    }
}

impl Loader for PhotoLibrary {
    type Item = DynamicImage;
    type Err = PictureError;

    fn load<'n>(&self, name: &'n str) -> Result<Self::Item, Self::Err> {
        let path = self.inner.resolve(name)?;
        decode_file(&path)
    }
}

/// Read & decode the picture file, guessing its format from the content.
fn decode_file(path: &Path) -> Result<DynamicImage, PictureError> {
    let file = ::std::fs::File::open(path)?;
    let bytes = filesystem::read_all(file, &path.display().to_string())?;
    let img = image::load_from_memory(&bytes)?;
    let (width, height) = img.dimensions();
    debug!("Picture {} loaded ({}x{})", path.display(), width, height);
    Ok(img)
}


macro_attr! {
    /// Error that may occur while picking a picture from the library.
    #[derive(Debug, EnumFromInner!)]
    pub enum PictureError {
        /// Picture file couldn't be found or read.
        Io(io::Error),
        /// Picture file couldn't be decoded.
        Decode(ImageError),
    }
}

impl Error for PictureError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            PictureError::Io(ref e) => Some(e),
            PictureError::Decode(ref e) => Some(e),
        }
    }
}

impl fmt::Display for PictureError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            PictureError::Io(ref e) => write!(fmt, "cannot read picture: {}", e),
            PictureError::Decode(ref e) => write!(fmt, "cannot decode picture: {}", e),
        }
    }
}
