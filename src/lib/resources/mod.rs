//! Module handling the resources a meme is made of: fonts and pictures.

mod filesystem;
mod fonts;
mod pictures;


pub use self::filesystem::{BytesLoader, FileLoader, PathLoader};
pub use self::fonts::{DEFAULT_FONT_NAME, FILE_EXTENSION as FONT_FILE_EXTENSION,
                      Font, FontError, FontLoader};
pub use self::pictures::{IMAGE_FORMAT_EXTENSIONS, PhotoLibrary, PictureError};


/// Loader of resources from some external source.
pub trait Loader {
    /// Type of resources that this loader can load.
    type Item;
    /// Error that may occur while loading the resource.
    type Err;

    /// Load a resource of given name.
    fn load<'n>(&self, name: &'n str) -> Result<Self::Item, Self::Err>;
}
