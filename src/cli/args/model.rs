//! Data structures for command-line arguments.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use clap;
use mememe::{Config, Size};
use serde_json;


/// Structure to hold options received from the command line.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// Verbosity of the logging output.
    ///
    /// Corresponds to the number of times the -v flag has been passed.
    /// If -q has been used instead, this will be negative.
    pub verbosity: isize,

    /// Picture to make the meme from: its name in the library, or a file path.
    pub picture: String,
    /// Directory of the photo library.
    pub library: PathBuf,
    /// Whether to ask the camera rather than the library for the picture.
    pub camera: bool,

    pub top_text: Option<String>,
    pub bottom_text: Option<String>,

    /// Size of the simulated screen.
    pub screen: Size,
    /// Name of the caption font, if not the built-in one.
    pub font: Option<String>,
    /// Directory to load the caption font from.
    pub font_directory: Option<PathBuf>,

    /// Composer configuration, possibly read from a file.
    pub config: Config,
    /// Whether to share the meme as JPEG rather than PNG.
    pub jpeg: bool,
    /// Path to write the finished meme to.
    ///
    /// If absent, it shall be written to standard output.
    pub output_path: Option<PathBuf>,
}

#[allow(dead_code)]
impl Options {
    #[inline]
    pub fn verbose(&self) -> bool { self.verbosity > 0 }
    #[inline]
    pub fn quiet(&self) -> bool { self.verbosity < 0 }
}


macro_attr! {
    /// Error that can occur while parsing of command line arguments.
    #[derive(Debug, EnumFromInner!)]
    pub enum ArgsError {
        /// General when parsing the arguments.
        Parse(clap::Error),
        /// Invalid screen size.
        Screen(String),
        /// Config file couldn't be read.
        ConfigFile(io::Error),
        /// Config file JSON error.
        ConfigJson(serde_json::Error),
    }
}

impl Error for ArgsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            ArgsError::Parse(ref e) => Some(e),
            ArgsError::Screen(_) => None,
            ArgsError::ConfigFile(ref e) => Some(e),
            ArgsError::ConfigJson(ref e) => Some(e),
        }
    }
}

impl fmt::Display for ArgsError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ArgsError::Parse(ref e) => write!(fmt, "invalid arguments: {}", e),
            ArgsError::Screen(ref s) => {
                write!(fmt, "invalid screen size `{}` (expected WIDTHxHEIGHT)", s)
            }
            ArgsError::ConfigFile(ref e) => write!(fmt, "cannot read config file: {}", e),
            ArgsError::ConfigJson(ref e) => write!(fmt, "config file JSON error: {}", e),
        }
    }
}
