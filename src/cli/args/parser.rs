//! Module defining the command line argument parser.

use std::fs;
use std::path::PathBuf;

use conv::TryFrom;
use clap::{self, AppSettings, Arg, ArgMatches};
use mememe::{Config, Size};
use serde_json;

use super::{NAME, VERSION};
use super::model::{ArgsError, Options};


impl<'a> TryFrom<ArgMatches<'a>> for Options {
    type Err = ArgsError;

    fn try_from(matches: ArgMatches<'a>) -> Result<Self, Self::Err> {
        let verbose_count = matches.occurrences_of(OPT_VERBOSE) as isize;
        let quiet_count = matches.occurrences_of(OPT_QUIET) as isize;
        let verbosity = verbose_count - quiet_count;

        let picture = matches.value_of(ARG_PICTURE).unwrap_or("").trim().to_owned();
        let library = PathBuf::from(matches.value_of(OPT_LIBRARY).unwrap_or(DEFAULT_LIBRARY));
        let camera = matches.is_present(OPT_CAMERA);

        let top_text = matches.value_of(OPT_TOP).map(String::from);
        let bottom_text = matches.value_of(OPT_BOTTOM).map(String::from);

        let screen = parse_screen(matches.value_of(OPT_SCREEN).unwrap_or(DEFAULT_SCREEN))?;
        let font = matches.value_of(OPT_FONT).map(String::from);
        let font_directory = matches.value_of(OPT_FONT_DIR).map(PathBuf::from);

        let mut config: Config = match matches.value_of(OPT_CONFIG) {
            Some(path) => {
                let json = fs::read(path)?;
                serde_json::from_slice(&json)?
            }
            None => Config::default(),
        };
        // Sharing is the only way to get the meme out of the shell.
        if !config.share_button {
            warn!("Ignoring `share_button: false` from --config, memes are always written out");
            config.share_button = true;
        }
        let jpeg = matches.is_present(OPT_JPEG);

        // Output path can be set explicit to stdout via `-`.
        let output_path = matches.value_of(OPT_OUTPUT)
            .map(|p| p.trim())
            .and_then(|p| if p == "-" { None } else { Some(p) })
            .map(|p| PathBuf::from(p));

        Ok(Options{verbosity,
                   picture, library, camera,
                   top_text, bottom_text,
                   screen, font, font_directory,
                   config, jpeg, output_path})
    }
}

/// Parse the screen size given as WIDTHxHEIGHT.
fn parse_screen(s: &str) -> Result<Size, ArgsError> {
    let invalid = || ArgsError::Screen(s.to_owned());

    let mut parts = s.trim().splitn(2, |c| c == 'x' || c == 'X');
    let width: u32 = parts.next().and_then(|w| w.parse().ok()).ok_or_else(invalid)?;
    let height: u32 = parts.next().and_then(|h| h.parse().ok()).ok_or_else(invalid)?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    if width as u64 * height as u64 > MAX_SCREEN_PIXELS {
        return Err(invalid());
    }
    Ok(Size::new(width, height))
}


// Parser definition

/// Type of the argument parser object
/// (which is called an "App" in clap's silly nomenclature).
pub type Parser<'p> = clap::App<'p, 'p>;


lazy_static! {
    static ref ABOUT: &'static str = option_env!("CARGO_PKG_DESCRIPTION").unwrap_or("");
}

const ARG_PICTURE: &'static str = "picture";
const OPT_LIBRARY: &'static str = "library";
const OPT_CAMERA: &'static str = "camera";
const OPT_TOP: &'static str = "top";
const OPT_BOTTOM: &'static str = "bottom";
const OPT_SCREEN: &'static str = "screen";
const OPT_FONT: &'static str = "font";
const OPT_FONT_DIR: &'static str = "font-dir";
const OPT_CONFIG: &'static str = "config";
const OPT_JPEG: &'static str = "jpeg";
const OPT_OUTPUT: &'static str = "output";
const OPT_VERBOSE: &'static str = "verbose";
const OPT_QUIET: &'static str = "quiet";

const DEFAULT_LIBRARY: &'static str = ".";
const DEFAULT_SCREEN: &'static str = "375x667";
/// Largest screen area (in pixels) that a meme can be rendered on.
const MAX_SCREEN_PIXELS: u64 = 8192 * 8192;


/// Create the parser for application's command line.
pub fn create_parser<'p>() -> Parser<'p> {
    let mut parser = Parser::new(*NAME);
    if let Some(version) = *VERSION {
        parser = parser.version(version);
    }
    parser
        .about(*ABOUT)

        .setting(AppSettings::StrictUtf8)

        .setting(AppSettings::UnifiedHelpMessage)
        .setting(AppSettings::DontCollapseArgsInUsage)
        .setting(AppSettings::DeriveDisplayOrder)

        // Picture to make the meme from.
        .arg(Arg::with_name(ARG_PICTURE)
            .value_name("PICTURE")
            .required(true)
            .help("Picture to caption")
            .long_help(concat!(
                "Picture to make the meme from.\n\n",
                "It's either a path to an image file, or a name of a picture ",
                "(file name without extension) in the --library directory.")))
        .arg(Arg::with_name(OPT_LIBRARY)
            .long("library").short("l")
            .value_name("DIR")
            .required(false)
            .help("Photo library directory")
            .long_help("Directory where pictures given by name are looked up."))
        .arg(Arg::with_name(OPT_CAMERA)
            .long("camera")
            .help("Take the picture with a camera")
            .long_help(concat!(
                "Ask for a new photo instead of picking one from the library.\n\n",
                "There is no camera in the shell, so this always fails.")))

        // Captions.
        .arg(Arg::with_name(OPT_TOP)
            .long("top").short("t")
            .value_name("TEXT")
            .required(false)
            .help("Top caption")
            .long_help("Text of the top caption. If omitted, the placeholder is kept."))
        .arg(Arg::with_name(OPT_BOTTOM)
            .long("bottom").short("b")
            .value_name("TEXT")
            .required(false)
            .help("Bottom caption")
            .long_help("Text of the bottom caption. If omitted, the placeholder is kept."))

        // Rendering.
        .arg(Arg::with_name(OPT_SCREEN)
            .long("screen").short("s")
            .value_name("WxH")
            .required(false)
            .help("Screen size")
            .long_help(concat!(
                "Size of the screen the meme is composed on, as WIDTHxHEIGHT.\n\n",
                "The rendered meme has exactly these dimensions. ",
                "Default is 375x667, a portrait phone screen; ",
                "at most 8192x8192 pixels in total are allowed.")))
        .arg(Arg::with_name(OPT_FONT)
            .long("font").short("f")
            .value_name("NAME")
            .required(false)
            .help("Caption font")
            .long_help(concat!(
                "Name of the TrueType font to render captions with ",
                "(file name without the .ttf extension).\n\n",
                "By default, a condensed bold font built into the program is used.")))
        .arg(Arg::with_name(OPT_FONT_DIR)
            .long("font-dir")
            .value_name("DIR")
            .required(false)
            .help("Font directory")
            .long_help("Directory where the --font is looked up."))
        .arg(Arg::with_name(OPT_CONFIG)
            .long("config").short("c")
            .value_name("FILE")
            .required(false)
            .help("Config file")
            .long_help(concat!(
                "JSON file with composer configuration, e.g.:\n",
                r#"{"text_size": 48, "text_color": "yellow", "halign": "left", "jpeg_quality": 90}"#,
                "\n\nThe `share_button` setting is ignored, ",
                "since writing the meme out is how it's shared.")))

        // Output flags.
        .arg(Arg::with_name(OPT_JPEG)
            .long("jpeg")
            .help("Write JPEG instead of PNG"))
        .arg(Arg::with_name(OPT_OUTPUT)
            .long("output").short("o")
            .value_name("FILE")
            .required(false)
            .help("File to write the meme to")
            .long_help(concat!(
                "What file should the finished meme be written to.\n\n",
                "By default, or when this flag is set to `-` (single dash), the image is written ",
                "to standard output so it can be e.g. piped to the ImageMagick `display` program.")))

        // Verbosity flags.
        .arg(Arg::with_name(OPT_VERBOSE)
            .long("verbose").short("v")
            .multiple(true)
            .conflicts_with(OPT_QUIET)
            .help("Increase logging verbosity"))
        .arg(Arg::with_name(OPT_QUIET)
            .long("quiet").short("q")
            .multiple(true)
            .conflicts_with(OPT_VERBOSE)
            .help("Decrease logging verbosity"))

        .help_short("H")
        .version_short("V")
}
