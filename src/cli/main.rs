//!
//! mememesh -- Memes in the shell
//!

             extern crate ansi_term;
             extern crate clap;
             extern crate conv;
#[macro_use] extern crate enum_derive;
             extern crate exitcode;
             extern crate image;
             extern crate isatty;
#[macro_use] extern crate lazy_static;
#[macro_use] extern crate macro_attr;
             extern crate mememe;
             extern crate serde_json;
#[macro_use] extern crate slog;
             extern crate slog_envlogger;
             extern crate slog_scope;
             extern crate slog_stdlog;
             extern crate time;

// `log` must be at the end of these declarations because we want to simultaneously:
// * use the standard `log` macros (which would be shadowed by `slog`)
// * be able to initialize the slog logger using slog macros like o!()
#[macro_use] extern crate log;

#[cfg(test)] #[macro_use] extern crate spectral;


mod args;
mod host;
mod logging;


use std::env;
use std::fs;
use std::io::{self, Write};
use std::process::exit;

use image::ImageFormat;
use mememe::{CaptionField, Composer, Phase, ShareOutcome, SourceKind};

use args::{ArgsError, Options};
use host::{ArgvSource, WriterSink};


lazy_static! {
    /// Application / package name, as filled out by Cargo.
    static ref NAME: &'static str = option_env!("CARGO_PKG_NAME").unwrap_or("mememesh");

    /// Application version, as filled out by Cargo.
    static ref VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");
}


fn main() {
    let opts = args::parse().unwrap_or_else(|e| {
        print_args_error(e).unwrap_or(());
        exit(exitcode::USAGE);
    });

    let _guard = logging::init(opts.verbosity).unwrap_or_else(|e| {
        writeln!(&mut io::stderr(), "Failed to initialize logging: {}", e).unwrap_or(());
        exit(exitcode::SOFTWARE);
    });
    if cfg!(debug_assertions) {
        warn!("Debug mode! The program will likely be much slower.");
    }
    for (i, arg) in env::args().enumerate() {
        debug!("argv[{}] = {:?}", i, arg);
    }
    trace!("Options parsed from argv:\n{:#?}", opts);

    let format = if opts.jpeg { ImageFormat::Jpeg } else { ImageFormat::Png };
    let sink = match opts.output_path.as_ref() {
        Some(path) => {
            trace!("Opening --output file {}...", path.display());
            let file = fs::OpenOptions::new()
                .create(true).write(true).truncate(true)
                .open(path).unwrap_or_else(|e| {
                    error!("Failed to open output file {} for writing: {}", path.display(), e);
                    exit(exitcode::CANTCREAT);
                });
            debug!("File {} opened successfully", path.display());
            WriterSink::new(file, format)
        }
        None => {
            trace!("No --output given, using standard output");
            if isatty::stdout_isatty() {
                warn!("Standard output is a terminal.");
            }
            WriterSink::new(io::stdout(), format)
        }
    };

    exit(compose(opts, sink));
}

/// Print an error that may occur while parsing arguments.
fn print_args_error(e: ArgsError) -> io::Result<()> {
    match e {
        ArgsError::Parse(ref e) =>
            // In case of generic parse error,
            // message provided by the clap library will be the usage string.
            writeln!(&mut io::stderr(), "{}", e.message),
        e => {
            writeln!(&mut io::stderr(), "Failed to parse arguments: {}", e)
        },
    }
}


/// Go through the meme screen like a user would, sharing the result to `sink`.
/// Returns the exit code.
fn compose(opts: Options, sink: WriterSink) -> i32 {
    let mut builder = Composer::builder()
        .image_source(ArgvSource::new(&opts.library, opts.picture.as_str()))
        .share_sink(sink)
        .config(opts.config);
    if let Some(ref directory) = opts.font_directory {
        builder = builder.font_directory(directory);
    }
    if let Some(ref font) = opts.font {
        builder = builder.font_name(font.as_str());
    }
    let mut composer = match builder.build() {
        Ok(c) => c,
        Err(e) => {
            error!("Cannot set up the meme screen: {}", e);
            return exitcode::CONFIG;
        }
    };

    composer.initialize(opts.screen);

    let kind = if opts.camera { SourceKind::Camera } else { SourceKind::Library };
    if !composer.request_image(kind) {
        error!("Cannot take a picture from {}", kind);
        return exitcode::UNAVAILABLE;
    }
    if composer.phase() == Phase::Empty {
        // The picker has already said why, if it knew.
        if composer.source().error().is_none() {
            error!("No picture has been picked");
        }
        return exitcode::NOINPUT;
    }
    debug!("Picture `{}` is on the screen", opts.picture);

    let captions = [(CaptionField::Top, opts.top_text.as_ref()),
                    (CaptionField::Bottom, opts.bottom_text.as_ref())];
    for &(field, text) in &captions {
        if let Some(text) = text {
            composer.begin_editing(field);
            composer.insert_text(field, text);
            composer.end_editing(field);
        }
    }

    if let Err(e) = composer.share() {
        error!("Cannot share the meme: {}", e);
        return exitcode::SOFTWARE;
    }
    match composer.sink().outcome() {
        Some(&ShareOutcome::Completed) => {
            info!("Meme with captions {:?} / {:?} done",
                composer.text(CaptionField::Top), composer.text(CaptionField::Bottom));
            exitcode::OK
        }
        _ => exitcode::UNAVAILABLE,
    }
}
