//! Module which flattens the meme screen into images.

mod output;
mod screen;
pub mod text;


pub use self::output::MemeOutput;
pub use self::screen::{Chrome, ChromeHidden, FIELD_MARGIN, ImageView, Screen,
                       TextField, TOOLBAR_HEIGHT};
