//!
//! mememe  -- Caption a picture, share the meme
//!

             extern crate css_color_parser;
#[macro_use] extern crate enum_derive;
             extern crate futures;
             extern crate glob;
             extern crate image;
             extern crate itertools;
#[macro_use] extern crate lazy_static;
#[macro_use] extern crate log;
#[macro_use] extern crate macro_attr;
#[macro_use] extern crate maplit;
             extern crate mime;
#[macro_use] extern crate newtype_derive;
             extern crate regex;
             extern crate rusttype;
             extern crate serde;
#[macro_use] extern crate serde_derive;
             extern crate unicode_normalization;


#[cfg(test)] #[macro_use] extern crate serde_json;
#[cfg(test)]              extern crate serde_test;
#[cfg(test)] #[macro_use] extern crate spectral;


mod composer;
mod model;
mod platform;
mod render;
mod resources;


pub use composer::*;
pub use model::*;
pub use platform::*;
pub use render::*;
pub use resources::*;
