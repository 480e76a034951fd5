//! Module defining the model types.

mod align;
mod caption;
mod color;
mod geometry;
mod meme;
mod orientation;

pub use self::align::{HAlign, VAlign};
pub use self::caption::{CaptionField, CaptionStyle};
pub use self::color::Color;
pub use self::geometry::Size;
pub use self::meme::Meme;
pub use self::orientation::{ContentFit, DeviceOrientation};
