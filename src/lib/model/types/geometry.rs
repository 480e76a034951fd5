//! Module defining the two-dimensional `Size` type.

use std::fmt;


/// Width and height of a screen or picture, in pixels.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Size{width, height}
    }

    /// Whether it's taller than it is wide.
    #[inline]
    pub fn is_portrait(&self) -> bool {
        self.width < self.height
    }

    /// Whether it's wider than it is tall.
    /// Note that a square is neither portrait nor landscape.
    #[inline]
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Size::new(width, height)
    }
}

impl fmt::Debug for Size {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}x{}", self.width, self.height)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, fmt)
    }
}
