//! Module defining the caption alignment enums.

#![allow(missing_docs)]  // Because IterVariants! produces undocumented methods.


macro_attr! {
    /// Horizontal alignment of caption lines within their field.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash,
             Deserialize, IterVariants!(HAligns))]
    #[serde(rename_all = "lowercase")]
    pub enum HAlign {
        /// Left alignment.
        Left,
        /// Horizontal centering.
        Center,
        /// Right alignment.
        Right,
    }
}

macro_attr! {
    /// Vertical anchoring of text within a rectangle.
    ///
    /// Captions always hug either the top or the bottom edge of the screen.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum VAlign {
        /// Lines flow down from the top edge.
        Top,
        /// Lines stack up from the bottom edge.
        Bottom,
    }
}
