//! Module defining device orientation and the content fit policy.

#![allow(missing_docs)]  // Because IterVariants! produces undocumented methods.


macro_attr! {
    /// Physical orientation of the device, as reported by its sensors.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, IterVariants!(DeviceOrientations))]
    pub enum DeviceOrientation {
        /// Orientation cannot be determined.
        Unknown,
        /// Upright, home button at the bottom.
        Portrait,
        /// Upside down, home button at the top.
        PortraitUpsideDown,
        /// On its side, home button on the right.
        LandscapeLeft,
        /// On its side, home button on the left.
        LandscapeRight,
        /// Lying flat, screen up.
        FaceUp,
        /// Lying flat, screen down.
        FaceDown,
    }
}

impl DeviceOrientation {
    /// Whether the device is held in one of the portrait orientations.
    ///
    /// Flat and unknown orientations are *not* portrait.
    #[inline]
    pub fn is_portrait(&self) -> bool {
        match *self {
            DeviceOrientation::Portrait | DeviceOrientation::PortraitUpsideDown => true,
            _ => false,
        }
    }
}


/// How the picked image is scaled into the image view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentFit {
    /// Scale to fit entirely within the view, letterboxing the rest.
    Fit,
    /// Scale to cover the entire view, cropping whatever sticks out.
    Fill,
}

impl ContentFit {
    /// Choose the content fit for given device & picture orientations.
    ///
    /// Only a portrait picture on a portrait device is cropped to fill the screen.
    /// Whenever the two orientations disagree, or the device isn't upright,
    /// the picture is letterboxed so it's never overly cropped.
    pub fn for_orientations(device_portrait: bool, image_landscape: bool) -> Self {
        if device_portrait {
            if image_landscape { ContentFit::Fit } else { ContentFit::Fill }
        } else {
            ContentFit::Fit
        }
    }
}

impl Default for ContentFit {
    fn default() -> Self {
        ContentFit::Fit
    }
}
