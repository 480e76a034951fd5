//! Module defining which controls of the screen are enabled.

use model::CaptionField;
use platform::SourceKind;


/// Enablement of the interactive controls on the screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Controls {
    /// Button that takes a picture with the camera.
    pub camera: bool,
    /// Button that picks a picture from the photo library.
    pub album: bool,
    /// Button that shares the meme.
    pub share: bool,
    pub top_field: bool,
    pub bottom_field: bool,
}

impl Controls {
    /// Whether given caption field can be edited.
    #[inline]
    pub fn field(&self, field: CaptionField) -> bool {
        match field {
            CaptionField::Top => self.top_field,
            CaptionField::Bottom => self.bottom_field,
        }
    }

    /// Whether a picture can be requested from given source.
    #[inline]
    pub fn pick(&self, kind: SourceKind) -> bool {
        match kind {
            SourceKind::Camera => self.camera,
            SourceKind::Library => self.album,
        }
    }

    /// Whether the controls that depend on having a picture are enabled.
    #[inline]
    pub fn are_enabled(&self) -> bool {
        self.top_field && self.bottom_field
    }

    /// Enable or disable the controls that depend on having a picture.
    pub(super) fn set_enabled(&mut self, enabled: bool, share_button: bool) {
        self.top_field = enabled;
        self.bottom_field = enabled;
        self.share = enabled && share_button;
    }

    /// Enable or disable both picture picking buttons.
    pub(super) fn set_pickers(&mut self, enabled: bool, camera_available: bool) {
        self.album = enabled;
        self.camera = enabled && camera_available;
    }
}
