//! Defines the encoded form of a rendered meme.

use std::io::Cursor;
use std::ops::Deref;

use image::{DynamicImage, ImageError, ImageFormat, ImageOutputFormat, RgbaImage};
use mime::{self, Mime};


/// Rendered meme encoded in some image format.
#[derive(Clone, Debug)]
#[must_use = "unused meme output which must be used"]
pub struct MemeOutput {
    format: ImageFormat,
    bytes: Vec<u8>,
}

impl MemeOutput {
    /// Encode the bitmap as PNG.
    pub fn png(img: &RgbaImage) -> Result<Self, ImageError> {
        trace!("Writing PNG image");
        let mut bytes = vec![];
        DynamicImage::ImageRgba8(img.clone())
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
        Ok(MemeOutput{format: ImageFormat::Png, bytes})
    }

    /// Encode the bitmap as JPEG of given quality (in %).
    ///
    /// JPEG has no alpha channel, so the bitmap is flattened to RGB first.
    pub fn jpeg(img: &RgbaImage, quality: u8) -> Result<Self, ImageError> {
        trace!("Writing JPEG with quality {}", quality);
        let rgb = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
        let mut bytes = vec![];
        DynamicImage::ImageRgb8(rgb)
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Jpeg(quality))?;
        Ok(MemeOutput{format: ImageFormat::Jpeg, bytes})
    }
}

impl MemeOutput {
    /// Image format of the output.
    #[inline]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Raw bytes of the output.
    ///
    /// See `MemeOutput::format` for how to interpret it.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    /// Convert the output into a vector of bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The MIME type that matches output's format.
    pub fn mime_type(&self) -> Option<Mime> {
        match self.format {
            ImageFormat::Jpeg => Some(mime::IMAGE_JPEG),
            ImageFormat::Png => Some(mime::IMAGE_PNG),
            _ => None,
        }
    }
}

impl Deref for MemeOutput {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.bytes()
    }
}

impl From<MemeOutput> for Vec<u8> {
    fn from(output: MemeOutput) -> Vec<u8> {
        output.into_bytes()
    }
}


#[cfg(test)]
mod tests {
    use image::{self, GenericImageView, ImageFormat, Rgba, RgbaImage};
    use super::MemeOutput;

    fn bitmap() -> RgbaImage {
        RgbaImage::from_pixel(8, 6, Rgba([0xff, 0x0, 0x0, 0xff]))
    }

    #[test]
    fn png() {
        let output = MemeOutput::png(&bitmap()).unwrap();
        assert_eq!(ImageFormat::Png, output.format());
        assert_eq!(Some(::mime::IMAGE_PNG), output.mime_type());

        let decoded = image::load_from_memory(output.bytes()).unwrap();
        assert_eq!((8, 6), decoded.dimensions());
        assert_eq!(Rgba([0xff, 0x0, 0x0, 0xff]), decoded.to_rgba8().get_pixel(3, 3).clone());
    }

    #[test]
    fn jpeg() {
        let output = MemeOutput::jpeg(&bitmap(), 90).unwrap();
        assert_eq!(ImageFormat::Jpeg, output.format());
        assert_eq!(Some(::mime::IMAGE_JPEG), output.mime_type());
        assert_eq!(&[0xff, 0xd8], &output[..2]);
    }
}
