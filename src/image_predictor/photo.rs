use image::{DynamicImage, ImageDecoder, ImageReader};
use std::io::Cursor;
use std::sync::Arc;

/// A captured photo: decoded pixels plus the orientation tag the camera
/// reported for them.
#[derive(Debug, Clone)]
pub struct Photo {
    image: Arc<DynamicImage>,
    orientation_tag: u16,
}

impl Photo {
    pub fn new(image: DynamicImage, orientation_tag: u16) -> Self {
        Self {
            image: Arc::new(image),
            orientation_tag,
        }
    }

    /// Decodes an encoded image file. The orientation comes from the file's
    /// EXIF data and is `1` (up) when it carries none.
    pub fn decode(bytes: &[u8]) -> Result<Self, image::ImageError> {
        let mut decoder = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()?
            .into_decoder()?;
        let orientation_tag = u16::from(decoder.orientation()?.to_exif());
        let image = DynamicImage::from_decoder(decoder)?;
        Ok(Self::new(image, orientation_tag))
    }

    pub fn image(&self) -> &Arc<DynamicImage> {
        &self.image
    }

    pub fn orientation_tag(&self) -> u16 {
        self.orientation_tag
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }
}

impl PartialEq for Photo {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.image, &other.image) && self.orientation_tag == other.orientation_tag
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use image::codecs::jpeg::JpegEncoder;
    use image::{ImageBuffer, Rgb};

    /// A baseline JPEG with an APP1 segment holding only the orientation tag.
    pub fn jpeg_with_orientation(width: u32, height: u32, orientation_tag: u16) -> Vec<u8> {
        let image = ImageBuffer::from_pixel(width, height, Rgb([120u8, 60, 30]));
        let mut jpeg = Vec::new();
        JpegEncoder::new(&mut jpeg).encode_image(&image).unwrap();

        let [tag_hi, tag_lo] = orientation_tag.to_be_bytes();
        let mut exif = b"Exif\0\0".to_vec();
        // Big endian TIFF header, first IFD at offset 8
        exif.extend_from_slice(&[b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08]);
        // One entry: 0x0112 orientation, SHORT, count 1
        exif.extend_from_slice(&[0x00, 0x01, 0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01]);
        exif.extend_from_slice(&[tag_hi, tag_lo, 0x00, 0x00]);
        // No next IFD
        exif.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

        let segment_length = u16::try_from(exif.len() + 2).unwrap().to_be_bytes();
        let mut app1 = vec![0xFF, 0xE1, segment_length[0], segment_length[1]];
        app1.extend_from_slice(&exif);

        // Right after the SOI marker
        jpeg.splice(2..2, app1);
        jpeg
    }

    #[test]
    fn test_decode_reads_exif_orientation() {
        let photo = Photo::decode(&jpeg_with_orientation(8, 4, 6)).unwrap();

        assert_eq!(photo.orientation_tag(), 6);
        assert_eq!(photo.dimensions(), (8, 4));
    }

    #[test]
    fn test_decode_without_exif_is_up() {
        let image = ImageBuffer::from_pixel(3, 2, Rgb([1u8, 2, 3]));
        let mut png = Vec::new();
        DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let photo = Photo::decode(&png).unwrap();

        assert_eq!(photo.orientation_tag(), 1);
        assert_eq!(photo.dimensions(), (3, 2));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(Photo::decode(b"not an image").is_err());
    }
}
