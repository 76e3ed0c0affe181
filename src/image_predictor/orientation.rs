use image::DynamicImage;

/// The eight rotation/mirror states a camera can report for its pixel data.
///
/// Variants follow the EXIF/TIFF orientation tag, which is how cameras hand
/// the orientation over. The pixels are stored rotated and the tag says how
/// to turn them upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageOrientation {
    #[default]
    Up,
    UpMirrored,
    Down,
    DownMirrored,
    LeftMirrored,
    Right,
    RightMirrored,
    Left,
}

impl ImageOrientation {
    pub const ALL: [ImageOrientation; 8] = [
        ImageOrientation::Up,
        ImageOrientation::UpMirrored,
        ImageOrientation::Down,
        ImageOrientation::DownMirrored,
        ImageOrientation::LeftMirrored,
        ImageOrientation::Right,
        ImageOrientation::RightMirrored,
        ImageOrientation::Left,
    ];

    /// Unknown tags resolve to `Up`.
    pub fn from_exif(tag: u16) -> Self {
        match tag {
            1 => ImageOrientation::Up,
            2 => ImageOrientation::UpMirrored,
            3 => ImageOrientation::Down,
            4 => ImageOrientation::DownMirrored,
            5 => ImageOrientation::LeftMirrored,
            6 => ImageOrientation::Right,
            7 => ImageOrientation::RightMirrored,
            8 => ImageOrientation::Left,
            _ => ImageOrientation::Up,
        }
    }

    pub fn exif_tag(self) -> u16 {
        match self {
            ImageOrientation::Up => 1,
            ImageOrientation::UpMirrored => 2,
            ImageOrientation::Down => 3,
            ImageOrientation::DownMirrored => 4,
            ImageOrientation::LeftMirrored => 5,
            ImageOrientation::Right => 6,
            ImageOrientation::RightMirrored => 7,
            ImageOrientation::Left => 8,
        }
    }

    /// Whether turning the pixels upright swaps width and height.
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            ImageOrientation::LeftMirrored
                | ImageOrientation::Right
                | ImageOrientation::RightMirrored
                | ImageOrientation::Left
        )
    }

    /// Returns the pixels turned upright.
    pub fn apply(self, image: &DynamicImage) -> DynamicImage {
        match self {
            ImageOrientation::Up => image.clone(),
            ImageOrientation::UpMirrored => image.fliph(),
            ImageOrientation::Down => image.rotate180(),
            ImageOrientation::DownMirrored => image.flipv(),
            ImageOrientation::LeftMirrored => image.rotate90().fliph(),
            ImageOrientation::Right => image.rotate90(),
            ImageOrientation::RightMirrored => image.rotate270().fliph(),
            ImageOrientation::Left => image.rotate270(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    #[test]
    fn test_from_exif_maps_all_eight_tags() {
        for orientation in ImageOrientation::ALL {
            assert_eq!(
                ImageOrientation::from_exif(orientation.exif_tag()),
                orientation
            );
        }
    }

    #[test]
    fn test_from_exif_defaults_to_up() {
        assert_eq!(ImageOrientation::from_exif(0), ImageOrientation::Up);
        assert_eq!(ImageOrientation::from_exif(9), ImageOrientation::Up);
        assert_eq!(ImageOrientation::from_exif(u16::MAX), ImageOrientation::Up);
    }

    #[test]
    fn test_apply_swaps_dimensions_for_quarter_turns() {
        let image = DynamicImage::ImageRgb8(ImageBuffer::new(4, 2));

        for orientation in ImageOrientation::ALL {
            let upright = orientation.apply(&image);
            if orientation.swaps_dimensions() {
                assert_eq!((upright.width(), upright.height()), (2, 4));
            } else {
                assert_eq!((upright.width(), upright.height()), (4, 2));
            }
        }
    }

    #[test]
    fn test_apply_left_mirrored_transposes() {
        // 2x1 image: red at (0,0), blue at (1,0)
        let mut buffer = ImageBuffer::new(2, 1);
        buffer.put_pixel(0, 0, Rgb([255u8, 0, 0]));
        buffer.put_pixel(1, 0, Rgb([0u8, 0, 255]));
        let image = DynamicImage::ImageRgb8(buffer);

        let upright = ImageOrientation::LeftMirrored.apply(&image).to_rgb8();

        assert_eq!(upright.dimensions(), (1, 2));
        assert_eq!(upright.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(upright.get_pixel(0, 1), &Rgb([0, 0, 255]));
    }
}
