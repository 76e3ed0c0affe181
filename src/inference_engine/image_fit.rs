use crate::inference_engine::interface::CropAndScale;
use image::{imageops, DynamicImage};

/// Fits an upright image to the model input size.
pub fn fit_image(
    image: &DynamicImage,
    crop_and_scale: CropAndScale,
    width: u32,
    height: u32,
) -> DynamicImage {
    match crop_and_scale {
        CropAndScale::CenterCrop => center_crop(image, width, height),
        CropAndScale::ScaleFit => letterbox(image, width, height),
        CropAndScale::ScaleFill => {
            image.resize_exact(width, height, imageops::FilterType::Triangle)
        }
    }
}

/// Crops the largest centered region with the target aspect ratio, then
/// scales it to the target size.
pub fn center_crop(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    let (w, h) = (image.width() as u64, image.height() as u64);
    let (tw, th) = (width.max(1) as u64, height.max(1) as u64);

    let crop_w = w.min(h * tw / th).max(1);
    let crop_h = h.min(w * th / tw).max(1);
    let x = (w - crop_w) / 2;
    let y = (h - crop_h) / 2;

    image
        .crop_imm(x as u32, y as u32, crop_w as u32, crop_h as u32)
        .resize_exact(width, height, imageops::FilterType::Triangle)
}

/// Scales the image to fit inside the target size and pads the rest black.
pub fn letterbox(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    let same_aspect = u64::from(image.width()) * u64::from(height)
        == u64::from(image.height()) * u64::from(width);
    if same_aspect {
        return image.resize_exact(width, height, imageops::FilterType::Triangle);
    }

    let (w, h) = (image.width() as f32, image.height() as f32);
    let scale = (width as f32 / w).min(height as f32 / h);
    let new_w = ((w * scale) as u32).clamp(1, width);
    let new_h = ((h * scale) as u32).clamp(1, height);

    let scaled = image
        .resize_exact(new_w, new_h, imageops::FilterType::Triangle)
        .to_rgb8();

    let mut padded = image::RgbImage::new(width, height);
    let x_offset = (width - new_w) / 2;
    let y_offset = (height - new_h) / 2;
    imageops::replace(&mut padded, &scaled, x_offset as i64, y_offset as i64);

    DynamicImage::from(padded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        let mut img = ImageBuffer::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = Rgb(color);
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_fit_image_output_size() {
        let image = solid(200, 100, [255, 0, 0]);

        for option in [
            CropAndScale::CenterCrop,
            CropAndScale::ScaleFit,
            CropAndScale::ScaleFill,
        ] {
            let fitted = fit_image(&image, option, 224, 224);
            assert_eq!((fitted.width(), fitted.height()), (224, 224));
        }
    }

    #[test]
    fn test_center_crop_keeps_middle() {
        // 300x100: left third red, middle third green, right third blue
        let mut img = ImageBuffer::new(300, 100);
        for (x, _, pixel) in img.enumerate_pixels_mut() {
            *pixel = match x {
                0..=99 => Rgb([255u8, 0, 0]),
                100..=199 => Rgb([0, 255, 0]),
                _ => Rgb([0, 0, 255]),
            };
        }
        let image = DynamicImage::ImageRgb8(img);

        let cropped = center_crop(&image, 10, 10).to_rgb8();
        let Rgb([r, g, b]) = *cropped.get_pixel(5, 5);

        assert!(r < 5 && g > 250 && b < 5);
    }

    #[test]
    fn test_letterbox_pads_and_centers() {
        let image = solid(200, 100, [255, 0, 0]);

        let boxed = letterbox(&image, 640, 640).to_rgb8();
        let Rgb([r, g, b]) = *boxed.get_pixel(320, 320);

        assert!(r > 250 && g < 5 && b < 5);
        assert_eq!(boxed.get_pixel(320, 0), &Rgb([0, 0, 0]));
    }
}
