use image::DynamicImage;
use tract_onnx::prelude::*;

/// NCHW tensor with channels scaled to `[0, 1]`.
pub fn image_to_tensor(image: &DynamicImage) -> TractResult<Tensor> {
    let rgb = image.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    let tensor = tract_ndarray::Array4::from_shape_fn((1, 3, height, width), |(_, c, y, x)| {
        rgb.get_pixel(x as u32, y as u32)[c] as f32 / 255.0
    });

    Ok(tensor.into_tensor())
}

pub fn softmax(values: &[f32]) -> Vec<f32> {
    if values.is_empty() {
        return Vec::new();
    }
    let max_val = values.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = values.iter().map(|v| (v - max_val).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum <= 0.0 {
        return vec![0.0; values.len()];
    }
    exps.iter().map(|e| e / sum).collect()
}
