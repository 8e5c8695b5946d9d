//! 图片后处理：缩放到平台尺寸并统一编码为 JPEG；占位图生成

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage};

use crate::core::ProviderError;
use crate::platform::PlatformSpec;

pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// JPEG 单边上限
const MAX_DIMENSION: u32 = 65_535;

const BACKGROUND: Rgb<u8> = Rgb([0xf0, 0xf0, 0xf0]);
const BAND: Rgb<u8> = Rgb([0xc8, 0xc8, 0xc8]);
const BORDER: Rgb<u8> = Rgb([0xd8, 0xd8, 0xd8]);

/// 1x1 浅灰 PPM，仅在 JPEG 编码本身失败时使用
const FALLBACK_PAYLOAD: &[u8] = b"P6\n1 1\n255\n\xf0\xf0\xf0";

fn target_dimensions(spec: &PlatformSpec) -> (u32, u32) {
    (
        spec.width.clamp(1, MAX_DIMENSION),
        spec.height.clamp(1, MAX_DIMENSION),
    )
}

fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, ProviderError> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    image
        .write_with_encoder(encoder)
        .map_err(|e| ProviderError::Image(e.to_string()))?;
    Ok(buf)
}

/// 解码原始图片，Lanczos3 缩放到平台尺寸，转 RGB 后编码 JPEG
pub fn process_image(raw: &[u8], spec: &PlatformSpec, quality: u8) -> Result<Vec<u8>, ProviderError> {
    let decoded =
        image::load_from_memory(raw).map_err(|e| ProviderError::Image(e.to_string()))?;
    let (width, height) = target_dimensions(spec);
    let resized = decoded.resize_exact(width, height, FilterType::Lanczos3);
    encode_jpeg(&DynamicImage::ImageRgb8(resized.to_rgb8()), quality)
}

/// 确定性的占位图：浅灰底、居中深色条带、细边框
pub fn placeholder_image(spec: &PlatformSpec) -> Vec<u8> {
    let (width, height) = target_dimensions(spec);
    let border = (width.min(height) / 100).max(1);
    let band = (width / 5, height * 2 / 5, width * 4 / 5, height * 3 / 5);

    let canvas = RgbImage::from_fn(width, height, |x, y| {
        if x < border || y < border || x >= width - border || y >= height - border {
            BORDER
        } else if x >= band.0 && x < band.2 && y >= band.1 && y < band.3 {
            BAND
        } else {
            BACKGROUND
        }
    });

    match encode_jpeg(&DynamicImage::ImageRgb8(canvas), DEFAULT_JPEG_QUALITY) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, "placeholder encoding failed");
            FALLBACK_PAYLOAD.to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            width,
            height,
            image::Rgba([10, 20, 30, 255]),
        ));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_process_resizes_to_platform() {
        let spec = PlatformSpec::new(120, 68);
        let jpeg = process_image(&png(40, 40), &spec, 90).unwrap();
        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (120, 68));
    }

    #[test]
    fn test_process_rejects_garbage() {
        let err = process_image(b"not an image", &PlatformSpec::default(), 90).unwrap_err();
        assert!(matches!(err, ProviderError::Image(_)));
    }

    #[test]
    fn test_placeholder_is_deterministic() {
        let spec = PlatformSpec::new(100, 50);
        let a = placeholder_image(&spec);
        let b = placeholder_image(&spec);
        assert_eq!(a, b);
        let decoded = image::load_from_memory(&a).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (100, 50));
    }

    #[test]
    fn test_zero_dimensions_clamped() {
        let spec = PlatformSpec::new(0, 0);
        let decoded = image::load_from_memory(&placeholder_image(&spec)).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (1, 1));
    }
}
