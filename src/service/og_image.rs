//! Open Graph preview image generation.
//!
//! Composes the 1200×630 social-sharing preview for an episode: the cover
//! art cover-fitted and blurred as a full-canvas background, with a sharp
//! 400×400 copy centered on top. The composition is deterministic and every
//! intermediate buffer is owned by one invocation, so a long-lived worker
//! can regenerate previews indefinitely.

use std::io::Cursor;

use image::{imageops, imageops::FilterType, DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::error::og_image::OgImageError;

pub const OG_WIDTH: u32 = 1200;
pub const OG_HEIGHT: u32 = 630;
pub const CENTER_IMAGE_SIZE: u32 = 400;

const BLUR_SIGMA: f32 = 40.0;
const BACKGROUND_GRAY: Rgba<u8> = Rgba([0x33, 0x33, 0x33, 0xff]);

/// Decode a downloaded cover image.
pub fn decode_source(bytes: &[u8]) -> Result<DynamicImage, OgImageError> {
    image::load_from_memory(bytes).map_err(OgImageError::Decode)
}

/// Compose the preview PNG from a decoded cover image.
pub fn compose_og_image(source: &DynamicImage) -> Result<Vec<u8>, OgImageError> {
    let mut canvas = RgbaImage::from_pixel(OG_WIDTH, OG_HEIGHT, BACKGROUND_GRAY);

    let background = source
        .resize_to_fill(OG_WIDTH, OG_HEIGHT, FilterType::Triangle)
        .fast_blur(BLUR_SIGMA)
        .into_rgba8();
    imageops::overlay(&mut canvas, &background, 0, 0);
    drop(background);

    let center = source
        .resize_to_fill(CENTER_IMAGE_SIZE, CENTER_IMAGE_SIZE, FilterType::Lanczos3)
        .into_rgba8();
    let x = (OG_WIDTH - CENTER_IMAGE_SIZE) / 2;
    let y = (OG_HEIGHT - CENTER_IMAGE_SIZE) / 2;
    imageops::overlay(&mut canvas, &center, x as i64, y as i64);
    drop(center);

    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(canvas)
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(OgImageError::Encode)?;

    Ok(buffer.into_inner())
}

/// Download an episode's cover art and compose its preview image.
///
/// An unreachable or undecodable source is a load failure distinct from the
/// composition itself; the worker contains either without failing the job.
pub async fn generate_og_image(
    http: &reqwest::Client,
    cover_image_url: &str,
) -> Result<Vec<u8>, OgImageError> {
    let response = http
        .get(cover_image_url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(OgImageError::Fetch)?;

    let bytes = response.bytes().await.map_err(OgImageError::Fetch)?;
    let source = decode_source(&bytes)?;

    compose_og_image(&source)
}
