use thiserror::Error;

/// Preview image generation error type.
///
/// Distinguishes "could not load the source image" (fetch/decode) from
/// "could not produce the output" (encode); the worker treats all of them as
/// a contained preview failure.
#[derive(Error, Debug)]
pub enum OgImageError {
    /// The source image could not be downloaded.
    #[error("failed to fetch source image: {0}")]
    Fetch(reqwest::Error),
    /// The source image bytes could not be decoded.
    #[error("failed to decode source image: {0}")]
    Decode(image::ImageError),
    /// The composed preview could not be encoded to PNG.
    #[error("failed to encode preview image: {0}")]
    Encode(image::ImageError),
}
