//! Image normalisation
//!
//! Uploaded pictures are decoded, resized to a fixed square and re-encoded
//! as PNG so stored avatars have one shape and one format.

use std::io::Cursor;

use image::ImageFormat;
use image::imageops::FilterType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Unable to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Unable to encode image: {0}")]
    Encode(#[source] image::ImageError),
}

/// File extensions accepted for uploads (lower-case, without dot)
pub const ACCEPTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Whether a client-supplied file name carries an accepted extension
pub fn has_accepted_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
        .unwrap_or(false)
}

/// Decode `bytes`, resize to `edge`×`edge` and encode as PNG.
///
/// CPU bound; async callers should run it on a blocking thread.
pub fn normalize_to_png(bytes: &[u8], edge: u32) -> Result<Vec<u8>, ImageError> {
    let img = image::load_from_memory(bytes).map_err(ImageError::Decode)?;
    let resized = img.resize_exact(edge, edge, FilterType::Lanczos3);

    let mut buffer = Cursor::new(Vec::new());
    resized
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(ImageError::Encode)?;

    Ok(buffer.into_inner())
}
