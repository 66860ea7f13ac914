use std::io::Cursor;

use image::{DynamicImage, ImageDecoder, ImageReader};

use crate::domain::SourcePage;

/// Phone photos of a magazine spread can exceed this comfortably; anything larger is
/// almost certainly not a page.
pub const MAX_PAGE_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum PageLoadError {
    #[error("{file}: empty upload")]
    Empty { file: String },
    #[error("{file}: {size} bytes exceeds the {limit} byte limit")]
    TooLarge {
        file: String,
        size: usize,
        limit: usize,
    },
    #[error("{file}: unsupported or corrupt image: {reason}")]
    Decode { file: String, reason: String },
}

/// Decodes an uploaded photo and applies its EXIF orientation so columns are upright.
pub fn load_page(file_id: &str, bytes: &[u8]) -> Result<SourcePage, PageLoadError> {
    if bytes.is_empty() {
        return Err(PageLoadError::Empty {
            file: file_id.to_string(),
        });
    }
    if bytes.len() > MAX_PAGE_BYTES {
        return Err(PageLoadError::TooLarge {
            file: file_id.to_string(),
            size: bytes.len(),
            limit: MAX_PAGE_BYTES,
        });
    }

    let decode_error = |e: image::ImageError| PageLoadError::Decode {
        file: file_id.to_string(),
        reason: e.to_string(),
    };

    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| PageLoadError::Decode {
            file: file_id.to_string(),
            reason: e.to_string(),
        })?
        .into_decoder()
        .map_err(decode_error)?;

    let orientation = decoder.orientation().map_err(decode_error)?;
    let mut image = DynamicImage::from_decoder(decoder).map_err(decode_error)?;
    image.apply_orientation(orientation);

    tracing::debug!(
        file = file_id,
        width = image.width(),
        height = image.height(),
        "Page decoded"
    );

    Ok(SourcePage::new(file_id, image))
}
