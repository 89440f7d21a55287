use std::path::Path;

use image::DynamicImage;

use crate::{
    backend::{DecodedImage, PixelFormat},
    error::TextureLoadError,
};

/// Decode an image file into tightly packed 8-bit pixels.
///
/// The layout follows `desired_channels` when given, otherwise the channel
/// count stored in the file. Wider sample types are converted down to 8 bit.
pub fn decode_image(
    path: &Path,
    desired_channels: Option<u8>,
) -> Result<DecodedImage, TextureLoadError> {
    let img = image::open(path).map_err(|source| TextureLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    from_dynamic(path, img, desired_channels)
}

/// Same as [`decode_image`] for file contents already in memory.
pub fn decode_bytes(
    label: &Path,
    bytes: &[u8],
    desired_channels: Option<u8>,
) -> Result<DecodedImage, TextureLoadError> {
    let img = image::load_from_memory(bytes).map_err(|source| TextureLoadError::Decode {
        path: label.to_path_buf(),
        source,
    })?;
    from_dynamic(label, img, desired_channels)
}

fn from_dynamic(
    path: &Path,
    img: DynamicImage,
    desired_channels: Option<u8>,
) -> Result<DecodedImage, TextureLoadError> {
    let source_channels = img.color().channel_count();
    let channels = desired_channels.unwrap_or(source_channels);
    let format =
        PixelFormat::from_channels(channels).ok_or_else(|| TextureLoadError::UnsupportedChannels {
            path: path.to_path_buf(),
            channels,
        })?;

    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(TextureLoadError::Empty {
            path: path.to_path_buf(),
            width,
            height,
        });
    }

    let pixels = match format {
        PixelFormat::R8 => img.into_luma8().into_raw(),
        PixelFormat::Rg8 => img.into_luma_alpha8().into_raw(),
        PixelFormat::Rgb8 => img.into_rgb8().into_raw(),
        PixelFormat::Rgba8 => img.into_rgba8().into_raw(),
    };

    Ok(DecodedImage {
        width,
        height,
        source_channels,
        format,
        pixels,
    })
}
