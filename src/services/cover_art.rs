use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use tracing::{debug, warn};

#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub(crate) enum CoverFormat {
    Jpeg,
    Png,
}

impl CoverFormat {
    pub(crate) fn content_type(&self) -> &'static str {
        match self {
            CoverFormat::Jpeg => "image/jpeg",
            CoverFormat::Png => "image/png",
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct CoverImage {
    pub(crate) bytes: Vec<u8>,
    pub(crate) format: CoverFormat,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum CoverArtError {
    #[error("Unable to decode the cover image: {0}")]
    Decode(image::ImageError),
    #[error("Unable to encode the cover image: {0}")]
    Encode(image::ImageError),
}

pub(crate) fn resize_cover(data: &[u8], target: u32) -> Result<CoverImage, CoverArtError> {
    let img = image::load_from_memory(data).map_err(CoverArtError::Decode)?;
    let (width, height) = (img.width(), img.height());

    // The target is a floor for small sources and a ceiling for large ones;
    // the fit below keeps the aspect ratio either way.
    let (bound_width, bound_height) = if width < target || height < target {
        (width.max(target), height.max(target))
    } else {
        (width.min(target), height.min(target))
    };

    debug!(
        width,
        height, bound_width, bound_height, "Resizing cover image"
    );

    let resized = img.resize(bound_width, bound_height, FilterType::Lanczos3);

    match encode(&resized, ImageFormat::Jpeg) {
        Ok(bytes) => Ok(CoverImage {
            bytes,
            format: CoverFormat::Jpeg,
        }),
        Err(error) => {
            debug!(?error, "JPEG encoding failed, converting color mode");

            let converted = DynamicImage::ImageRgb8(resized.to_rgb8());
            match encode(&converted, ImageFormat::Jpeg) {
                Ok(bytes) => Ok(CoverImage {
                    bytes,
                    format: CoverFormat::Jpeg,
                }),
                Err(error) => {
                    warn!(?error, "JPEG encoding failed, saving as PNG instead");

                    let bytes =
                        encode(&resized, ImageFormat::Png).map_err(CoverArtError::Encode)?;
                    Ok(CoverImage {
                        bytes,
                        format: CoverFormat::Png,
                    })
                }
            }
        }
    }
}

fn encode(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, image::ImageError> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, format)?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::{resize_cover, CoverFormat};
    use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(img: DynamicImage) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    fn decoded_dimensions(bytes: &[u8]) -> (u32, u32) {
        let img = image::load_from_memory(bytes).unwrap();
        (img.width(), img.height())
    }

    #[test]
    fn small_image_is_scaled_up_to_the_target() {
        let source = png_bytes(DynamicImage::ImageRgb8(RgbImage::new(100, 50)));

        let cover = resize_cover(&source, 200).unwrap();

        let (width, height) = decoded_dimensions(&cover.bytes);
        assert_eq!((width, height), (200, 100));
    }

    #[test]
    fn large_image_is_scaled_down_to_the_target() {
        let source = png_bytes(DynamicImage::ImageRgb8(RgbImage::new(1000, 800)));

        let cover = resize_cover(&source, 200).unwrap();

        let (width, height) = decoded_dimensions(&cover.bytes);
        assert_eq!((width, height), (200, 160));
    }

    #[test]
    fn mixed_dimensions_keep_the_larger_side() {
        let source = png_bytes(DynamicImage::ImageRgb8(RgbImage::new(1000, 300)));

        let cover = resize_cover(&source, 512).unwrap();

        let (width, height) = decoded_dimensions(&cover.bytes);
        assert_eq!((width, height), (1000, 300));
    }

    #[test]
    fn rgba_source_is_converted_and_encoded_as_jpeg() {
        let source = png_bytes(DynamicImage::ImageRgba8(RgbaImage::new(300, 300)));

        let cover = resize_cover(&source, 200).unwrap();

        assert_eq!(cover.format, CoverFormat::Jpeg);
        assert_eq!(cover.format.content_type(), "image/jpeg");
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(resize_cover(b"not an image", 200).is_err());
    }
}
