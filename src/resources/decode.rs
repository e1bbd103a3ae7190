use std::path::{Path, PathBuf};

use crate::{
    error::{SceneError, SceneResult},
    resources::load_binary,
};

/// Raw pixels of a decoded image, rows bottom-up.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Interleaved 8-bit channels per pixel.
    pub channels: u8,
}

impl DecodedImage {
    /// Expand to tightly packed RGBA8. Returns `None` for channel counts other
    /// than 3 and 4.
    pub fn to_rgba8(&self) -> Option<image::RgbaImage> {
        match self.channels {
            4 => image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone()),
            3 => {
                let rgba = self
                    .pixels
                    .chunks_exact(3)
                    .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], u8::MAX])
                    .collect();
                image::RgbaImage::from_raw(self.width, self.height, rgba)
            }
            _ => None,
        }
    }
}

pub trait ImageDecoder {
    fn decode(&self, path: &Path) -> SceneResult<DecodedImage>;
}

/// Decodes image files from disk with the `image` crate.
///
/// Images are flipped vertically so that the first row is the bottom of the
/// picture. Colour images are reduced to 8 bits per channel, keeping alpha
/// when the file has it; grey images keep their one or two channels.
#[derive(Clone, Debug, Default)]
pub struct FileImageDecoder;

impl ImageDecoder for FileImageDecoder {
    fn decode(&self, path: &Path) -> SceneResult<DecodedImage> {
        let decode_error = |reason: String| SceneError::ImageDecode {
            path: PathBuf::from(path),
            reason,
        };
        let bytes = load_binary(path).map_err(|e| decode_error(e.to_string()))?;
        let img = image::load_from_memory(&bytes)
            .map_err(|e| decode_error(e.to_string()))?
            .flipv();

        let (width, height) = (img.width(), img.height());
        let channels = img.color().channel_count();
        let pixels = match channels {
            1 => img.into_luma8().into_raw(),
            2 => img.into_luma_alpha8().into_raw(),
            3 => img.into_rgb8().into_raw(),
            _ => img.into_rgba8().into_raw(),
        };

        Ok(DecodedImage {
            pixels,
            width,
            height,
            channels: channels.min(4),
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    const RED: [u8; 3] = [255, 0, 0];
    const BLUE: [u8; 3] = [0, 0, 255];

    /// 1×2 image: red top row, blue bottom row.
    fn red_over_blue(dir: &Path) -> PathBuf {
        let path = dir.join("red_over_blue.png");
        let img = image::RgbImage::from_fn(1, 2, |_, y| image::Rgb(if y == 0 { RED } else { BLUE }));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn rows_come_bottom_up() {
        let dir = tempdir().unwrap();
        let decoded = FileImageDecoder.decode(&red_over_blue(dir.path())).unwrap();

        assert_eq!((decoded.width, decoded.height), (1, 2));
        assert_eq!(decoded.channels, 3);
        assert_eq!(decoded.pixels, [BLUE, RED].concat());
    }

    #[test]
    fn rgb_expands_to_opaque_rgba() {
        let dir = tempdir().unwrap();
        let decoded = FileImageDecoder.decode(&red_over_blue(dir.path())).unwrap();

        let rgba = decoded.to_rgba8().unwrap();
        assert_eq!(rgba.get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(rgba.get_pixel(0, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn alpha_and_grey_keep_their_channel_count() {
        let dir = tempdir().unwrap();
        let rgba_path = dir.path().join("rgba.png");
        image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 40]))
            .save(&rgba_path)
            .unwrap();
        let grey_path = dir.path().join("grey.png");
        image::GrayImage::from_pixel(2, 2, image::Luma([7])).save(&grey_path).unwrap();

        let rgba = FileImageDecoder.decode(&rgba_path).unwrap();
        assert_eq!(rgba.channels, 4);
        assert_eq!(rgba.to_rgba8().unwrap().get_pixel(1, 1).0, [10, 20, 30, 40]);

        let grey = FileImageDecoder.decode(&grey_path).unwrap();
        assert_eq!(grey.channels, 1);
        assert_eq!(grey.pixels, vec![7; 4]);
        assert!(grey.to_rgba8().is_none());
    }

    #[test]
    fn missing_and_corrupt_files_fail_to_decode() {
        let dir = tempdir().unwrap();
        let corrupt = dir.path().join("corrupt.png");
        std::fs::write(&corrupt, b"not a png").unwrap();

        for path in [dir.path().join("missing.png"), corrupt] {
            assert!(matches!(
                FileImageDecoder.decode(&path),
                Err(SceneError::ImageDecode { .. })
            ));
        }
    }
}
