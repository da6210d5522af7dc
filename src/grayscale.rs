//! Grayscale conversion

use std::path::Path;

use image::{DynamicImage, GrayImage, ImageReader, Luma};
use tracing::debug;

use crate::error::GrayHarvestError;

/// Decodes `input`, converts it to 8-bit luma and writes it to `output`.
///
/// Luma uses the Rec.601 weights (0.299, 0.587, 0.114), the same ones
/// OpenCV's `COLOR_BGR2GRAY` uses.
///
/// The input format is sniffed from the file contents, so a PNG saved as
/// `1.jpg` still decodes. The output format follows the extension of
/// `output`. Nothing is written if decoding fails.
pub fn convert_to_grayscale(input: &Path, output: &Path) -> Result<(), GrayHarvestError> {
    let reader = ImageReader::open(input)?.with_guessed_format()?;
    let format = reader.format();
    let image = reader.decode()?;
    debug!(
        "Decoded {} ({:?}, {}x{}, {:?})",
        input.display(),
        format,
        image.width(),
        image.height(),
        image.color()
    );

    rec601_luma(&image).save(output)?;
    Ok(())
}

/// Fixed-point Rec.601 luma, weights scaled by 2^14 and rounded.
fn rec601_luma(image: &DynamicImage) -> GrayImage {
    let rgb = image.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let luma = (u32::from(r) * 4899 + u32::from(g) * 9617 + u32::from(b) * 1868 + 8192) >> 14;
        Luma([luma as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::png_bytes;
    use image::{ColorType, Rgb, RgbImage};

    #[test]
    fn colour_png_becomes_single_channel() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("1.png");
        let output = dir.path().join("1-gray.png");
        std::fs::write(&input, png_bytes(6, 4)).expect("write input");

        convert_to_grayscale(&input, &output).expect("convert");

        let gray = image::open(&output).expect("open output");
        assert_eq!(gray.color(), ColorType::L8);
        assert_eq!((gray.width(), gray.height()), (6, 4));
    }

    #[test]
    fn primaries_use_rec601_weights() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("rgb.png");
        let output = dir.path().join("rgb-gray.png");
        let colours = [[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 255]];
        RgbImage::from_fn(4, 1, |x, _| Rgb(colours[x as usize]))
            .save(&input)
            .expect("write input");

        convert_to_grayscale(&input, &output).expect("convert");

        let gray = image::open(&output).expect("open output").to_luma8();
        let values: Vec<u8> = gray.pixels().map(|pixel| pixel.0[0]).collect();
        assert_eq!(values, vec![76, 150, 29, 255]);
    }

    #[test]
    fn converting_gray_again_changes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("gray.png");
        let output = dir.path().join("gray-again.png");
        let original = GrayImage::from_fn(5, 5, |x, y| Luma([(x * 50 + y) as u8]));
        original.save(&input).expect("write input");

        convert_to_grayscale(&input, &output).expect("convert");

        let again = image::open(&output).expect("open output").to_luma8();
        assert_eq!(again, original);
    }

    #[test]
    fn png_content_with_jpg_name_still_decodes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("1.jpg");
        let output = dir.path().join("gray.jpg");
        std::fs::write(&input, png_bytes(8, 8)).expect("write input");

        convert_to_grayscale(&input, &output).expect("convert");

        let gray = image::open(&output).expect("open output");
        assert_eq!(gray.color(), ColorType::L8);
    }

    #[test]
    fn undecodable_input_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let output = dir.path().join("out.jpg");

        let garbage = dir.path().join("garbage.jpg");
        std::fs::write(&garbage, b"<html>Not Found</html>").expect("write input");
        assert!(convert_to_grayscale(&garbage, &output).is_err());

        let empty = dir.path().join("empty.jpg");
        std::fs::write(&empty, b"").expect("write input");
        assert!(convert_to_grayscale(&empty, &output).is_err());

        assert!(convert_to_grayscale(&dir.path().join("missing.jpg"), &output).is_err());
        assert!(!output.exists());
    }
}
