//! # Image Processing Module
//!
//! Questo modulo gestisce la conversione di una singola immagine in WebP.
//!
//! ## Pipeline di conversione
//!
//! 1. **Decodifica**: `image::open` (PNG e JPEG), errore se il file è corrotto
//! 2. **Scelta layout pixel**: RGBA se l'immagine ha un canale alpha, altrimenti RGB
//! 3. **Encoding**: libwebp in modalità lossy tramite il crate `webp`
//! 4. **Scrittura**: il file `.webp` viene scritto solo dopo un encoding riuscito
//! 5. **Misura**: dimensione originale e convertita lette dal filesystem
//!
//! ## Qualità
//!
//! Il valore di qualità viene passato all'encoder senza controlli di range:
//! valori fuori da 0-100 vengono rifiutati da libwebp e diventano un
//! `ConvertError::Encode` per quel file.
//!
//! ## Esempio
//!
//! ```no_run
//! use std::path::Path;
//! use webp_converter::ImageProcessor;
//!
//! # fn main() -> Result<(), webp_converter::ConvertError> {
//! let processor = ImageProcessor::new(80);
//! let converted = processor.convert(Path::new("/in/a.png"), Path::new("/in/webp_converted"))?;
//! println!("{} -> {}", converted.source.display(), converted.output.display());
//! # Ok(())
//! # }
//! ```

use crate::error::ConvertError;
use crate::file_manager::FileManager;
use image::{DynamicImage, GenericImageView};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Outcome of a successful single-file conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedFile {
    pub source: PathBuf,
    pub output: PathBuf,
    pub original_size: u64,
    pub converted_size: u64,
}

impl ConvertedFile {
    /// Percentage reduction, `None` if the source was empty
    pub fn reduction_percent(&self) -> Option<f64> {
        FileManager::calculate_reduction(self.original_size, self.converted_size)
    }
}

/// Decodes source images and re-encodes them as lossy WebP
pub struct ImageProcessor {
    quality: i32,
}

impl ImageProcessor {
    pub fn new(quality: i32) -> Self {
        Self { quality }
    }

    pub fn quality(&self) -> i32 {
        self.quality
    }

    /// Convert `input_path` into `<output_dir>/<stem>.webp`.
    ///
    /// `output_dir` must already exist.
    pub fn convert(&self, input_path: &Path, output_dir: &Path) -> Result<ConvertedFile, ConvertError> {
        let output_path = output_dir.join(FileManager::output_file_name(input_path)?);

        let image = image::open(input_path)?;
        let (width, height) = image.dimensions();
        debug!(
            "Decoded {} ({}x{}, {:?})",
            input_path.display(),
            width,
            height,
            image.color()
        );

        let encoded = self.encode(&image)?;
        fs::write(&output_path, &encoded)?;

        let original_size = fs::metadata(input_path)?.len();
        let converted_size = fs::metadata(&output_path)?.len();

        debug!(
            "Wrote {} ({} -> {})",
            output_path.display(),
            FileManager::format_size(original_size),
            FileManager::format_size(converted_size)
        );

        Ok(ConvertedFile {
            source: input_path.to_path_buf(),
            output: output_path,
            original_size,
            converted_size,
        })
    }

    /// Encode a decoded image to WebP bytes at the configured quality
    pub fn encode(&self, image: &DynamicImage) -> Result<Vec<u8>, ConvertError> {
        let (width, height) = image.dimensions();
        let quality = self.quality as f32;

        let result = if image.color().has_alpha() {
            let rgba = image.to_rgba8();
            webp::Encoder::from_rgba(rgba.as_raw(), width, height).encode_simple(false, quality)
        } else {
            let rgb = image.to_rgb8();
            webp::Encoder::from_rgb(rgb.as_raw(), width, height).encode_simple(false, quality)
        };

        result
            .map(|memory| memory.to_vec())
            .map_err(|e| ConvertError::Encode(format!("{:?} (quality {})", e, self.quality)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn write_png(path: &Path) {
        let img = RgbImage::from_fn(32, 32, |x, y| Rgb([(x * 8) as u8, (y * 8) as u8, 128]));
        img.save(path).unwrap();
    }

    fn is_webp(bytes: &[u8]) -> bool {
        bytes.len() > 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP"
    }

    #[test]
    fn test_convert_png() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("a.png");
        write_png(&input);

        let processor = ImageProcessor::new(80);
        let converted = processor.convert(&input, temp_dir.path()).unwrap();

        assert_eq!(converted.output, temp_dir.path().join("a.webp"));
        assert!(converted.output.exists());
        assert!(converted.original_size > 0);
        assert!(converted.converted_size > 0);
        assert!(converted.reduction_percent().is_some());
        assert!(is_webp(&fs::read(&converted.output).unwrap()));
    }

    #[test]
    fn test_convert_jpeg_uppercase_extension() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("PHOTO.JPG");
        let img = RgbImage::from_fn(24, 16, |x, _| Rgb([x as u8 * 10, 40, 200]));
        img.save_with_format(&input, image::ImageFormat::Jpeg).unwrap();

        let converted = ImageProcessor::new(75).convert(&input, temp_dir.path()).unwrap();
        assert_eq!(converted.output, temp_dir.path().join("PHOTO.webp"));
        assert!(converted.output.exists());
    }

    #[test]
    fn test_encode_keeps_alpha() {
        let img = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 64]));
        let encoded = ImageProcessor::new(80)
            .encode(&DynamicImage::ImageRgba8(img))
            .unwrap();
        assert!(is_webp(&encoded));
    }

    #[test]
    fn test_corrupt_file_fails_without_output() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("bad.png");
        fs::write(&input, b"definitely not a png").unwrap();

        let result = ImageProcessor::new(80).convert(&input, temp_dir.path());
        assert!(matches!(result, Err(ConvertError::Decode(_))));
        assert!(!temp_dir.path().join("bad.webp").exists());
    }

    #[test]
    fn test_out_of_range_quality_is_encoder_error() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("a.png");
        write_png(&input);

        let result = ImageProcessor::new(250).convert(&input, temp_dir.path());
        assert!(matches!(result, Err(ConvertError::Encode(_))));
        assert!(!temp_dir.path().join("a.webp").exists());
    }
}
