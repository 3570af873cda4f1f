//! # Configuration Management Module
//!
//! Questo modulo gestisce la configurazione di una singola esecuzione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` (il "conversion job") con tutti i parametri
//! - Normalizza l'elenco dei formati sorgente (lowercase, senza punto iniziale)
//! - Risolve la directory di output di default
//! - Valida la precondizione fatale: la directory di input deve esistere
//!
//! ## Parametri di configurazione:
//! - `input_dir`: Directory con le immagini (default: `Images-to-be-converted`)
//! - `output_dir`: Directory di output (default: `<input_dir>/webp_converted`)
//! - `quality`: Qualità WebP (default: 80, nessun controllo di range)
//! - `formats`: Estensioni accettate (default: png, jpg, jpeg)
//! - `show_progress`: Mostra la progress bar su stderr (default: false)
//!
//! ## Esempio:
//! ```no_run
//! use std::path::PathBuf;
//! use webp_converter::Config;
//!
//! # fn main() -> Result<(), webp_converter::ConvertError> {
//! let config = Config {
//!     input_dir: PathBuf::from("/photos"),
//!     quality: 90,
//!     ..Default::default()
//! };
//! config.validate()?;
//! # Ok(())
//! # }
//! ```

use crate::error::ConvertError;
use std::path::PathBuf;

/// Input directory used when `--path` is not given
pub const DEFAULT_INPUT_DIR: &str = "Images-to-be-converted";

/// Name of the output subdirectory created beneath the input directory
pub const DEFAULT_OUTPUT_SUBDIR: &str = "webp_converted";

pub const DEFAULT_QUALITY: i32 = 80;

pub const DEFAULT_FORMATS: &[&str] = &["png", "jpg", "jpeg"];

/// Configuration for one conversion run
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory containing the source images
    pub input_dir: PathBuf,
    /// Output directory (None = `<input_dir>/webp_converted`)
    pub output_dir: Option<PathBuf>,
    /// WebP quality, passed to the encoder unchecked
    pub quality: i32,
    /// Accepted source extensions, matched case-insensitively
    pub formats: Vec<String>,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: None,
            quality: DEFAULT_QUALITY,
            formats: default_formats(),
            show_progress: false,
        }
    }
}

/// The default accepted formats as owned strings
pub fn default_formats() -> Vec<String> {
    DEFAULT_FORMATS.iter().map(|f| f.to_string()).collect()
}

/// Normalize user supplied formats: trim, drop a leading dot, lowercase, dedup.
///
/// Falls back to the defaults if nothing usable is left.
pub fn normalize_formats<S: AsRef<str>>(formats: &[S]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();

    for format in formats {
        let ext = format.as_ref().trim().trim_start_matches('.').to_lowercase();
        if !ext.is_empty() && !normalized.contains(&ext) {
            normalized.push(ext);
        }
    }

    if normalized.is_empty() {
        default_formats()
    } else {
        normalized
    }
}

impl Config {
    /// Build a config for `input_dir` with every other field at its default
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            ..Default::default()
        }
    }

    /// Replace the accepted formats, normalizing them
    pub fn with_formats<S: AsRef<str>>(mut self, formats: &[S]) -> Self {
        self.formats = normalize_formats(formats);
        self
    }

    /// Formats in normalized form, whatever was assigned to `formats`
    pub fn normalized_formats(&self) -> Vec<String> {
        normalize_formats(&self.formats)
    }

    /// Directory where converted files are written
    pub fn resolve_output_dir(&self) -> PathBuf {
        match self.output_dir {
            Some(ref dir) => dir.clone(),
            None => self.input_dir.join(DEFAULT_OUTPUT_SUBDIR),
        }
    }

    /// Validate the run preconditions. Quality is left to the encoder.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if !self.input_dir.exists() {
            return Err(ConvertError::InputNotFound(self.input_dir.clone()));
        }

        if !self.input_dir.is_dir() {
            return Err(ConvertError::NotADirectory(self.input_dir.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.input_dir, PathBuf::from(DEFAULT_INPUT_DIR));
        assert_eq!(config.quality, 80);
        assert_eq!(config.formats, vec!["png", "jpg", "jpeg"]);
        assert!(config.output_dir.is_none());
        assert!(!config.show_progress);
    }

    #[test]
    fn test_normalize_formats() {
        assert_eq!(normalize_formats(&["PNG", ".Jpg", " jpeg "]), vec!["png", "jpg", "jpeg"]);
        assert_eq!(normalize_formats(&["gif", "GIF", "gif"]), vec!["gif"]);
        assert_eq!(normalize_formats(&["", "."]), default_formats());
        assert_eq!(normalize_formats::<&str>(&[]), default_formats());
    }

    #[test]
    fn test_resolve_output_dir() {
        let config = Config::new("/photos");
        assert_eq!(config.resolve_output_dir(), PathBuf::from("/photos/webp_converted"));

        let config = Config {
            output_dir: Some(PathBuf::from("/elsewhere")),
            ..Config::new("/photos")
        };
        assert_eq!(config.resolve_output_dir(), PathBuf::from("/elsewhere"));
    }

    #[test]
    fn test_config_validation() {
        let temp_dir = TempDir::new().unwrap();

        let config = Config::new(temp_dir.path());
        assert!(config.validate().is_ok());

        let config = Config::new(temp_dir.path().join("missing"));
        assert!(matches!(config.validate(), Err(ConvertError::InputNotFound(_))));

        let file_path = temp_dir.path().join("file.txt");
        std::fs::write(&file_path, b"not a directory").unwrap();
        let config = Config::new(&file_path);
        assert!(matches!(config.validate(), Err(ConvertError::NotADirectory(_))));
    }

    #[test]
    fn test_quality_is_not_range_checked() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            quality: 250,
            ..Config::new(temp_dir.path())
        };
        assert!(config.validate().is_ok());
    }
}
