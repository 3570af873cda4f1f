//! # File Management Module
//!
//! Questo modulo gestisce le operazioni sui file e la discovery delle immagini.
//!
//! ## Responsabilità:
//! - Discovery (non ricorsiva) dei file candidati nella directory di input
//! - Match delle estensioni case-insensitive (`PHOTO.JPG` matcha `jpg`)
//! - Calcolo del nome file di output (`foto.png` -> `foto.webp`)
//! - Utilità per dimensioni in KB e percentuale di riduzione
//!
//! ## Ordinamento:
//! I candidati sono ordinati per nome file: l'ordine del listing della
//! directory dipende dal filesystem e non è stabile.
//!
//! ## Esempio:
//! ```no_run
//! use std::path::Path;
//! use webp_converter::file_manager::FileManager;
//!
//! # fn main() -> Result<(), webp_converter::ConvertError> {
//! let files = FileManager::find_candidates(Path::new("/photos"), &["png".to_string()])?;
//! for file in files {
//!     let name = FileManager::output_file_name(&file)?;
//!     println!("{}", name.display());
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::ConvertError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Extension given to every converted file
pub const OUTPUT_EXTENSION: &str = "webp";

/// Manages file discovery and naming
pub struct FileManager;

impl FileManager {
    /// Find regular files directly under `input_dir` whose name ends with one
    /// of the accepted formats. Subdirectories are not descended into.
    pub fn find_candidates(input_dir: &Path, formats: &[String]) -> Result<Vec<PathBuf>, ConvertError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(input_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(e
                        .into_io_error()
                        .map(ConvertError::Io)
                        .unwrap_or_else(|| ConvertError::InputNotFound(input_dir.to_path_buf())));
                }
                Err(e) => {
                    warn!("Skipping unreadable directory entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if Self::matches_format(&name, formats) {
                files.push(entry.path().to_path_buf());
            } else {
                debug!("Skipping non-candidate file: {}", entry.path().display());
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        Ok(files)
    }

    /// Case-insensitive suffix match of `file_name` against `.<format>`
    pub fn matches_format(file_name: &str, formats: &[String]) -> bool {
        let name_lower = file_name.to_lowercase();
        formats
            .iter()
            .any(|fmt| name_lower.ends_with(&format!(".{}", fmt.to_lowercase())))
    }

    /// Output file name: source base name with the extension replaced by `.webp`.
    /// Built from the raw `OsStr`, so non-UTF-8 names survive unchanged.
    pub fn output_file_name(input_path: &Path) -> Result<PathBuf, ConvertError> {
        let mut name = input_path
            .file_stem()
            .ok_or_else(|| ConvertError::InvalidFileName(input_path.to_path_buf()))?
            .to_os_string();

        name.push(".");
        name.push(OUTPUT_EXTENSION);

        Ok(PathBuf::from(name))
    }

    /// Display name of a path (its last component)
    pub fn display_name(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }

    /// Size in kilobytes (bytes / 1024)
    pub fn size_in_kb(size: u64) -> f64 {
        size as f64 / 1024.0
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    /// Percentage reduction, `None` when the original is empty.
    /// Negative when the converted file is larger.
    pub fn calculate_reduction(original_size: u64, new_size: u64) -> Option<f64> {
        if original_size == 0 {
            None
        } else {
            Some(((original_size as f64 - new_size as f64) / original_size as f64) * 100.0)
        }
    }
}
