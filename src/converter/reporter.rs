//! # Reporter Module
//!
//! Scrive il report testuale della conversione su un `Write` qualsiasi
//! (stdout nel binario, un `Vec<u8>` nei test). Le righe passano attraverso
//! la progress bar così da non sovrascriverla.

use crate::{
    error::ConvertError,
    file_manager::FileManager,
    image_processor::ConvertedFile,
    progress::{ConversionStats, ProgressManager},
};
use std::io::{self, Write};
use std::path::Path;

/// Formats the per-file and summary lines of a run
pub struct Reporter<'w, W: Write> {
    out: &'w mut W,
    progress: ProgressManager,
}

impl<'w, W: Write> Reporter<'w, W> {
    pub fn new(out: &'w mut W, progress: ProgressManager) -> Self {
        Self { out, progress }
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        let out = &mut *self.out;
        self.progress.suspend(|| writeln!(out, "{}", text))
    }

    pub fn progress(&self) -> &ProgressManager {
        &self.progress
    }

    /// Nothing to convert
    pub fn no_candidates(&mut self, formats: &[String]) -> io::Result<()> {
        self.line(&format!(
            "No images with formats [{}] found in the directory!",
            formats.join(", ")
        ))
    }

    pub fn start(&mut self, total: usize, quality: i32) -> io::Result<()> {
        self.line(&format!("Found {} images to convert...", total))?;
        self.line(&format!("Quality setting: {}", quality))
    }

    pub fn converted(&mut self, index: usize, total: usize, file: &ConvertedFile) -> io::Result<()> {
        let reduction = match file.reduction_percent() {
            Some(percent) => format!("{:.1}%", percent),
            None => "N/A".to_string(),
        };

        self.line(&format!(
            "Converted ({}/{}): {} -> {}",
            index,
            total,
            FileManager::display_name(&file.source),
            FileManager::display_name(&file.output)
        ))?;
        self.line(&format!(
            "  Original: {:.1}KB, Converted: {:.1}KB",
            FileManager::size_in_kb(file.original_size),
            FileManager::size_in_kb(file.converted_size)
        ))?;
        self.line(&format!("  Size reduction: {}", reduction))
    }

    pub fn failed(&mut self, source: &Path, error: &ConvertError) -> io::Result<()> {
        self.line(&format!(
            "Error converting {}: {}",
            FileManager::display_name(source),
            error
        ))
    }

    pub fn summary(&mut self, stats: &ConversionStats, output_dir: &Path) -> io::Result<()> {
        self.progress.finish();
        self.line("")?;
        self.line(&format!(
            "Conversion complete! Successfully converted {} of {} files.",
            stats.converted, stats.total
        ))?;
        self.line(&format!(
            "Check the '{}' folder in: {}",
            FileManager::display_name(output_dir),
            output_dir.display()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Reporter<'_, Vec<u8>>) -> io::Result<()>,
    {
        let mut buffer = Vec::new();
        {
            let mut reporter = Reporter::new(&mut buffer, ProgressManager::hidden(1));
            f(&mut reporter).unwrap();
        }
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_converted_lines() {
        let file = ConvertedFile {
            source: PathBuf::from("/in/a.png"),
            output: PathBuf::from("/in/webp_converted/a.webp"),
            original_size: 4096,
            converted_size: 1024,
        };

        let text = render(|r| r.converted(1, 2, &file));
        assert_eq!(
            text,
            "Converted (1/2): a.png -> a.webp\n  Original: 4.0KB, Converted: 1.0KB\n  Size reduction: 75.0%\n"
        );
    }

    #[test]
    fn test_zero_size_reports_na() {
        let file = ConvertedFile {
            source: PathBuf::from("empty.png"),
            output: PathBuf::from("empty.webp"),
            original_size: 0,
            converted_size: 44,
        };

        let text = render(|r| r.converted(1, 1, &file));
        assert!(text.contains("Size reduction: N/A"));
    }

    #[test]
    fn test_no_candidates_message() {
        let text = render(|r| r.no_candidates(&["gif".to_string()]));
        assert_eq!(text, "No images with formats [gif] found in the directory!\n");
    }

    #[test]
    fn test_summary_lines() {
        let mut stats = ConversionStats::new(2);
        stats.add_converted(10, 5);
        stats.add_failed();

        let text = render(|r| r.summary(&stats, Path::new("/photos/webp_converted")));
        assert!(text.contains("Successfully converted 1 of 2 files."));
        assert!(text.ends_with("Check the 'webp_converted' folder in: /photos/webp_converted\n"));
    }
}
