//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce il progress tracking e le statistiche di conversione.
//!
//! ## Componenti principali:
//! - `ProgressManager`: progress bar `indicatif` su stderr (o nascosta)
//! - `ConversionStats`: contatori cumulativi della run
//!
//! ## Statistiche tracciate:
//! - **total**: Numero di file candidati
//! - **converted**: File convertiti con successo
//! - **failed**: File falliti (decode/encode/write)
//! - **total_original_size** / **total_converted_size**: Byte prima e dopo
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:00:03] [========================>---------------] 12/20 (60%) photo.jpg
//! ```

use crate::file_manager::FileManager;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Manages progress reporting for a conversion run
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress bar drawn on stderr
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        {
            bar.set_style(style.progress_chars("=>-"));
        }

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// A progress manager that never draws
    pub fn hidden(total_files: u64) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total_files);
        Self { bar }
    }

    /// Set the message shown next to the bar without incrementing
    pub fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    /// Advance by one file
    pub fn inc(&self) {
        self.bar.inc(1);
    }

    /// Run `f` with the bar cleared, so text output does not clobber it
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.bar.suspend(f)
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Statistics tracker for conversion results
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConversionStats {
    pub total: usize,
    pub converted: usize,
    pub failed: usize,
    pub total_original_size: u64,
    pub total_converted_size: u64,
}

impl ConversionStats {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    pub fn add_converted(&mut self, original_size: u64, converted_size: u64) {
        self.converted += 1;
        self.total_original_size += original_size;
        self.total_converted_size += converted_size;
    }

    pub fn add_failed(&mut self) {
        self.failed += 1;
    }

    /// Overall percentage reduction over converted files, `None` if no bytes were read
    pub fn overall_reduction_percent(&self) -> Option<f64> {
        FileManager::calculate_reduction(self.total_original_size, self.total_converted_size)
    }

    pub fn format_summary(&self) -> String {
        let reduction = match self.overall_reduction_percent() {
            Some(percent) => format!("{:.1}%", percent),
            None => "N/A".to_string(),
        };

        format!(
            "Converted: {} | Failed: {} | Total: {} -> {} ({})",
            self.converted,
            self.failed,
            FileManager::format_size(self.total_original_size),
            FileManager::format_size(self.total_converted_size),
            reduction
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_accumulate() {
        let mut stats = ConversionStats::new(3);
        stats.add_converted(1000, 400);
        stats.add_converted(1000, 600);
        stats.add_failed();

        assert_eq!(stats.total, 3);
        assert_eq!(stats.converted, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.converted, stats.total - stats.failed);
        assert_eq!(stats.overall_reduction_percent(), Some(50.0));
    }

    #[test]
    fn test_summary_without_bytes() {
        let mut stats = ConversionStats::new(1);
        stats.add_failed();
        assert!(stats.format_summary().ends_with("(N/A)"));
    }

    #[test]
    fn test_hidden_progress_runs_output() {
        let progress = ProgressManager::hidden(2);
        progress.set_message("a.png");
        progress.inc();
        progress.inc();
        assert_eq!(progress.suspend(|| 7), 7);
        progress.finish();
    }
}
