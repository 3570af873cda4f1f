//! # Batch Converter Orchestrator
//!
//! Orchestratore principale: enumera i candidati, converte ogni file in
//! sequenza e produce il riepilogo finale.
//!
//! ## Flusso di esecuzione:
//! 1. Valida la directory di input (unico errore fatale)
//! 2. Enumera i candidati; se sono zero stampa un messaggio e termina
//!    senza creare la directory di output
//! 3. Crea la directory di output (anche i componenti intermedi)
//! 4. Per ogni file: decode -> encode -> write -> report
//! 5. Stampa il riepilogo
//!
//! Gli errori dei singoli file vengono trasformati in `FileOutcome::Failed`
//! e non interrompono il batch.

use crate::{
    config::Config,
    converter::reporter::Reporter,
    error::ConvertError,
    file_manager::FileManager,
    image_processor::{ConvertedFile, ImageProcessor},
    progress::{ConversionStats, ProgressManager},
};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Per-file result of a run
#[derive(Debug)]
pub enum FileOutcome {
    Converted(ConvertedFile),
    Failed { source: PathBuf, error: ConvertError },
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Converted(_))
    }
}

/// Everything a run produced
#[derive(Debug)]
pub struct ConversionReport {
    /// Candidates in processing order
    pub candidates: Vec<PathBuf>,
    pub outcomes: Vec<FileOutcome>,
    pub stats: ConversionStats,
    /// None when no candidates were found and nothing was created
    pub output_dir: Option<PathBuf>,
}

/// Converts every candidate image of one directory to WebP
pub struct BatchConverter {
    config: Config,
    processor: ImageProcessor,
}

impl BatchConverter {
    pub fn new(config: Config) -> Self {
        let processor = ImageProcessor::new(config.quality);
        Self { config, processor }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the conversion, writing the text report to `out`.
    ///
    /// Only a missing input directory (or a failing report writer) returns `Err`.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<ConversionReport, ConvertError> {
        self.config.validate()?;

        let formats = self.config.normalized_formats();
        let candidates = FileManager::find_candidates(&self.config.input_dir, &formats)?;
        let total = candidates.len();

        info!(
            "Found {} candidate files in {} (formats: {})",
            total,
            self.config.input_dir.display(),
            formats.join(", ")
        );

        let progress = if self.config.show_progress && total > 0 {
            ProgressManager::new(total as u64)
        } else {
            ProgressManager::hidden(total as u64)
        };
        let mut reporter = Reporter::new(out, progress);

        if candidates.is_empty() {
            reporter.no_candidates(&formats)?;
            return Ok(ConversionReport {
                candidates,
                outcomes: Vec::new(),
                stats: ConversionStats::new(0),
                output_dir: None,
            });
        }

        let output_dir = self.config.resolve_output_dir();
        self.prepare_output_dir(&output_dir);
        Self::warn_on_name_collisions(&candidates);

        reporter.start(total, self.processor.quality())?;

        let mut stats = ConversionStats::new(total);
        let mut outcomes = Vec::with_capacity(total);

        for (index, input_path) in candidates.iter().enumerate() {
            let index = index + 1;
            reporter
                .progress()
                .set_message(&FileManager::display_name(input_path));

            match self.processor.convert(input_path, &output_dir) {
                Ok(converted) => {
                    stats.add_converted(converted.original_size, converted.converted_size);
                    reporter.converted(index, total, &converted)?;
                    outcomes.push(FileOutcome::Converted(converted));
                }
                Err(error) => {
                    debug!("Conversion of {} failed: {:?}", input_path.display(), error);
                    stats.add_failed();
                    reporter.failed(input_path, &error)?;
                    outcomes.push(FileOutcome::Failed {
                        source: input_path.clone(),
                        error,
                    });
                }
            }

            reporter.progress().inc();
        }

        reporter.summary(&stats, &output_dir)?;
        info!("{}", stats.format_summary());

        Ok(ConversionReport {
            candidates,
            outcomes,
            stats,
            output_dir: Some(output_dir),
        })
    }

    /// Create the output directory. A failure here is not fatal: every
    /// file write will fail and be reported individually.
    fn prepare_output_dir(&self, output_dir: &Path) {
        if output_dir.is_dir() {
            return;
        }

        match std::fs::create_dir_all(output_dir) {
            Ok(()) => info!("Created output directory: {}", output_dir.display()),
            Err(e) => warn!(
                "Failed to create output directory {}: {}",
                output_dir.display(),
                e
            ),
        }
    }

    /// Sources sharing a base name (`a.png`, `a.jpg`) write the same output file
    fn warn_on_name_collisions(candidates: &[PathBuf]) {
        let mut seen: HashMap<PathBuf, &Path> = HashMap::new();

        for candidate in candidates {
            let Ok(name) = FileManager::output_file_name(candidate) else {
                continue;
            };

            if let Some(previous) = seen.insert(name.clone(), candidate) {
                warn!(
                    "{} and {} both convert to {}; the later file overwrites the earlier one",
                    FileManager::display_name(previous),
                    FileManager::display_name(candidate),
                    name.display()
                );
            }
        }
    }
}
