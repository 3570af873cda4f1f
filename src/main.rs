//! # WebP Converter - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Creazione della configurazione e avvio del `BatchConverter`
//! - Exit code non-zero se la directory di input non esiste
//!
//! ## Esempio di utilizzo:
//! ```bash
//! webp-converter --path ./photos --quality 85 --formats png jpg
//! ```

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use webp_converter::config::{self, Config};
use webp_converter::BatchConverter;

#[derive(Parser)]
#[command(name = "webp-converter")]
#[command(about = "Convert images to WebP format")]
struct Args {
    /// Path to the directory containing images
    #[arg(short, long, default_value = config::DEFAULT_INPUT_DIR)]
    path: PathBuf,

    /// WebP quality (0-100)
    #[arg(short, long, default_value_t = config::DEFAULT_QUALITY, allow_negative_numbers = true)]
    quality: i32,

    /// Image formats to convert
    #[arg(short, long, num_args = 1.., default_values = ["png", "jpg", "jpeg"])]
    formats: Vec<String>,

    /// Output directory (default: <path>/webp_converted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("webp_converter=debug")
    } else {
        EnvFilter::new("warn")
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    run(args)
}

/// Build the config from parsed arguments and convert. Returns `Err` (and so a
/// non-zero exit code) only when the input directory is unusable.
fn run(args: Args) -> Result<()> {
    let formats = config::normalize_formats(&args.formats);

    println!("Image to WebP Converter");
    println!("======================");
    println!("Input path: {}", args.path.display());
    println!("Selected formats: {}", formats.join(", "));
    println!("Quality setting: {}", args.quality);
    println!("======================");

    let config = Config {
        input_dir: args.path,
        output_dir: args.output,
        quality: args.quality,
        formats,
        show_progress: std::io::stderr().is_terminal(),
    };
    debug!("Configuration: {:?}", config);

    let converter = BatchConverter::new(config);
    let mut stdout = std::io::stdout().lock();

    match converter.run(&mut stdout) {
        Ok(report) => {
            debug!("{}", report.stats.format_summary());
            Ok(())
        }
        Err(e) if e.is_fatal() => Err(anyhow::anyhow!("{}. Please make sure the path exists.", e)),
        Err(e) => Err(e.into()),
    }
}
