//! # WebP Converter Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Architettura dei moduli:
//! - `config`: Configurazione della run e validazione della directory di input
//! - `error`: Tipi di errore custom per la conversione
//! - `file_manager`: Discovery dei candidati e naming dei file di output
//! - `image_processor`: Decode + encode WebP di una singola immagine
//! - `converter`: Orchestratore del batch e report testuale
//! - `progress`: Progress bar e statistiche
//!
//! ## Utilizzo:
//! ```no_run
//! use webp_converter::{BatchConverter, Config};
//!
//! # fn main() -> Result<(), webp_converter::ConvertError> {
//! let config = Config::new("/path/to/images");
//! let report = BatchConverter::new(config).run(&mut std::io::stdout())?;
//! println!("{} converted", report.stats.converted);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod converter;
pub mod error;
pub mod file_manager;
pub mod image_processor;
pub mod progress;

pub use config::Config;
pub use converter::{BatchConverter, ConversionReport, FileOutcome};
pub use error::ConvertError;
pub use image_processor::{ConvertedFile, ImageProcessor};
