//! # Converter Module
//!
//! Modulo che separa le responsabilità della conversione batch:
//! - `batch_converter`: Orchestratore principale (enumera, converte, riassume)
//! - `reporter`: Report testuale su stdout, coordinato con la progress bar

pub mod batch_converter;
pub mod reporter;

pub use batch_converter::{BatchConverter, ConversionReport, FileOutcome};
pub use reporter::Reporter;
