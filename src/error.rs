//! # Error Types Module
//!
//! Questo modulo definisce i tipi di errore della conversione.
//!
//! ## Responsabilità:
//! - Definisce `ConvertError` enum per categorizzare tutti gli errori possibili
//! - Fornisce messaggi di errore descrittivi da stampare nel report
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - `InputNotFound` / `NotADirectory`: precondizione fatale sulla directory di input
//! - `Io`: Errori di I/O (lettura directory, scrittura output, metadata)
//! - `Decode`: File sorgente corrotto o formato non supportato
//! - `Encode`: Il codec WebP ha rifiutato l'immagine o i parametri
//! - `InvalidFileName`: Nome file senza stem utilizzabile
//!
//! Solo le prime due categorie interrompono l'esecuzione: tutte le altre
//! vengono assorbite a livello di singolo file dal `BatchConverter`.

use std::path::PathBuf;

/// Custom error types for WebP conversion
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("Input directory not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Input path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("WebP encode error: {0}")]
    Encode(String),

    #[error("Invalid file name: {0}")]
    InvalidFileName(PathBuf),
}

impl ConvertError {
    /// True for errors that abort the whole run instead of a single file
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InputNotFound(_) | Self::NotADirectory(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(ConvertError::InputNotFound(PathBuf::from("/missing")).is_fatal());
        assert!(ConvertError::NotADirectory(PathBuf::from("/file.txt")).is_fatal());
        assert!(!ConvertError::Encode("bad config".to_string()).is_fatal());

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!ConvertError::from(io).is_fatal());
    }

    #[test]
    fn test_error_messages() {
        let err = ConvertError::InputNotFound(PathBuf::from("/missing"));
        assert_eq!(err.to_string(), "Input directory not found: /missing");

        let err = ConvertError::Encode("VP8_ENC_ERROR_INVALID_CONFIGURATION".to_string());
        assert!(err.to_string().starts_with("WebP encode error:"));
    }
}
