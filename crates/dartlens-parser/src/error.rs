//! Error types for dartlens-parser

use thiserror::Error;
use std::io;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Narrative file is not valid UTF-8: {path}")]
    InvalidEncoding { path: String },

    #[error("IO error")]
    IoError(#[from] io::Error),
}
