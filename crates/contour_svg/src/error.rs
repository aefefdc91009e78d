//! SVG error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::parse::ParseStatus;

/// Errors that can occur when loading or rasterizing SVG documents
#[derive(Error, Debug)]
pub enum SvgError {
    /// The file to load does not exist
    #[error("path does not exist: \"{}\"", .0.display())]
    NotFound(PathBuf),

    /// IO error when reading the file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The parser reported a failure
    #[error("couldn't parse SVG: {0}")]
    Parse(ParseStatus),

    /// The offscreen surface could not be allocated or encoded
    #[error("raster surface error: {0}")]
    Surface(String),
}
