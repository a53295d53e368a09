use std::path::PathBuf;
use thiserror::Error;

// Barcode and font problems never show up here, they degrade the label.
#[derive(Debug, Error)]
pub enum SheetError {
    // The label table could not be opened or parsed
    #[error("failed to read label table {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    // Output directory or row file could not be written
    #[error("failed to write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO error while streaming encoded image data
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // PNG encoder rejected the image
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),

    // A pixel buffer with these dimensions cannot exist
    #[error("cannot allocate a {width}x{height} image")]
    Pixmap { width: u32, height: u32 },

    // Physical constants that cannot produce a sheet
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type SheetResult<T> = Result<T, SheetError>;
