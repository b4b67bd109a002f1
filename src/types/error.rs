use thiserror::Error;

/// weekgrid error types
#[derive(Error, Debug)]
pub enum WeekgridError {
    /// Day key is not a "DD Mon YYYY" date
    #[error("malformed date '{key}' (expected \"DD Mon YYYY\")")]
    MalformedDate { key: String },

    /// Time boundary key is not numeric
    #[error("malformed time boundary '{key}' on {day}")]
    MalformedTimeBoundary { day: String, key: String },

    /// Same boundary key given twice within one day
    #[error("duplicate time boundary '{key}' on {day}")]
    DuplicateTimeBoundary { day: String, key: String },

    /// Color/weight entry could not be interpreted
    #[error("malformed color spec '{entry}' at {day} {boundary}: {reason}")]
    MalformedColorSpec {
        day: String,
        boundary: String,
        entry: String,
        reason: String,
    },

    /// Failed to parse the structured-data file
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding or writing an image failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for weekgrid
pub type Result<T> = std::result::Result<T, WeekgridError>;
