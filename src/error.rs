use std::fmt;

/// Fatal errors raised while reading or decoding a flight log
#[derive(Debug)]
pub enum LogError {
    /// I/O errors
    Io(std::io::Error),
    /// Malformed CSV structure in a text log
    Csv(csv::Error),
    /// A record of a known type could not be decoded
    Decode { line: u64, message: String },
    /// Invalid wildcard pattern for parameter filtering
    Pattern(glob::PatternError),
    /// Map export failure
    Export(String),
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogError::Io(err) => write!(f, "I/O error: {}", err),
            LogError::Csv(err) => write!(f, "CSV error: {}", err),
            LogError::Decode { line, message } => {
                write!(f, "Decode error at line {}: {}", line, message)
            }
            LogError::Pattern(err) => write!(f, "Invalid parameter pattern: {}", err),
            LogError::Export(msg) => write!(f, "Export error: {}", msg),
        }
    }
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LogError::Io(err) => Some(err),
            LogError::Csv(err) => Some(err),
            LogError::Pattern(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LogError {
    fn from(err: std::io::Error) -> Self {
        LogError::Io(err)
    }
}

impl From<csv::Error> for LogError {
    fn from(err: csv::Error) -> Self {
        LogError::Csv(err)
    }
}

impl From<glob::PatternError> for LogError {
    fn from(err: glob::PatternError) -> Self {
        LogError::Pattern(err)
    }
}

pub type Result<T> = std::result::Result<T, LogError>;

/// A flight statistic that could not be derived from the records in the log.
///
/// These are local conditions: the rest of the report is still produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetricError {
    /// No BAT record was seen
    MissingBattery,
    /// No GPS record was seen
    MissingGps,
    /// No BARO record was seen
    MissingBaro,
    /// Distance flown is zero, so per-distance figures are undefined
    ZeroDistance,
}

impl fmt::Display for MetricError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricError::MissingBattery => write!(f, "no battery samples"),
            MetricError::MissingGps => write!(f, "no GPS fixes"),
            MetricError::MissingBaro => write!(f, "no barometer samples"),
            MetricError::ZeroDistance => write!(f, "undefined, zero distance flown"),
        }
    }
}

impl std::error::Error for MetricError {}
