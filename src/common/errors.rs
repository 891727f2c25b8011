use thiserror::Error;

use super::file_operations::FileOperationError;

/// The library's error enum.
///
/// Cache operations themselves never fail; these errors come from the configuration
/// and logging layers around them.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Configuration values are out of range.
    #[error("Invalid CacheConfig: '{0}'")]
    InvalidCacheConfig(String),

    /// A cache type name that doesn't match any cache kind.
    #[error("Unknown cache type: '{0}'")]
    UnknownCacheType(String),

    #[error("Invalid log level: '{0}'")]
    InvalidLogLevel(String),

    /// log4rs refused the configuration, or a global logger is already installed.
    #[error("Failed to initialize logger: '{0}'")]
    LoggerInit(String),

    #[error("'{0:?}'")]
    FileOperationError(#[from] FileOperationError),
}

impl From<log::SetLoggerError> for CacheError {
    fn from(error: log::SetLoggerError) -> CacheError {
        CacheError::LoggerInit(error.to_string())
    }
}

impl From<std::io::Error> for CacheError {
    fn from(io_err: std::io::Error) -> CacheError {
        CacheError::FileOperationError(FileOperationError::IoError(io_err))
    }
}
