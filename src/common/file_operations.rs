use std::fs::File;
use std::io::{self, BufReader, BufWriter, Error as IoError, ErrorKind};
use std::path::Path;

use atomicwrites::{AtomicFile, OverwriteBehavior};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub fn atomic_save_json<T: Serialize>(path: &Path, object: &T) -> Result<(), FileOperationError> {
    let af = AtomicFile::new(path, OverwriteBehavior::AllowOverwrite);
    af.write(|f| serde_json::to_writer_pretty(BufWriter::new(f), object))?;
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, FileOperationError> {
    Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?)
}

#[derive(Debug, Error)]
pub enum FileOperationError {
    #[error(transparent)]
    IoError(#[from] io::Error),

    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),

    #[error(transparent)]
    AtomicWriteSerdeJsonError(#[from] atomicwrites::Error<serde_json::Error>),
}

impl From<FileOperationError> for IoError {
    fn from(error: FileOperationError) -> Self {
        match error {
            FileOperationError::IoError(e) => e,
            FileOperationError::SerdeJsonError(e) => IoError::new(ErrorKind::InvalidData, e),
            FileOperationError::AtomicWriteSerdeJsonError(e) => IoError::new(ErrorKind::Other, e.to_string()),
        }
    }
}
