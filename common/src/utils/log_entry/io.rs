use serde_json::error::Error as SerdeJsonError;
use std::io::Error as IoError;
use std::path::Display;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IOEntry<'a> {
    #[error("Create directory {0} successfully")]
    CreateDirectorySuccess(Display<'a>),
    #[error("Failed to create directory {0}: {1}")]
    CreateDirectoryError(Display<'a>, IoError),
    #[error("Failed to create file {0}: {1}")]
    CreateFileError(Display<'a>, IoError),
    #[error("Failed to read file {0}: {1}")]
    ReadFileError(Display<'a>, IoError),
    #[error("Failed to write file {0}: {1}")]
    WriteFileError(Display<'a>, IoError),
    #[error("Failed to replace file {0}: {1}")]
    ReplaceFileError(Display<'a>, IoError),
    #[error("Failed to serialize data: {0}")]
    SerdeSerializeError(SerdeJsonError),
    #[error("Failed to deserialize {0}: {1}")]
    SerdeDeserializeError(Display<'a>, SerdeJsonError),
}

impl From<IOEntry<'_>> for String {
    #[inline(always)]
    fn from(value: IOEntry) -> Self {
        value.to_string()
    }
}
