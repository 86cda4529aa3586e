use netrun_infer::InferError;
use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("'{name}' is not an input or output of the network")]
    UnknownTensorName { name: String },

    #[error("network declares {declared} inputs, {requirement}")]
    InputArityMismatch { declared: usize, requirement: String },

    #[error("input line has {found} paths, network declares {expected} inputs")]
    ArgumentCountMismatch { expected: usize, found: usize },

    #[error("payload for '{name}' has {actual} elements, tensor holds {capacity}")]
    PayloadSizeMismatch {
        name: String,
        capacity: usize,
        actual: usize,
    },

    #[error("{}: file has {actual} bytes, buffer expects {expected}", path.display())]
    SizeMismatch {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error("{}: {len} bytes is not a whole number of {element_size}-byte elements", path.display())]
    PartialElement {
        path: PathBuf,
        len: usize,
        element_size: usize,
    },

    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("io error on {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("cannot create directory {}: {source}", path.display())]
    DirectoryCreate { path: PathBuf, source: io::Error },

    #[error("output name '{name}' does not map to a file under the run directory")]
    InvalidOutputName { name: String },

    #[error("no inputs were loaded for this run")]
    NothingLoaded,

    #[error("inference failed: {0}")]
    Inference(#[from] InferError),
}

impl SampleError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            SampleError::FileNotFound { path }
        } else {
            SampleError::Io { path, source }
        }
    }

    /// Errors caused by the data of a single input line.
    ///
    /// These can be skipped when processing continues past failing lines.
    /// Everything else (SDK failures, unwritable output) ends the run.
    pub fn is_line_error(&self) -> bool {
        matches!(
            self,
            SampleError::UnknownTensorName { .. }
                | SampleError::InputArityMismatch { .. }
                | SampleError::ArgumentCountMismatch { .. }
                | SampleError::PayloadSizeMismatch { .. }
                | SampleError::SizeMismatch { .. }
                | SampleError::PartialElement { .. }
                | SampleError::FileNotFound { .. }
        )
    }
}
