use crate::SampleError;
use netrun_infer::Tensor;
use std::{
    fs,
    path::{Component, Path, PathBuf},
};

/// Writes network outputs as headerless raw files under
/// `<output_dir>/Result_<run_index>/<name>.raw`.
#[derive(Clone, Debug)]
pub struct ResultWriter {
    output_dir: PathBuf,
}

impl ResultWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn result_path(&self, run_index: usize, name: &str) -> Result<PathBuf, SampleError> {
        result_path(&self.output_dir, run_index, name)
    }

    pub fn write(&self, run_index: usize, name: &str, data: &[u8]) -> Result<PathBuf, SampleError> {
        write_result(&self.output_dir, run_index, name, data)
    }

    /// Tensor elements in order, native-endian f32.
    pub fn write_tensor(
        &self,
        run_index: usize,
        name: &str,
        tensor: &Tensor,
    ) -> Result<PathBuf, SampleError> {
        self.write(run_index, name, &tensor.to_ne_bytes())
    }
}

/// `<output_dir>/Result_<run_index>/<name>.raw`.
///
/// Leading `/` in `name` is dropped so the file stays under `Result_<n>`.
/// Names with `..`, `.` or empty components are rejected.
pub fn result_path(output_dir: &Path, run_index: usize, name: &str) -> Result<PathBuf, SampleError> {
    let relative = name.trim_start_matches('/');
    let invalid = relative.is_empty()
        || relative.split('/').any(|part| part.is_empty())
        || !Path::new(relative)
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
    if invalid {
        return Err(SampleError::InvalidOutputName {
            name: name.to_string(),
        });
    }

    Ok(output_dir
        .join(format!("Result_{}", run_index))
        .join(format!("{}.raw", relative)))
}

/// Write `data` for output `name` of run `run_index`, creating directories
/// as needed and truncating an existing file.
///
/// Output names containing `/` land in nested directories.
pub fn write_result(
    output_dir: &Path,
    run_index: usize,
    name: &str,
    data: &[u8],
) -> Result<PathBuf, SampleError> {
    let path = result_path(output_dir, run_index, name)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| SampleError::DirectoryCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&path, data).map_err(|source| SampleError::Io {
        path: path.clone(),
        source,
    })?;
    log::debug!("wrote {} bytes to {}", data.len(), path.display());
    Ok(path)
}
