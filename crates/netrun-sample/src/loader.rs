use crate::SampleError;
use std::{
    fs::{self, File},
    io::Read,
    path::Path,
};

const F32_SIZE: usize = std::mem::size_of::<f32>();

/// Whole file as raw bytes.
pub fn load_byte_payload(path: impl AsRef<Path>) -> Result<Vec<u8>, SampleError> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| SampleError::io(path, e))
}

/// Whole file reinterpreted as native-endian f32 values.
///
/// No shape checks happen here. A file whose length is not a whole number of
/// f32 values is rejected.
pub fn load_float_payload(path: impl AsRef<Path>) -> Result<Vec<f32>, SampleError> {
    let path = path.as_ref();
    let bytes = load_byte_payload(path)?;
    if bytes.len() % F32_SIZE != 0 {
        return Err(SampleError::PartialElement {
            path: path.to_path_buf(),
            len: bytes.len(),
            element_size: F32_SIZE,
        });
    }

    Ok(bytes
        .chunks_exact(F32_SIZE)
        .map(|chunk| f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

/// Overwrite `dest` from offset 0 with the file's bytes.
///
/// The file must be exactly `dest.len()` bytes long. `dest` is never
/// resized, so storage registered elsewhere stays where it is.
pub fn load_bytes_into(path: impl AsRef<Path>, dest: &mut [u8]) -> Result<(), SampleError> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| SampleError::io(path, e))?;
    let len = file
        .metadata()
        .map_err(|e| SampleError::io(path, e))?
        .len();

    if len != dest.len() as u64 {
        return Err(SampleError::SizeMismatch {
            path: path.to_path_buf(),
            expected: dest.len(),
            actual: len as usize,
        });
    }

    file.read_exact(dest).map_err(|e| SampleError::io(path, e))
}

/// Tokens of an input line in order. Runs of spaces or tabs never produce
/// empty tokens.
pub fn split_whitespace(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}
