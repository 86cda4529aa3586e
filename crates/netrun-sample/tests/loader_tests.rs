mod common;

use common::*;
use netrun_sample::{
    SampleError,
    loader::{load_byte_payload, load_bytes_into, load_float_payload},
};
use std::fs;

#[test]
fn test_load_float_payload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.raw");
    write_floats(&path, &[0.5, -1.25, 3.0]);

    assert_eq!(load_float_payload(&path).unwrap(), vec![0.5, -1.25, 3.0]);
}

#[test]
fn test_load_float_payload_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.raw");
    fs::write(&path, b"").unwrap();

    assert!(load_float_payload(&path).unwrap().is_empty());
}

#[test]
fn test_load_float_payload_partial_element() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("odd.raw");
    fs::write(&path, [0u8; 6]).unwrap();

    let err = load_float_payload(&path).unwrap_err();
    assert!(matches!(
        err,
        SampleError::PartialElement { len: 6, element_size: 4, .. }
    ));
}

#[test]
fn test_missing_file_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.raw");

    assert!(matches!(
        load_float_payload(&path),
        Err(SampleError::FileNotFound { .. })
    ));
    assert!(matches!(
        load_byte_payload(&path),
        Err(SampleError::FileNotFound { .. })
    ));
    let mut dest = [0u8; 4];
    assert!(matches!(
        load_bytes_into(&path, &mut dest),
        Err(SampleError::FileNotFound { .. })
    ));
}

#[test]
fn test_load_bytes_into_overwrites_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.raw");
    fs::write(&path, [1u8, 2, 3, 4]).unwrap();

    let mut dest = vec![9u8; 4];
    let before = dest.as_ptr();
    load_bytes_into(&path, &mut dest).unwrap();
    assert_eq!(dest, vec![1, 2, 3, 4]);
    assert_eq!(dest.as_ptr(), before);
}

#[test]
fn test_load_bytes_into_size_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.raw");
    fs::write(&path, [1u8, 2, 3]).unwrap();

    let mut dest = [0u8; 4];
    let err = load_bytes_into(&path, &mut dest).unwrap_err();
    assert!(matches!(
        err,
        SampleError::SizeMismatch { expected: 4, actual: 3, .. }
    ));
    assert_eq!(dest, [0u8; 4]);
}
