#![cfg(feature = "onnx")]

use netrun_infer::backends::OnnxBackend;
use netrun_infer::{Backend, ModelSource, Runtime, create_registry};

#[test]
fn test_onnx_backend_name() {
    assert_eq!(OnnxBackend.name(), "onnx");
}

#[test]
fn test_onnx_cpu_is_available() {
    assert!(OnnxBackend.is_available(&Runtime::Cpu));
}

#[test]
fn test_create_registry_includes_onnx() {
    let registry = create_registry();
    assert!(registry.list().contains(&"onnx"));
    assert!(registry.get("onnx").is_some());
}

#[test]
fn test_load_missing_container_fails() {
    let result = OnnxBackend.load_network(
        ModelSource::File("/nonexistent/model.onnx".into()),
        Runtime::Cpu,
    );
    assert!(result.is_err());
}

#[test]
fn test_load_corrupt_container_is_model_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.onnx");
    std::fs::write(&path, b"not a protobuf").unwrap();

    let result = OnnxBackend.load_network(ModelSource::File(path), Runtime::Cpu);
    assert!(matches!(result, Err(netrun_infer::InferError::ModelLoad(_))));
}
