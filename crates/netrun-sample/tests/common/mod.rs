#![allow(dead_code)]

use netrun_infer::{
    ElementType, InferError, Network, Tensor, TensorInfo, TensorMap, TensorShape, UserBufferMap,
};
use std::{fs, path::Path};

/// Network double with fixed declarations.
///
/// Each execute records its inputs and fills every output with the
/// concatenated input data, truncated or zero-padded to the output size.
/// The output named by `skip_output` is never written.
pub struct FakeNetwork {
    inputs: Vec<TensorInfo>,
    outputs: Vec<TensorInfo>,
    pub executions: usize,
    pub seen: Vec<Vec<(String, Vec<u8>)>>,
    pub fail: bool,
    pub skip_output: Option<String>,
}

impl FakeNetwork {
    pub fn new(inputs: Vec<TensorInfo>, outputs: Vec<TensorInfo>) -> Self {
        Self {
            inputs,
            outputs,
            executions: 0,
            seen: Vec::new(),
            fail: false,
            skip_output: None,
        }
    }

    pub fn single(input: &str, dims: &[usize], output: &str, out_dims: &[usize]) -> Self {
        Self::new(
            vec![f32_info(input, dims)],
            vec![f32_info(output, out_dims)],
        )
    }

    fn skips(&self, name: &str) -> bool {
        self.skip_output.as_deref() == Some(name)
    }

    fn echo(&self, size: usize, recorded: &[(String, Vec<u8>)]) -> Vec<u8> {
        let mut bytes: Vec<u8> = recorded.iter().flat_map(|(_, b)| b.iter().copied()).collect();
        bytes.resize(size, 0);
        bytes
    }
}

pub fn f32_info(name: &str, dims: &[usize]) -> TensorInfo {
    TensorInfo::new(name, TensorShape::new(dims.to_vec()), ElementType::Float32)
}

pub fn u8_info(name: &str, dims: &[usize]) -> TensorInfo {
    TensorInfo::new(name, TensorShape::new(dims.to_vec()), ElementType::UInt8)
}

impl Network for FakeNetwork {
    fn inputs(&self) -> &[TensorInfo] {
        &self.inputs
    }

    fn outputs(&self) -> &[TensorInfo] {
        &self.outputs
    }

    fn execute(&mut self, inputs: TensorMap) -> Result<TensorMap, InferError> {
        if self.fail {
            return Err(InferError::Runtime("fake failure".to_string()));
        }
        self.executions += 1;
        let recorded: Vec<(String, Vec<u8>)> = inputs
            .iter()
            .map(|(name, tensor)| (name.to_string(), tensor.to_ne_bytes()))
            .collect();

        let mut outputs = TensorMap::new();
        for info in self.outputs.iter().filter(|o| !self.skips(&o.name)) {
            let len = info.shape.element_count()?;
            let bytes = self.echo(len * 4, &recorded);
            let data = bytes
                .chunks_exact(4)
                .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
                .collect();
            outputs.insert(info.name.as_str(), Tensor::from_vec(info.shape.clone(), data)?);
        }
        self.seen.push(recorded);
        Ok(outputs)
    }

    fn execute_user_buffers(
        &mut self,
        inputs: &UserBufferMap,
        outputs: &mut UserBufferMap,
    ) -> Result<Vec<String>, InferError> {
        if self.fail {
            return Err(InferError::Runtime("fake failure".to_string()));
        }
        self.executions += 1;
        let recorded: Vec<(String, Vec<u8>)> = inputs
            .iter()
            .map(|(name, buffer)| (name.to_string(), buffer.as_bytes().to_vec()))
            .collect();

        let mut written = Vec::new();
        for (name, buffer) in outputs.iter_mut() {
            if self.skips(name) {
                continue;
            }
            let bytes = self.echo(buffer.len(), &recorded);
            buffer.as_bytes_mut().copy_from_slice(&bytes);
            written.push(name.to_string());
        }
        self.seen.push(recorded);
        Ok(written)
    }
}

pub fn floats_to_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_ne_bytes()).collect()
}

pub fn write_floats(path: &Path, values: &[f32]) {
    fs::write(path, floats_to_bytes(values)).unwrap();
}

pub fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}
