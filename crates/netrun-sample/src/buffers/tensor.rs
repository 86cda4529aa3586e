use super::BufferMapBuilder;
use crate::{
    BufferType, InputLine, ResultWriter, SampleError,
    descriptor::shape_of,
    execute::execute_tensors,
    loader::{load_float_payload, split_whitespace},
};
use netrun_infer::{InferError, Network, Tensor, TensorFactory, TensorMap};
use std::path::PathBuf;

/// Load the single input of `network` from `path` into a fresh tensor.
pub fn build_input_tensor(
    network: &dyn Network,
    factory: &dyn TensorFactory,
    path: &str,
) -> Result<Tensor, SampleError> {
    let names = network.input_names();
    if names.len() != 1 {
        return Err(SampleError::InputArityMismatch {
            declared: names.len(),
            requirement: "single-input loading needs exactly one".to_string(),
        });
    }
    load_tensor(network, factory, names[0], path)
}

/// Load one file per declared input, in declared order, from a
/// whitespace-separated line.
pub fn build_multi_input_tensor_map(
    network: &dyn Network,
    factory: &dyn TensorFactory,
    line: &str,
) -> Result<TensorMap, SampleError> {
    let names = network.input_names();
    if names.len() <= 1 {
        return Err(SampleError::InputArityMismatch {
            declared: names.len(),
            requirement: "multi-input loading needs more than one".to_string(),
        });
    }

    let paths = split_whitespace(line);
    if paths.len() != names.len() {
        return Err(SampleError::ArgumentCountMismatch {
            expected: names.len(),
            found: paths.len(),
        });
    }

    let mut map = TensorMap::new();
    for (i, (name, path)) in names.iter().zip(&paths).enumerate() {
        log::info!("\t{}) {}", i + 1, path);
        let tensor = load_tensor(network, factory, name, path)?;
        map.insert(*name, tensor);
    }
    Ok(map)
}

fn load_tensor(
    network: &dyn Network,
    factory: &dyn TensorFactory,
    name: &str,
    path: &str,
) -> Result<Tensor, SampleError> {
    let payload = load_float_payload(path)?;
    let declared = shape_of(network, name)?;

    let shape = match declared.resolve(payload.len()) {
        Ok(shape) => shape,
        Err(InferError::ShapeMismatch { .. }) => {
            return Err(SampleError::PayloadSizeMismatch {
                name: name.to_string(),
                capacity: declared.element_count()?,
                actual: payload.len(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let mut tensor = factory.create_tensor(&shape)?;
    if payload.len() > tensor.len() {
        return Err(SampleError::PayloadSizeMismatch {
            name: name.to_string(),
            capacity: tensor.len(),
            actual: payload.len(),
        });
    }
    if payload.len() < tensor.len() {
        log::warn!(
            "{} holds {} values, '{}' {} takes {}; the rest stays zero",
            path,
            payload.len(),
            name,
            shape,
            tensor.len()
        );
    }
    tensor.as_mut_slice()[..payload.len()].copy_from_slice(&payload);
    Ok(tensor)
}

/// Tensor-object strategy: fresh tensors per line, moved into the network.
pub struct TensorBuffers {
    factory: Box<dyn TensorFactory>,
    inputs: Option<TensorMap>,
    outputs: Option<TensorMap>,
}

impl TensorBuffers {
    pub fn new(factory: Box<dyn TensorFactory>) -> Self {
        Self {
            factory,
            inputs: None,
            outputs: None,
        }
    }
}

impl BufferMapBuilder for TensorBuffers {
    fn buffer_type(&self) -> BufferType {
        BufferType::ITensor
    }

    fn load(&mut self, network: &dyn Network, line: &InputLine) -> Result<(), SampleError> {
        self.inputs = None;
        self.outputs = None;

        log::info!("Processing DNN input (line {}):", line.line_number);
        let inputs = match network.inputs() {
            [single] => {
                // the whole line is the path, so it may contain spaces
                let path = line.as_str();
                log::info!("\t1) {}", path);
                let tensor = build_input_tensor(network, &*self.factory, path)?;
                let mut map = TensorMap::new();
                map.insert(single.name.as_str(), tensor);
                map
            }
            _ => build_multi_input_tensor_map(network, &*self.factory, line.as_str())?,
        };

        self.inputs = Some(inputs);
        Ok(())
    }

    fn execute(&mut self, network: &mut dyn Network) -> Result<(), SampleError> {
        let inputs = self.inputs.take().ok_or(SampleError::NothingLoaded)?;
        self.outputs = Some(execute_tensors(network, inputs)?);
        Ok(())
    }

    fn write(&mut self, writer: &ResultWriter, run_index: usize) -> Result<Vec<PathBuf>, SampleError> {
        let outputs = self.outputs.take().ok_or(SampleError::NothingLoaded)?;
        outputs
            .iter()
            .map(|(name, tensor)| writer.write_tensor(run_index, name, tensor))
            .collect()
    }
}
