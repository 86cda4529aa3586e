use super::BufferMapBuilder;
use crate::{
    BufferType, InputLine, ResultWriter, SampleError,
    execute::execute_user_buffers,
    loader::{load_bytes_into, split_whitespace},
};
use netrun_infer::{InferError, Network, TensorInfo, UserBufferFactory, UserBufferMap};
use std::path::PathBuf;

/// Allocate and register one zeroed user buffer per slot.
///
/// Each buffer holds `element_count * element_size` bytes with row-major
/// byte strides. Unconstrained dimensions are sized as 1.
pub fn build_user_buffer_map(
    factory: &dyn UserBufferFactory,
    slots: &[TensorInfo],
) -> Result<UserBufferMap, SampleError> {
    let mut map = UserBufferMap::new();
    for slot in slots {
        let element_size = slot.element_type.size();
        let byte_len = slot
            .shape
            .element_count()?
            .checked_mul(element_size)
            .ok_or(InferError::ShapeOverflow)?;
        let strides = slot.shape.byte_strides(element_size);
        log::debug!(
            "user buffer '{}': {} {} bytes, strides {:?}",
            slot.name,
            slot.element_type,
            byte_len,
            strides
        );

        let storage = vec![0u8; byte_len].into_boxed_slice();
        let buffer = factory.create_user_buffer(
            &slot.name,
            storage,
            &slot.shape,
            strides,
            slot.element_type,
        )?;
        map.insert(slot.name.as_str(), buffer);
    }
    Ok(map)
}

/// Overwrite each declared input's buffer in place with the file named at
/// the same position of `line`.
///
/// Extra paths beyond the declared inputs are ignored.
pub fn load_input_user_buffer(
    network: &dyn Network,
    buffers: &mut UserBufferMap,
    line: &str,
) -> Result<(), SampleError> {
    let names = network.input_names();
    let paths = split_whitespace(line);
    if names.is_empty() || paths.len() < names.len() {
        return Err(SampleError::InputArityMismatch {
            declared: names.len(),
            requirement: format!("input line provides {} paths", paths.len()),
        });
    }
    if paths.len() > names.len() {
        log::warn!(
            "input line has {} paths for {} inputs, ignoring the rest",
            paths.len(),
            names.len()
        );
    }

    for (i, (name, path)) in names.iter().zip(&paths).enumerate() {
        log::info!("\t{}) {}", i + 1, path);
        let buffer = buffers
            .get_mut(name)
            .ok_or_else(|| SampleError::UnknownTensorName {
                name: name.to_string(),
            })?;
        load_bytes_into(path, buffer.as_bytes_mut())?;
    }
    Ok(())
}

/// User-backed strategy: buffers registered once, refreshed per line.
pub struct UserBuffers {
    inputs: UserBufferMap,
    outputs: UserBufferMap,
    loaded: bool,
    executed: bool,
}

impl UserBuffers {
    pub fn new(network: &dyn Network, factory: &dyn UserBufferFactory) -> Result<Self, SampleError> {
        Ok(Self {
            inputs: build_user_buffer_map(factory, network.inputs())?,
            outputs: build_user_buffer_map(factory, network.outputs())?,
            loaded: false,
            executed: false,
        })
    }

    pub fn inputs(&self) -> &UserBufferMap {
        &self.inputs
    }

    pub fn outputs(&self) -> &UserBufferMap {
        &self.outputs
    }
}

impl BufferMapBuilder for UserBuffers {
    fn buffer_type(&self) -> BufferType {
        BufferType::UserBuffer
    }

    fn load(&mut self, network: &dyn Network, line: &InputLine) -> Result<(), SampleError> {
        self.loaded = false;
        self.executed = false;

        log::info!("Processing DNN input (line {}):", line.line_number);
        load_input_user_buffer(network, &mut self.inputs, line.as_str())?;
        self.loaded = true;
        Ok(())
    }

    fn execute(&mut self, network: &mut dyn Network) -> Result<(), SampleError> {
        if !self.loaded {
            return Err(SampleError::NothingLoaded);
        }
        self.loaded = false;
        execute_user_buffers(network, &self.inputs, &mut self.outputs)?;
        self.executed = true;
        Ok(())
    }

    fn write(&mut self, writer: &ResultWriter, run_index: usize) -> Result<Vec<PathBuf>, SampleError> {
        if !self.executed {
            return Err(SampleError::NothingLoaded);
        }
        self.executed = false;
        self.outputs
            .iter()
            .map(|(name, buffer)| writer.write(run_index, name, buffer.as_bytes()))
            .collect()
    }
}
