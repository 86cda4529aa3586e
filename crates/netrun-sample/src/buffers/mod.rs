mod tensor;
mod user;

pub use tensor::{TensorBuffers, build_input_tensor, build_multi_input_tensor_map};
pub use user::{UserBuffers, build_user_buffer_map, load_input_user_buffer};

use crate::{BufferType, InputLine, ResultWriter, SampleError};
use netrun_infer::{HostFactory, Network};
use std::path::PathBuf;

/// One buffer strategy: how a line's files reach the network and how the
/// outputs come back out.
///
/// The runner calls `load`, `execute` and `write` in that order once per
/// input line. Nothing is executed when `load` fails.
pub trait BufferMapBuilder {
    fn buffer_type(&self) -> BufferType;

    fn load(&mut self, network: &dyn Network, line: &InputLine) -> Result<(), SampleError>;

    fn execute(&mut self, network: &mut dyn Network) -> Result<(), SampleError>;

    /// Persist every declared output of the last execute under `run_index`.
    fn write(&mut self, writer: &ResultWriter, run_index: usize) -> Result<Vec<PathBuf>, SampleError>;
}

/// Set up the strategy selected by `buffer_type` using host memory.
///
/// For user buffers this allocates and registers every input and output
/// buffer up front.
pub fn create_buffers(
    buffer_type: BufferType,
    network: &dyn Network,
) -> Result<Box<dyn BufferMapBuilder>, SampleError> {
    match buffer_type {
        BufferType::UserBuffer => Ok(Box::new(UserBuffers::new(network, &HostFactory)?)),
        BufferType::ITensor => Ok(Box::new(TensorBuffers::new(Box::new(HostFactory)))),
    }
}
