pub mod buffers;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod execute;
pub mod inputlist;
pub mod loader;
pub mod runner;
pub mod writer;

pub use buffers::{BufferMapBuilder, TensorBuffers, UserBuffers, create_buffers};
pub use config::{BufferType, Cli, SampleConfig};
pub use descriptor::shape_of;
pub use error::SampleError;
pub use inputlist::{InputLine, InputList};
pub use runner::{ErrorPolicy, RunSummary, Runner, run_sample};
pub use writer::{ResultWriter, write_result};
