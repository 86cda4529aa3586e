pub mod backend;
pub mod backendregistry;
pub mod backends;
pub mod element;
pub mod error;
pub mod modelsource;
pub mod network;
pub mod runtime;
pub mod shape;
pub mod tensor;
pub mod userbuffer;

pub use backend::{Backend, select_runtime};
pub use backendregistry::{BackendRegistry, create_registry};
pub use element::ElementType;
pub use error::InferError;
pub use modelsource::ModelSource;
pub use network::{Network, TensorInfo};
pub use runtime::Runtime;
pub use shape::TensorShape;
pub use tensor::{HostFactory, Tensor, TensorFactory, TensorMap};
pub use userbuffer::{UserBuffer, UserBufferFactory, UserBufferMap};
