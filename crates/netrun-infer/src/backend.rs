use crate::{InferError, ModelSource, Network, Runtime};

pub trait Backend {
    fn name(&self) -> &str;

    /// Whether networks can be placed on `runtime` on this machine.
    fn is_available(&self, runtime: &Runtime) -> bool;

    fn load_network(
        &self,
        model: ModelSource,
        runtime: Runtime,
    ) -> Result<Box<dyn Network>, InferError>;
}

/// Pick the runtime to load onto.
///
/// An unavailable GPU falls back to CPU with a warning. Invalid combinations
/// that slip through are caught when the network is created.
pub fn select_runtime(backend: &dyn Backend, requested: Runtime) -> Result<Runtime, InferError> {
    if backend.is_available(&requested) {
        return Ok(requested);
    }
    if requested != Runtime::Cpu && backend.is_available(&Runtime::Cpu) {
        log::warn!(
            "[{}] {} runtime is not available, falling back to CPU",
            backend.name(),
            requested
        );
        return Ok(Runtime::Cpu);
    }
    Err(InferError::UnsupportedRuntime(requested))
}
