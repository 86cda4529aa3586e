use crate::SampleError;
use netrun_infer::{Network, TensorInfo, TensorShape};

/// Declared shape of an input or output.
pub fn shape_of(network: &dyn Network, name: &str) -> Result<TensorShape, SampleError> {
    info_of(network, name).map(|info| info.shape.clone())
}

pub fn info_of<'a>(network: &'a dyn Network, name: &str) -> Result<&'a TensorInfo, SampleError> {
    network
        .tensor_info(name)
        .ok_or_else(|| SampleError::UnknownTensorName {
            name: name.to_string(),
        })
}
