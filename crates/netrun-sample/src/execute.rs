use crate::SampleError;
use netrun_infer::{InferError, Network, TensorMap, UserBufferMap};

/// Run the network on owned input tensors.
///
/// The inputs are consumed by the call. Every declared output is present in
/// the returned map.
pub fn execute_tensors(
    network: &mut dyn Network,
    inputs: TensorMap,
) -> Result<TensorMap, SampleError> {
    check_names(network.input_names(), inputs.names().collect())?;

    let outputs = network.execute(inputs)?;
    for name in network.output_names() {
        if outputs.get(name).is_none() {
            return Err(InferError::Backend(format!("network produced no output '{}'", name)).into());
        }
    }
    Ok(outputs)
}

/// Run the network on registered user buffers. Results land in `outputs`.
///
/// Fails if any declared output was left unwritten, since its buffer would
/// still hold the previous run's data.
pub fn execute_user_buffers(
    network: &mut dyn Network,
    inputs: &UserBufferMap,
    outputs: &mut UserBufferMap,
) -> Result<(), SampleError> {
    check_names(network.input_names(), inputs.names().collect())?;
    check_names(network.output_names(), outputs.names().collect())?;

    let written = network.execute_user_buffers(inputs, outputs)?;
    for name in network.output_names() {
        if !written.iter().any(|w| w == name) {
            return Err(InferError::Backend(format!("network did not write output '{}'", name)).into());
        }
    }
    Ok(())
}

// Buffer maps must carry exactly the declared names.
fn check_names(declared: Vec<&str>, present: Vec<&str>) -> Result<(), SampleError> {
    let expected_names = || declared.iter().map(|n| n.to_string()).collect();
    for name in &present {
        if !declared.contains(name) {
            return Err(InferError::InvalidInput {
                name: name.to_string(),
                expected_names: expected_names(),
            }
            .into());
        }
    }
    for name in &declared {
        if !present.contains(name) {
            return Err(InferError::InvalidInput {
                name: name.to_string(),
                expected_names: expected_names(),
            }
            .into());
        }
    }
    Ok(())
}
